// src/context.rs
//! Ranks the delivery history against a new entry and picks the most
//! lexically similar records. Pure, no I/O, suitable for unit tests.

use crate::ingest::types::Entry;
use crate::ledger::HistoryRecord;
use crate::text::similarity;

/// How many history records are considered as context for one entry.
pub const CONTEXT_TOP_K: usize = 3;

/// Top `top_k` history records by overlap with `entry`, descending score.
///
/// The sort is stable and equal scores keep the history order, so repeated
/// calls against the same inputs return identical output. Records with no
/// overlap at all (score 0) are never context, even when they fall inside
/// the top-k window.
pub fn select_context<'a>(
    entry: &Entry,
    history: &'a [HistoryRecord],
    top_k: usize,
) -> Vec<&'a HistoryRecord> {
    let new_text = format!("{} {}", entry.title, entry.raw_body);
    let mut scored: Vec<(f64, &HistoryRecord)> = history
        .iter()
        .map(|h| {
            let hist_text = format!("{} {}", h.title, h.summary);
            (similarity(&new_text, &hist_text), h)
        })
        .collect();
    // scores are finite, so Equal on None is unreachable but harmless
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored
        .into_iter()
        .take(top_k)
        .filter(|(score, _)| *score > 0.0)
        .map(|(_, h)| h)
        .collect()
}
