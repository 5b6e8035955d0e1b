// src/summary.rs
//! Extractive summarizer and the composer that folds related-context titles
//! into the final notification text.

use once_cell::sync::OnceCell;
use regex::Regex;

use crate::ingest::types::Entry;
use crate::ledger::HistoryRecord;

/// Character cap for the extractive summary (ellipsis excluded).
pub const SUMMARY_MAX_CHARS: usize = 300;

/// Total budget for summary + related-context suffix. When the suffix would
/// blow this budget it is dropped whole; titles are never cut mid-word.
const COMPOSE_BUDGET: usize = 350;

const MAX_SENTENCES: usize = 3;
const MAX_CONTEXT_TITLES: usize = 2;

fn boundary_re() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    // A sentence ends at `.`, `!` or `?` followed by whitespace.
    RE.get_or_init(|| Regex::new(r"[.!?]\s+").expect("sentence boundary regex"))
}

/// First `limit` sentences of `text`, terminal punctuation kept, the
/// inter-sentence whitespace dropped.
fn first_sentences(text: &str, limit: usize) -> Vec<&str> {
    let mut out = Vec::with_capacity(limit);
    let mut rest_start = 0usize;
    for m in boundary_re().find_iter(text) {
        if out.len() == limit {
            return out;
        }
        // The boundary match begins on the (single-byte) punctuation char.
        out.push(&text[rest_start..m.start() + 1]);
        rest_start = m.end();
    }
    if out.len() < limit && rest_start < text.len() {
        out.push(&text[rest_start..]);
    }
    out
}

/// Bounded extract: first three sentences, hard-capped at `max_chars`
/// characters plus a trailing `"..."` when truncated.
pub fn summarize(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let summary = first_sentences(trimmed, MAX_SENTENCES).join(" ");
    if summary.chars().count() > max_chars {
        let mut cut: String = summary.chars().take(max_chars).collect();
        let kept = cut.trim_end().len();
        cut.truncate(kept);
        cut.push_str("...");
        return cut;
    }
    summary
}

/// Final notification text for one entry: the extract, optionally followed
/// by up to two related titles. Falls back to the bare extract whenever the
/// context is empty, titleless, or over budget.
pub fn compose(entry: &Entry, context: &[&HistoryRecord]) -> String {
    let base = summarize(&entry.raw_body, SUMMARY_MAX_CHARS);
    if context.is_empty() {
        return base;
    }
    let titles: Vec<&str> = context
        .iter()
        .map(|r| r.title.as_str())
        .filter(|t| !t.is_empty())
        .take(MAX_CONTEXT_TITLES)
        .collect();
    if titles.is_empty() {
        return base;
    }
    let suffix = format!("Related to: {}", titles.join("; "));
    if base.chars().count() + suffix.chars().count() + 3 < COMPOSE_BUDGET {
        format!("{base} | {suffix}")
    } else {
        base
    }
}
