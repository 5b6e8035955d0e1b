// src/ledger.rs
//! Durable dedup + context state: a set of every id ever delivered plus the
//! append-only history of delivered records. The history doubles as the
//! similarity corpus and the delivery audit log.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::ingest::types::Entry;

/// One processed entry kept for future dedup and context lookups.
/// `summary` is the composed text that was delivered, not the raw feed body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryRecord {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub link: String,
    pub published: String,
    pub sent_at: String,
}

/// Invariant: `seen_ids` contains the id of every history record, and
/// `history` order is delivery order (oldest first). Records are never
/// removed or mutated once appended.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Ledger {
    seen_ids: HashSet<String>,
    #[serde(rename = "articles")]
    history: Vec<HistoryRecord>,
}

impl Ledger {
    /// True when `id` has never been delivered.
    pub fn is_new(&self, id: &str) -> bool {
        !self.seen_ids.contains(id)
    }

    /// Ordered delivery history, oldest first.
    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    pub fn seen_count(&self) -> usize {
        self.seen_ids.len()
    }

    /// Append the record and mark the id seen, in one step.
    ///
    /// Caller contract: at most one call per id per process. The set absorbs
    /// a repeated insert silently, but the paired append would duplicate the
    /// history record.
    pub fn record(&mut self, entry: &Entry, summary: &str, sent_at: &str) {
        self.seen_ids.insert(entry.id.clone());
        self.history.push(HistoryRecord {
            id: entry.id.clone(),
            title: entry.title.clone(),
            summary: summary.to_string(),
            link: entry.link.clone(),
            published: entry.published.clone(),
            sent_at: sent_at.to_string(),
        });
    }

    /// Load persisted state. An absent file is an empty ledger; an unreadable
    /// or corrupt file is a hard error; history is never silently discarded.
    pub fn load(path: &Path) -> Result<Ledger> {
        if !path.exists() {
            return Ok(Ledger::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading ledger from {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("parsing ledger {}", path.display()))
    }

    /// Persist as pretty JSON via write-temp-then-rename, so a crash mid-save
    /// leaves the previous state intact.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("serializing ledger")?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, path)
            .with_context(|| format!("renaming {} into place", tmp.display()))?;
        Ok(())
    }
}
