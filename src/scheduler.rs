// src/scheduler.rs
//! Drives one delivery run: fetch everything, filter against the ledger,
//! order, then summarize-and-deliver entry by entry up to the per-run cap.
//! The ledger is mutated in memory only; the caller persists it once after
//! the run.

use metrics::{counter, gauge};
use tracing::{info, warn};

use crate::context::{select_context, CONTEXT_TOP_K};
use crate::ingest::types::{Entry, FeedSource};
use crate::ingest::{ensure_metrics_described, fetch_all};
use crate::ledger::Ledger;
use crate::notify::{MessageSink, Notification};
use crate::summary::compose;
use crate::text::anon_hash;

/// Counts for one run; `fetched` is pre-dedup, `unseen` post-dedup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub fetched: usize,
    pub unseen: usize,
    pub delivered: usize,
    pub failed: usize,
}

pub struct Scheduler {
    sources: Vec<Box<dyn FeedSource>>,
    sink: Box<dyn MessageSink>,
    max_per_run: usize,
}

impl Scheduler {
    pub fn new(
        sources: Vec<Box<dyn FeedSource>>,
        sink: Box<dyn MessageSink>,
        max_per_run: usize,
    ) -> Self {
        Self {
            sources,
            sink,
            max_per_run,
        }
    }

    /// One run. A sink failure leaves the entry unseen (it is retried and
    /// re-scored on the next run) and moves on to the next entry; it never
    /// aborts the loop. Entries left over once the cap is hit stay unseen
    /// the same way.
    pub async fn run_once(&self, ledger: &mut Ledger) -> RunReport {
        ensure_metrics_described();

        let entries = fetch_all(&self.sources).await;
        let fetched = entries.len();

        let mut unseen: Vec<Entry> = entries
            .into_iter()
            .filter(|e| ledger.is_new(&e.id))
            .collect();
        // Lexical comparison on the raw `published` string, newest first.
        // The sort is stable: equal or missing timestamps keep fetch order.
        unseen.sort_by(|a, b| b.published.cmp(&a.published));

        let mut report = RunReport {
            fetched,
            unseen: unseen.len(),
            ..RunReport::default()
        };

        for entry in &unseen {
            if report.delivered >= self.max_per_run {
                break;
            }

            let context = select_context(entry, ledger.history(), CONTEXT_TOP_K);
            let context_len = context.len();
            let summary = compose(entry, &context);
            let note = Notification {
                title: entry.title.trim().to_string(),
                summary: summary.clone(),
                link: entry.link.trim().to_string(),
            };

            match self.sink.send(&note).await {
                Ok(()) => {
                    let sent_at = chrono::Utc::now().to_rfc3339();
                    ledger.record(entry, &summary, &sent_at);
                    report.delivered += 1;
                    counter!("digest_delivered_total").increment(1);
                    info!(
                        target: "digest",
                        id = %anon_hash(&entry.id),
                        sink = self.sink.name(),
                        context = context_len,
                        "delivered"
                    );
                }
                Err(e) => {
                    report.failed += 1;
                    counter!("digest_delivery_failures_total").increment(1);
                    warn!(
                        target: "digest",
                        id = %anon_hash(&entry.id),
                        sink = self.sink.name(),
                        error = ?e,
                        "delivery failed; entry stays unseen for retry"
                    );
                }
            }
        }

        gauge!("digest_last_run_ts").set(chrono::Utc::now().timestamp().max(0) as f64);
        info!(
            target: "digest",
            fetched = report.fetched,
            unseen = report.unseen,
            delivered = report.delivered,
            failed = report.failed,
            "run finished"
        );
        report
    }
}
