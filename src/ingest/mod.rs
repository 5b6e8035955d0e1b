// src/ingest/mod.rs
pub mod rss;
pub mod types;

use crate::ingest::types::{Entry, FeedSource};
use metrics::{counter, describe_counter, describe_gauge, describe_histogram};
use once_cell::sync::OnceCell;

/// One-time metrics registration.
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("feed_items_total", "Total items parsed from feed sources.");
        describe_counter!("feed_source_errors_total", "Feed fetch/parse errors.");
        describe_counter!("digest_delivered_total", "Notifications delivered to the sink.");
        describe_counter!(
            "digest_delivery_failures_total",
            "Sink failures; entries stay unseen for retry."
        );
        describe_histogram!("feed_parse_ms", "Feed parse time in milliseconds.");
        describe_gauge!("digest_last_run_ts", "Unix ts when the last run finished.");
    });
}

/// Normalize feed text: decode HTML entities, strip tags, collapse
/// whitespace. Sentence punctuation is kept intact because the summarizer splits
/// on it.
pub fn normalize_text(s: &str) -> String {
    // 1) HTML entity decode
    let mut out = html_escape::decode_html_entities(s).to_string();

    // 2) Strip HTML tags
    static RE_TAGS: OnceCell<regex::Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, " ").to_string();

    // 3) Collapse whitespace
    static RE_WS: OnceCell<regex::Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").to_string();

    out.trim().to_string()
}

/// Fetch every configured source and normalize the results into entries.
/// A failing source logs a warning and contributes nothing; it never aborts
/// the other sources.
pub async fn fetch_all(sources: &[Box<dyn FeedSource>]) -> Vec<Entry> {
    ensure_metrics_described();

    let mut entries = Vec::new();
    for source in sources {
        match source.fetch_latest().await {
            Ok(items) => {
                for mut raw in items {
                    // Normalization happens before id derivation and is
                    // deterministic, so ids stay stable across fetches.
                    raw.title = raw.title.map(|t| normalize_text(&t));
                    raw.summary = raw.summary.map(|s| normalize_text(&s));
                    entries.push(Entry::from_raw(raw));
                }
            }
            Err(e) => {
                tracing::warn!(error = ?e, source = source.name(), "feed source error");
                counter!("feed_source_errors_total").increment(1);
            }
        }
    }
    entries
}
