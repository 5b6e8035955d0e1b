// tests/context_suffix.rs
// A pre-populated ledger lends context to a lexically similar new entry.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use rss_digest::{Entry, FeedSource, Ledger, MessageSink, Notification, RawItem, Scheduler};

struct StaticSource(Vec<RawItem>);

#[async_trait]
impl FeedSource for StaticSource {
    async fn fetch_latest(&self) -> Result<Vec<RawItem>> {
        Ok(self.0.clone())
    }
    fn name(&self) -> &str {
        "static"
    }
}

#[derive(Clone, Default)]
struct RecordingSink {
    sent: Arc<Mutex<Vec<Notification>>>,
}

#[async_trait]
impl MessageSink for RecordingSink {
    async fn send(&self, note: &Notification) -> Result<()> {
        self.sent.lock().unwrap().push(note.clone());
        Ok(())
    }
    fn name(&self) -> &'static str {
        "recording"
    }
}

#[tokio::test]
async fn overlapping_entry_gets_related_to_suffix() {
    let mut ledger = Ledger::default();
    ledger.record(
        &Entry {
            id: "old".into(),
            title: "Cats are great".into(),
            link: String::new(),
            raw_body: String::new(),
            published: "2024-01-01".into(),
        },
        "Cats are great. They purr.",
        "2024-01-01T00:00:00Z",
    );

    let new_item = RawItem {
        guid: Some("new".into()),
        title: Some("Cats are wonderful pets".into()),
        link: None,
        summary: Some("Cats purr and are great companions. They nap a lot.".into()),
        published: Some("2024-01-02".into()),
    };

    let sink = RecordingSink::default();
    let scheduler = Scheduler::new(
        vec![Box::new(StaticSource(vec![new_item])) as Box<dyn FeedSource>],
        Box::new(sink.clone()),
        5,
    );
    let report = scheduler.run_once(&mut ledger).await;
    assert_eq!(report.delivered, 1);

    let sent = sink.sent.lock().unwrap();
    assert!(
        sent[0].summary.contains("Related to: Cats are great"),
        "got: {}",
        sent[0].summary
    );

    // the recorded summary is the composed one, suffix included
    let newest = ledger.history().last().unwrap();
    assert_eq!(newest.id, "new");
    assert!(newest.summary.contains("Related to: Cats are great"));
}

#[tokio::test]
async fn unrelated_entry_goes_out_without_suffix() {
    let mut ledger = Ledger::default();
    ledger.record(
        &Entry {
            id: "old".into(),
            title: "Cats are great".into(),
            link: String::new(),
            raw_body: String::new(),
            published: "2024-01-01".into(),
        },
        "Cats are great. They purr.",
        "2024-01-01T00:00:00Z",
    );

    let new_item = RawItem {
        guid: Some("new".into()),
        title: Some("Volcano erupts overnight".into()),
        link: None,
        summary: Some("Lava flows reached nearby villages.".into()),
        published: Some("2024-01-02".into()),
    };

    let sink = RecordingSink::default();
    let scheduler = Scheduler::new(
        vec![Box::new(StaticSource(vec![new_item])) as Box<dyn FeedSource>],
        Box::new(sink.clone()),
        5,
    );
    scheduler.run_once(&mut ledger).await;

    let sent = sink.sent.lock().unwrap();
    assert_eq!(sent[0].summary, "Lava flows reached nearby villages.");
}
