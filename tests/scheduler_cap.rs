// tests/scheduler_cap.rs
// Per-run delivery cap and ordering: newest-by-string `published` first,
// leftovers stay unseen for the next run.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use rss_digest::{FeedSource, Ledger, MessageSink, Notification, RawItem, Scheduler};

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

fn item(id: &str, title: &str, published: &str) -> RawItem {
    RawItem {
        guid: Some(id.into()),
        title: Some(title.into()),
        link: None,
        summary: Some(format!("{title} happened today.")),
        published: Some(published.into()),
    }
}

#[tokio::test]
async fn cap_delivers_only_the_most_recent() {
    let items = vec![
        item("a", "Oldest", "2024-01-01"),
        item("b", "Middle", "2024-01-02"),
        item("c", "Newest", "2024-01-03"),
    ];
    let sink = RecordingSink::default();
    let sources: Vec<Box<dyn FeedSource>> = vec![Box::new(StaticSource(items))];
    let scheduler = Scheduler::new(sources, Box::new(sink.clone()), 2);
    let mut ledger = Ledger::default();

    let report = scheduler.run_once(&mut ledger).await;

    assert_eq!(report.unseen, 3);
    assert_eq!(report.delivered, 2);

    let sent = sink.sent.lock().unwrap();
    let titles: Vec<_> = sent.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["Newest", "Middle"]);

    assert!(!ledger.is_new("c"));
    assert!(!ledger.is_new("b"));
    assert!(ledger.is_new("a"), "the capped-out entry must stay unseen");
}

#[tokio::test]
async fn capped_out_entry_goes_on_the_next_run() {
    let items = vec![
        item("a", "Oldest", "2024-01-01"),
        item("b", "Middle", "2024-01-02"),
        item("c", "Newest", "2024-01-03"),
    ];
    let sink = RecordingSink::default();
    let mut ledger = Ledger::default();

    let first = Scheduler::new(
        vec![Box::new(StaticSource(items.clone())) as Box<dyn FeedSource>],
        Box::new(sink.clone()),
        2,
    );
    first.run_once(&mut ledger).await;

    let second = Scheduler::new(
        vec![Box::new(StaticSource(items)) as Box<dyn FeedSource>],
        Box::new(sink.clone()),
        2,
    );
    let report = second.run_once(&mut ledger).await;

    assert_eq!(report.unseen, 1);
    assert_eq!(report.delivered, 1);
    assert!(!ledger.is_new("a"));
    assert_eq!(ledger.history().len(), 3);
}

#[tokio::test]
async fn equal_published_keeps_fetch_order() {
    let items = vec![
        item("x", "First in feed", "2024-01-01"),
        item("y", "Second in feed", "2024-01-01"),
    ];
    let sink = RecordingSink::default();
    let scheduler = Scheduler::new(
        vec![Box::new(StaticSource(items)) as Box<dyn FeedSource>],
        Box::new(sink.clone()),
        5,
    );
    let mut ledger = Ledger::default();
    scheduler.run_once(&mut ledger).await;

    let sent = sink.sent.lock().unwrap();
    let titles: Vec<_> = sent.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["First in feed", "Second in feed"]);
}
