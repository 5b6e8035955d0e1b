// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod config;
pub mod context;
pub mod ingest;
pub mod ledger;
pub mod notify;
pub mod scheduler;
pub mod summary;
pub mod text;

// ---- Re-exports for stable public API ----
pub use crate::ingest::types::{Entry, FeedSource, RawItem};
pub use crate::ledger::{HistoryRecord, Ledger};
pub use crate::notify::{MessageSink, Notification};
pub use crate::scheduler::{RunReport, Scheduler};
