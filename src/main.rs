//! RSS Digest — Binary Entrypoint
//! One-shot scheduled job: fetch feeds, deliver context-aware summaries for
//! unseen entries, persist the ledger. Exit 0 whether or not anything new
//! was delivered.

use anyhow::{bail, Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rss_digest::config::RunConfig;
use rss_digest::ingest::rss::RssFeedSource;
use rss_digest::ingest::types::FeedSource;
use rss_digest::ledger::Ledger;
use rss_digest::notify::telegram::TelegramNotifier;
use rss_digest::notify::MessageSink;
use rss_digest::scheduler::Scheduler;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = RunConfig::load().context("loading run configuration")?;
    let Some(telegram) = config.telegram.clone() else {
        bail!("TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID must both be set");
    };

    let sources: Vec<Box<dyn FeedSource>> = config
        .feed_urls
        .iter()
        .map(|url| Box::new(RssFeedSource::from_url(url.clone())) as Box<dyn FeedSource>)
        .collect();
    let sink: Box<dyn MessageSink> =
        Box::new(TelegramNotifier::new(telegram.bot_token, telegram.chat_id));

    // Loaded once per process; persisted exactly once, after the run.
    let mut ledger = Ledger::load(&config.ledger_path).context("loading ledger")?;

    let scheduler = Scheduler::new(sources, sink, config.max_per_run);
    let report = scheduler.run_once(&mut ledger).await;

    ledger.save(&config.ledger_path).context("saving ledger")?;

    tracing::info!(
        delivered = report.delivered,
        failed = report.failed,
        seen_total = ledger.seen_count(),
        "done"
    );
    Ok(())
}
