// src/config.rs
//! Run configuration: optional TOML file, then env-var overrides. The
//! scheduler never reads the environment itself; everything arrives through
//! `RunConfig`.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG_PATH: &str = "DIGEST_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config/digest.toml";

pub const ENV_FEEDS: &str = "RSS_FEEDS";
pub const ENV_MAX_MESSAGES: &str = "MAX_MESSAGES";
pub const ENV_LEDGER_PATH: &str = "STATE_FILE";
pub const ENV_TELEGRAM_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const ENV_TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

pub const DEFAULT_FEEDS: &[&str] = &[
    "https://rss.nytimes.com/services/xml/rss/nyt/World.xml",
    "https://feeds.bbci.co.uk/news/world/rss.xml",
];
pub const DEFAULT_MAX_PER_RUN: usize = 5;
pub const DEFAULT_LEDGER_PATH: &str = "rss_state.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramCreds {
    pub bot_token: String,
    pub chat_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub feed_urls: Vec<String>,
    pub max_per_run: usize,
    pub ledger_path: PathBuf,
    pub telegram: Option<TelegramCreds>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            feed_urls: DEFAULT_FEEDS.iter().map(|s| s.to_string()).collect(),
            max_per_run: DEFAULT_MAX_PER_RUN,
            ledger_path: PathBuf::from(DEFAULT_LEDGER_PATH),
            telegram: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    feeds: Vec<String>,
    max_per_run: Option<usize>,
    ledger_path: Option<String>,
}

impl RunConfig {
    /// Defaults, overlaid with the TOML file (if any), overlaid with env
    /// vars. `$DIGEST_CONFIG_PATH` pointing at a missing file is an error;
    /// the default path simply being absent is not.
    pub fn load() -> Result<RunConfig> {
        let mut cfg = RunConfig::default();

        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            cfg.apply_file(&pb)?;
        } else {
            let pb = PathBuf::from(DEFAULT_CONFIG_PATH);
            if pb.exists() {
                cfg.apply_file(&pb)?;
            }
        }

        cfg.apply_env()?;
        Ok(cfg)
    }

    fn apply_file(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let file: FileConfig = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;

        let feeds = clean_list(file.feeds);
        if !feeds.is_empty() {
            self.feed_urls = feeds;
        }
        if let Some(n) = file.max_per_run {
            self.max_per_run = n;
        }
        if let Some(p) = file.ledger_path {
            self.ledger_path = PathBuf::from(p);
        }
        Ok(())
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(raw) = std::env::var(ENV_FEEDS) {
            let feeds = clean_list(raw.split_whitespace().map(str::to_string).collect());
            if !feeds.is_empty() {
                self.feed_urls = feeds;
            }
        }
        if let Ok(raw) = std::env::var(ENV_MAX_MESSAGES) {
            self.max_per_run = raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("{ENV_MAX_MESSAGES}={raw} is not a count"))?;
        }
        if let Ok(p) = std::env::var(ENV_LEDGER_PATH) {
            self.ledger_path = PathBuf::from(p);
        }
        if let (Ok(token), Ok(chat_id)) = (
            std::env::var(ENV_TELEGRAM_TOKEN),
            std::env::var(ENV_TELEGRAM_CHAT_ID),
        ) {
            if !token.is_empty() && !chat_id.is_empty() {
                self.telegram = Some(TelegramCreds {
                    bot_token: token,
                    chat_id,
                });
            }
        }
        Ok(())
    }
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim();
        if !t.is_empty() && !out.iter().any(|o| o == t) {
            out.push(t.to_string());
        }
    }
    out
}
