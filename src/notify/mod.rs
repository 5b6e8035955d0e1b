// src/notify/mod.rs
pub mod telegram;

use anyhow::Result;

/// What gets delivered for one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub summary: String,
    pub link: String,
}

impl Notification {
    /// `Title:` / `Summary:` / `Link:` blocks separated by blank lines;
    /// empty parts drop out entirely.
    pub fn render(&self) -> String {
        let mut blocks = Vec::with_capacity(3);
        if !self.title.is_empty() {
            blocks.push(format!("Title: {}", self.title));
        }
        if !self.summary.is_empty() {
            blocks.push(format!("Summary: {}", self.summary));
        }
        if !self.link.is_empty() {
            blocks.push(format!("Link: {}", self.link));
        }
        blocks.join("\n\n")
    }
}

#[async_trait::async_trait]
pub trait MessageSink: Send + Sync {
    async fn send(&self, note: &Notification) -> Result<()>;
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_includes_all_parts() {
        let n = Notification {
            title: "T".into(),
            summary: "S".into(),
            link: "https://example.test".into(),
        };
        assert_eq!(
            n.render(),
            "Title: T\n\nSummary: S\n\nLink: https://example.test"
        );
    }

    #[test]
    fn render_skips_empty_parts() {
        let n = Notification {
            title: String::new(),
            summary: "S".into(),
            link: String::new(),
        };
        assert_eq!(n.render(), "Summary: S");
    }
}
