// src/ingest/types.rs
use anyhow::Result;

/// One feed item as the wire exposes it; every field is optional there.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct RawItem {
    pub guid: Option<String>,
    pub title: Option<String>,
    pub link: Option<String>,
    pub summary: Option<String>,
    pub published: Option<String>,
}

/// A normalized entry: absent wire fields become empty strings, and the id
/// is derived once so the same underlying item always gets the same id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub id: String,
    pub title: String,
    pub link: String,
    pub raw_body: String,
    pub published: String,
}

impl Entry {
    /// Id derivation chain: feed-supplied guid, else link, else
    /// title+published. An item carrying none of those gets an empty id,
    /// which collides across such items; the wire gives us nothing better.
    pub fn from_raw(raw: RawItem) -> Entry {
        let title = raw.title.unwrap_or_default();
        let link = raw.link.unwrap_or_default();
        let published = raw.published.unwrap_or_default();
        let id = match raw.guid.filter(|g| !g.is_empty()) {
            Some(guid) => guid,
            None if !link.is_empty() => link.clone(),
            None => format!("{title}{published}"),
        };
        Entry {
            id,
            title,
            link,
            raw_body: raw.summary.unwrap_or_default(),
            published,
        }
    }
}

#[async_trait::async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_latest(&self) -> Result<Vec<RawItem>>;
    fn name(&self) -> &str;
}
