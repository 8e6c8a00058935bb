use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiRecord {
    pub emoji: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestRecord {
    pub emoji: String,
    pub description: String,
}

// Object style note:
// Implementations of these traits are owned by the storage/web layer and
// handed to the digest core at bootstrap. The core never opens a connection
// itself; it only calls through these methods, once per request.

/// A history of emojis ordered by the source's own notion of recency,
/// most recent first.
#[async_trait]
pub trait RankedEmojiSource: Send + Sync {
    fn source_name(&self) -> String;

    /// Up to `limit` records. Null values and the placeholder glyph are
    /// already filtered out.
    async fn fetch_recent(&self, limit: usize) -> anyhow::Result<Vec<EmojiRecord>>;
}

/// Bouquets a user posted between `start` and `end`, both inclusive.
#[async_trait]
pub trait DigestPayloadSource: Send + Sync {
    async fn fetch(&self, user: &str, start: NaiveDate, end: NaiveDate) -> anyhow::Result<Vec<DigestRecord>>;
}
