use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
// Collaborator contracts live in the interfaces crate
pub use interfaces::defs::{DigestPayloadSource, DigestRecord, EmojiRecord, RankedEmojiSource};

/// A 7-day span of digest activity. `start` and `end` are both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub index: i64,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Which windows `build_windows` should consider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMode {
    /// Every window since the epoch.
    All,
    /// `count` windows starting from the one containing the day
    /// `anchor_days_ago` days before today.
    RecentWindows { count: u32, anchor_days_ago: u32 },
}

/// Date used for an entry's url, guid and publish date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateAnchor {
    WindowStart,
    #[default]
    WindowEnd,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub title: String,
    pub description_html: String,
    pub url: String,
    pub guid: String,
    pub author: String,
    pub date: DateTime<Utc>,
}

/// Channel-level data for a rendered digest feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestFeed {
    pub user: String,
    pub title: String,
    pub description: String,
    pub site_url: String,
    pub feed_url: String,
    pub pub_date: DateTime<Utc>,
    pub entries: Vec<FeedEntry>,
}

#[derive(Debug, thiserror::Error)]
pub enum DigestError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Request to {url} failed with status {status}")]
    RemoteStatus { status: u16, url: String },

    #[error("Malformed payload: {0}")]
    RemoteFormat(String),

    #[error("Fetch timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Source error: {0}")]
    Source(#[from] anyhow::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("General error: {0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, DigestError>;
