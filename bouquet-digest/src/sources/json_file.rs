use crate::aggregators::recency::PLACEHOLDER_EMOJI;
use crate::types::{DigestError, EmojiRecord, RankedEmojiSource, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Glyph(String),
    Record { emoji: Option<String> },
}

/// Ranked emoji history exported as a JSON array, most recent first.
///
/// Elements may be bare strings or `{"emoji": ...}` objects; nulls and the
/// placeholder glyph are dropped on read.
pub struct JsonFileEmojiSource {
    path: PathBuf,
}

impl JsonFileEmojiSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self, limit: usize) -> Result<Vec<EmojiRecord>> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let raw: Vec<Option<RawEntry>> = serde_json::from_str(&content)
            .map_err(|e| DigestError::RemoteFormat(format!("{}: {}", self.path.display(), e)))?;

        let records: Vec<EmojiRecord> = raw
            .into_iter()
            .flatten()
            .filter_map(|entry| match entry {
                RawEntry::Glyph(emoji) => Some(emoji),
                RawEntry::Record { emoji } => emoji,
            })
            .map(|emoji| emoji.trim().to_string())
            .filter(|emoji| !emoji.is_empty() && emoji != PLACEHOLDER_EMOJI)
            .take(limit)
            .map(|emoji| EmojiRecord { emoji })
            .collect();

        debug!("Read {} emojis from {}", records.len(), self.path.display());
        Ok(records)
    }
}

#[async_trait]
impl RankedEmojiSource for JsonFileEmojiSource {
    fn source_name(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_recent(&self, limit: usize) -> anyhow::Result<Vec<EmojiRecord>> {
        Ok(self.load(limit).await?)
    }
}
