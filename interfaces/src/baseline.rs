use async_trait::async_trait;
use chrono::NaiveDate;

use crate::defs::DigestPayloadSource;
use crate::defs::DigestRecord;
use crate::defs::EmojiRecord;
use crate::defs::RankedEmojiSource;

/// In-memory ranked history, most recent first.
pub struct StaticEmojiSource {
    name: String,
    emojis: Vec<String>,
}

impl StaticEmojiSource {
    pub fn new(name: &str, emojis: &[&str]) -> Self {
        Self {
            name: name.to_owned(),
            emojis: emojis.iter().map(|e| (*e).to_owned()).collect(),
        }
    }

    pub fn from_vec(name: String, emojis: Vec<String>) -> Self {
        Self { name, emojis }
    }
}

#[async_trait]
impl RankedEmojiSource for StaticEmojiSource {
    fn source_name(&self) -> String {
        self.name.clone()
    }

    async fn fetch_recent(&self, limit: usize) -> anyhow::Result<Vec<EmojiRecord>> {
        Ok(self
            .emojis
            .iter()
            .take(limit)
            .map(|emoji| EmojiRecord { emoji: emoji.clone() })
            .collect())
    }
}

/// Dated bouquets for any number of users, kept in posting order.
#[derive(Default)]
pub struct StaticDigestSource {
    bouquets: Vec<(String, NaiveDate, DigestRecord)>,
}

impl StaticDigestSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bouquet(mut self, user: &str, date: NaiveDate, emoji: &str, description: &str) -> Self {
        self.bouquets.push((
            user.to_owned(),
            date,
            DigestRecord {
                emoji: emoji.to_owned(),
                description: description.to_owned(),
            },
        ));
        self
    }
}

#[async_trait]
impl DigestPayloadSource for StaticDigestSource {
    async fn fetch(&self, user: &str, start: NaiveDate, end: NaiveDate) -> anyhow::Result<Vec<DigestRecord>> {
        Ok(self
            .bouquets
            .iter()
            .filter(|(owner, date, _)| owner == user && *date >= start && *date <= end)
            .map(|(_, _, record)| record.clone())
            .collect())
    }
}
