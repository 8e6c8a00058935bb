use async_trait::async_trait;
use chrono::NaiveDate;

use crate::defs::DigestPayloadSource;
use crate::defs::DigestRecord;
use crate::defs::EmojiRecord;
use crate::defs::RankedEmojiSource;

pub struct EmptySource;

#[async_trait]
impl RankedEmojiSource for EmptySource {
    fn source_name(&self) -> String {
        "empty".to_owned()
    }

    async fn fetch_recent(&self, _limit: usize) -> anyhow::Result<Vec<EmojiRecord>> {
        // Nothing was ever posted.
        Ok(vec![])
    }
}

#[async_trait]
impl DigestPayloadSource for EmptySource {
    async fn fetch(&self, _user: &str, _start: NaiveDate, _end: NaiveDate) -> anyhow::Result<Vec<DigestRecord>> {
        Ok(vec![])
    }
}
