use crate::aggregators::recency::aggregate;
use crate::config::PickerConfig;
use crate::types::RankedEmojiSource;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Suggests recently used emojis, most preferred first.
pub struct EmojiPicker {
    config: PickerConfig,
    sources: Vec<Arc<dyn RankedEmojiSource>>,
}

impl EmojiPicker {
    pub fn new(config: PickerConfig) -> Self {
        Self {
            config,
            sources: Vec::new(),
        }
    }

    /// Sources are consulted in the order they are added.
    pub fn add_source(&mut self, source: Arc<dyn RankedEmojiSource>) {
        info!("Adding emoji source: {}", source.source_name());
        self.sources.push(source);
    }

    pub fn with_source(mut self, source: Arc<dyn RankedEmojiSource>) -> Self {
        self.add_source(source);
        self
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// Never fails: an unreachable source contributes nothing and the
    /// fallback set fills the gap.
    pub async fn common_emojis(&self, limit: Option<usize>) -> Vec<String> {
        let limit = limit.unwrap_or(self.config.limit);
        if limit == 0 {
            return Vec::new();
        }

        let mut histories: Vec<Vec<String>> = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            match source.fetch_recent(self.config.per_source_limit).await {
                Ok(records) => {
                    debug!("Found {} emojis from {}", records.len(), source.source_name());
                    histories.push(records.into_iter().map(|record| record.emoji).collect());
                }
                Err(e) => {
                    warn!("Emoji source {} unavailable, skipping: {:#}", source.source_name(), e);
                }
            }
        }

        let excluded: HashSet<String> = HashSet::from([self.config.placeholder.clone()]);
        let emojis = aggregate(histories.as_slice(), &excluded, self.config.fallback.as_slice(), limit);

        info!("Returning {} unique emojis", emojis.len());
        emojis
    }
}
