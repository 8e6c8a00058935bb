use crate::aggregators::recency::{FALLBACK_EMOJIS, PLACEHOLDER_EMOJI};
use crate::types::{DateAnchor, DigestError, Result};
use crate::utils;
use chrono::NaiveDate;
use std::env;
use tracing::debug;

/// Day the first weekly window starts.
pub fn default_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 3, 4).unwrap_or_default()
}

#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Base of the API serving weekly digests and the feed itself
    pub api_base_url: String,
    /// Base of the public site, used for entry links
    pub site_url: String,
    pub epoch: NaiveDate,
    pub date_anchor: DateAnchor,
    pub user_agent: String,
    pub fetch_timeout_seconds: u64,
    pub fetch_concurrency: usize,
    pub max_payload_size_mb: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            site_url: "http://localhost:3000".to_string(),
            epoch: default_epoch(),
            date_anchor: DateAnchor::WindowEnd,
            user_agent: "Bouquet-Digest/1.0".to_string(),
            fetch_timeout_seconds: 10,
            fetch_concurrency: 1,
            max_payload_size_mb: 5,
        }
    }
}

impl FeedConfig {
    /// Defaults overridden by `API_BASE_URL`, `SITE_URL`, `DIGEST_EPOCH`,
    /// `DIGEST_FETCH_TIMEOUT_SECONDS` and `DIGEST_FETCH_CONCURRENCY`.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = env::var("API_BASE_URL") {
            config.api_base_url = url;
        }
        if let Ok(url) = env::var("SITE_URL") {
            config.site_url = url;
        }
        if let Ok(epoch) = env::var("DIGEST_EPOCH") {
            config.epoch = utils::time::parse_date(&epoch)
                .ok_or_else(|| DigestError::Config(format!("DIGEST_EPOCH is not a YYYY-MM-DD date: {}", epoch)))?;
        }
        if let Ok(timeout) = env::var("DIGEST_FETCH_TIMEOUT_SECONDS") {
            config.fetch_timeout_seconds = timeout
                .parse()
                .map_err(|_| DigestError::Config(format!("DIGEST_FETCH_TIMEOUT_SECONDS is not a number: {}", timeout)))?;
        }
        if let Ok(concurrency) = env::var("DIGEST_FETCH_CONCURRENCY") {
            config.fetch_concurrency = concurrency
                .parse()
                .map_err(|_| DigestError::Config(format!("DIGEST_FETCH_CONCURRENCY is not a number: {}", concurrency)))?;
        }

        config.validate()?;
        debug!("Loaded feed config: {:?}", config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("api_base_url", &self.api_base_url), ("site_url", &self.site_url)] {
            if !utils::url::is_valid_base_url(value) {
                return Err(DigestError::Config(format!("{} must be an http(s) URL, got {}", name, value)));
            }
        }
        if self.fetch_concurrency == 0 {
            return Err(DigestError::Config("fetch_concurrency must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct PickerConfig {
    /// Emojis returned when the caller does not ask for a count
    pub limit: usize,
    /// Records requested from each ranked source
    pub per_source_limit: usize,
    pub placeholder: String,
    pub fallback: Vec<String>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            limit: 12,
            per_source_limit: 200,
            placeholder: PLACEHOLDER_EMOJI.to_string(),
            fallback: FALLBACK_EMOJIS.iter().map(|e| e.to_string()).collect(),
        }
    }
}
