use crate::config::FeedConfig;
use crate::types::{DigestError, DigestPayloadSource, DigestRecord, Result};
use crate::utils;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

/// Reads weekly bouquets from the remote `getWeeklyDigest` endpoint.
pub struct HttpDigestSource {
    client: Client,
    api_base_url: String,
    max_payload_size_mb: usize,
}

impl HttpDigestSource {
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.fetch_timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            api_base_url: config.api_base_url.clone(),
            max_payload_size_mb: config.max_payload_size_mb,
        })
    }

    pub fn digest_url(&self, user: &str, start: NaiveDate, end: NaiveDate) -> Result<Url> {
        let endpoint = utils::url::join_path(&self.api_base_url, "api/getWeeklyDigest");
        let url = Url::parse_with_params(
            &endpoint,
            &[
                ("user", user.to_string()),
                ("startDate", utils::time::iso_timestamp(start)),
                ("endDate", utils::time::iso_timestamp(end)),
            ],
        )?;
        Ok(url)
    }

    /// One request, no retries. A non-2xx status or a body that is not a
    /// JSON array of `{emoji, description}` is an error.
    pub async fn fetch_digest(&self, user: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<DigestRecord>> {
        let url = self.digest_url(user, start, end)?;
        let start_time = Instant::now();

        debug!("Fetching weekly digest: {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("Digest request {} returned {}", url, status);
            return Err(DigestError::RemoteStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        if let Some(content_length) = response.content_length() {
            let size_mb = content_length as usize / (1024 * 1024);
            if size_mb > self.max_payload_size_mb {
                return Err(DigestError::RemoteFormat(format!("payload too large: {}MB", size_mb)));
            }
        }

        let body = response.text().await?;
        let records: Vec<DigestRecord> = serde_json::from_str(&body)
            .map_err(|e| DigestError::RemoteFormat(format!("{} from {}", e, url)))?;

        info!(
            "Fetched {} bouquets for {} ({} - {}) in {}ms",
            records.len(),
            user,
            start,
            end,
            start_time.elapsed().as_millis()
        );
        Ok(records)
    }
}

#[async_trait]
impl DigestPayloadSource for HttpDigestSource {
    async fn fetch(&self, user: &str, start: NaiveDate, end: NaiveDate) -> anyhow::Result<Vec<DigestRecord>> {
        Ok(self.fetch_digest(user, start, end).await?)
    }
}
