use crate::aggregators::weekly_window::WeeklyWindowBuilder;
use crate::config::FeedConfig;
use crate::types::{DateAnchor, DigestError, DigestFeed, DigestPayloadSource, DigestRecord, FeedEntry, Result, Window};
use crate::utils;
use chrono::{DateTime, NaiveDate, Utc};
use futures::stream::{self, StreamExt};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Separator between bouquets inside an entry description.
pub const LINE_BREAK_ENTITY: &str = "&#10;";

/// Turns a window and its bouquets into a feed entry for one user.
#[derive(Debug, Clone)]
pub struct EntryFormatter {
    user_url: String,
    user: String,
    anchor: DateAnchor,
}

impl EntryFormatter {
    /// Fails when `site_url` cannot carry a path (e.g. `mailto:`).
    pub fn new(site_url: &str, user: &str) -> Result<Self> {
        Ok(Self {
            user_url: user_page_url(site_url, user)?,
            user: user.to_string(),
            anchor: DateAnchor::default(),
        })
    }

    pub fn with_anchor(mut self, anchor: DateAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Date behind the entry's url, guid and publish date.
    pub fn identifying_date(&self, window: &Window) -> NaiveDate {
        match self.anchor {
            DateAnchor::WindowStart => window.start,
            DateAnchor::WindowEnd => window.end,
        }
    }

    /// `{site}/user/{user}`, user percent-encoded
    pub fn user_url(&self) -> &str {
        &self.user_url
    }

    pub fn entry_url(&self, window: &Window) -> String {
        format!(
            "{}/{}",
            self.user_url,
            utils::time::iso_timestamp(self.identifying_date(window))
        )
    }

    pub fn format(&self, window: &Window, payload: &[DigestRecord]) -> FeedEntry {
        let url = self.entry_url(window);
        FeedEntry {
            title: format!(
                "@{}'s weekly bouquet - {} - {}",
                self.user,
                utils::time::human_date(window.start),
                utils::time::human_date(window.end)
            ),
            description_html: render_description(payload),
            guid: url.clone(),
            url,
            author: self.user.clone(),
            date: utils::time::midnight_utc(self.identifying_date(window)),
        }
    }
}

fn user_page_url(site_url: &str, user: &str) -> Result<String> {
    let mut url = Url::parse(site_url)?;
    url.path_segments_mut()
        .map_err(|_| DigestError::Config(format!("site url {} cannot be a base", site_url)))?
        .pop_if_empty()
        .extend(["user", user]);
    Ok(url.into())
}

fn feed_self_url(api_base_url: &str, user: &str) -> Result<String> {
    let mut url = Url::parse(&utils::url::join_path(api_base_url, "api/weeklyDigestRss"))?;
    url.query_pairs_mut().append_pair("user", user);
    Ok(url.into())
}

/// `"{emoji} {description}"` per bouquet, both escaped, in payload order.
pub fn render_description(payload: &[DigestRecord]) -> String {
    payload
        .iter()
        .map(|record| {
            format!(
                "{} {}",
                utils::html::escape(&record.emoji),
                utils::html::escape(&record.description)
            )
        })
        .collect::<Vec<_>>()
        .join(LINE_BREAK_ENTITY)
}

/// Fetches each window's bouquets and keeps the non-empty ones as entries.
#[derive(Debug, Clone)]
pub struct DigestBuilder {
    fetch_timeout: Duration,
    concurrency: usize,
}

impl DigestBuilder {
    pub fn new(fetch_timeout: Duration, concurrency: usize) -> Self {
        Self {
            fetch_timeout,
            concurrency: concurrency.max(1),
        }
    }

    pub fn from_config(config: &FeedConfig) -> Self {
        Self::new(Duration::from_secs(config.fetch_timeout_seconds), config.fetch_concurrency)
    }

    /// One window's fetch under the configured timeout.
    pub async fn fetch_window<Fut>(&self, fetch: Fut) -> Result<Vec<DigestRecord>>
    where
        Fut: Future<Output = anyhow::Result<Vec<DigestRecord>>>,
    {
        match tokio::time::timeout(self.fetch_timeout, fetch).await {
            Ok(payload) => Ok(payload?),
            Err(_) => Err(DigestError::Timeout(self.fetch_timeout)),
        }
    }

    /// Entries in ascending window order.
    ///
    /// A fetch that errors or exceeds the timeout only loses its own window;
    /// an empty payload yields no entry.
    pub async fn build_entries<F, Fut, G>(&self, windows: &[Window], fetch_payload: F, format_entry: G) -> Vec<FeedEntry>
    where
        F: Fn(Window) -> Fut,
        Fut: Future<Output = anyhow::Result<Vec<DigestRecord>>>,
        G: Fn(&Window, &[DigestRecord]) -> FeedEntry,
    {
        let mut fetched: Vec<(Window, Option<Vec<DigestRecord>>)> = stream::iter(windows.iter().copied())
            .map(|window| {
                let fetch = self.fetch_window(fetch_payload(window));
                async move {
                    let payload = match fetch.await {
                        Ok(payload) => Some(payload),
                        Err(e) => {
                            warn!("Error fetching weekly digest for window {}: {:#}", window.index, e);
                            None
                        }
                    };
                    (window, payload)
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        fetched.sort_by_key(|(window, _)| window.index);

        let mut entries = Vec::new();
        let mut failed = 0;
        for (window, payload) in fetched {
            match payload {
                None => failed += 1,
                Some(payload) if payload.is_empty() => {
                    debug!("Window {} ({} - {}) is empty, skipping", window.index, window.start, window.end);
                }
                Some(payload) => entries.push(format_entry(&window, &payload)),
            }
        }

        info!(
            "Built {} entries from {} windows ({} failed)",
            entries.len(),
            windows.len(),
            failed
        );
        entries
    }

    pub async fn build_user_entries(
        &self,
        windows: &[Window],
        source: &dyn DigestPayloadSource,
        formatter: &EntryFormatter,
        user: &str,
    ) -> Vec<FeedEntry> {
        self.build_entries(
            windows,
            |window| async move { source.fetch(user, window.start, window.end).await },
            |window, payload| formatter.format(window, payload),
        )
        .await
    }
}

/// A user's weekly bouquet feed, assembled from a digest source.
pub struct WeeklyDigest {
    config: FeedConfig,
    windows: WeeklyWindowBuilder,
    builder: DigestBuilder,
    source: Arc<dyn DigestPayloadSource>,
}

impl WeeklyDigest {
    pub fn new(config: FeedConfig, source: Arc<dyn DigestPayloadSource>) -> Self {
        let windows = WeeklyWindowBuilder::new(config.epoch);
        let builder = DigestBuilder::from_config(&config);
        Self {
            config,
            windows,
            builder,
            source,
        }
    }

    pub fn with_windows(mut self, windows: WeeklyWindowBuilder) -> Self {
        self.windows = windows;
        self
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    pub async fn build_feed(&self, user: &str, now: DateTime<Utc>) -> Result<DigestFeed> {
        let windows = self.windows.build(now)?;
        info!("Building weekly digest for {} over {} windows", user, windows.len());

        let formatter = EntryFormatter::new(&self.config.site_url, user)?.with_anchor(self.config.date_anchor);
        let entries = self
            .builder
            .build_user_entries(&windows, self.source.as_ref(), &formatter, user)
            .await;

        Ok(DigestFeed {
            user: user.to_string(),
            title: format!("{}'s weekly bouquet", user),
            description: "A weekly digest of bouquets".to_string(),
            site_url: formatter.user_url().to_string(),
            feed_url: feed_self_url(&self.config.api_base_url, user)?,
            pub_date: now,
            entries,
        })
    }
}
