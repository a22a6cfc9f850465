// src/fetch/client.rs
use std::time::Duration;

use reqwest::Client;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::Config;
use crate::document::StatsDocument;
use crate::error::Result;

use super::cache::ResponseCache;
use super::urls::{stats_data_url, DataQuery};

const MAX_RETRIES: u32 = 3;
const INITIAL_BACKOFF_MS: u64 = 500;

/// HTTP collaborator for the e-Stat API.
///
/// Fetches and caches raw `getStatsData` payloads; everything after parsing
/// is the transform's business. Construction requires an already-validated
/// [`Config`], so a missing app id fails before any request is built.
#[derive(Debug, Clone)]
pub struct EstatClient {
    http: Client,
    config: Config,
    cache: Option<ResponseCache>,
}

impl EstatClient {
    pub fn new(config: Config) -> Self {
        let cache = config.cache_dir.clone().map(ResponseCache::new);
        Self {
            http: Client::new(),
            config,
            cache,
        }
    }

    /// The request URL for `query` under this client's credentials.
    pub fn url_for(&self, query: &DataQuery) -> Url {
        stats_data_url(&self.config.base_url, &self.config.app_id, query)
    }

    /// Fetch one statistical table, going to the network only when the
    /// cache holds no usable payload for this exact request. A cached
    /// payload that no longer parses is evicted and refetched.
    #[instrument(level = "info", skip(self, query), fields(stats_data_id = %query.stats_data_id))]
    pub async fn get_stats_data(&self, query: &DataQuery) -> Result<StatsDocument> {
        let url = self.url_for(query);

        if let Some(cache) = &self.cache {
            if let Some(body) = cache.load(&url) {
                match StatsDocument::from_json(&body) {
                    Ok(doc) => return Ok(doc),
                    Err(e) => {
                        warn!(error = %e, "cached payload unusable, refetching");
                        cache.evict(&url)?;
                    }
                }
            }
        }

        let body = self.get_with_retry(&url).await?;
        if let Some(cache) = &self.cache {
            cache.store(&url, &body)?;
        }
        let doc = StatsDocument::from_json(&body)?;
        info!(bytes = body.len(), "fetched stats data");
        Ok(doc)
    }

    async fn get_with_retry(&self, url: &Url) -> Result<String> {
        let mut attempts = 0;
        loop {
            match self.get_once(url).await {
                Ok(body) => return Ok(body),
                Err(e) if attempts < MAX_RETRIES => {
                    attempts += 1;
                    let backoff = INITIAL_BACKOFF_MS * 2u64.pow(attempts - 1);
                    warn!(%url, attempt = attempts, delay_ms = backoff, error = %e, "retrying");
                    sleep(Duration::from_millis(backoff)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get_once(&self, url: &Url) -> Result<String> {
        debug!(%url, "GET");
        Ok(self
            .http
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?)
    }
}
