use std::env;
use std::path::PathBuf;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use url::Url;

use crate::error::{EstatError, Result};

/// Default endpoint of the e-Stat JSON API, REST version 2.1.
pub const BASE_URL: &str = "https://api.e-stat.go.jp/rest/2.1/app/json/getStatsData";

/// Environment variable consulted when no app id is passed explicitly.
pub const APP_ID_ENV: &str = "ESTAT_APP_ID";

static DEFAULT_APP_ID: Lazy<RwLock<Option<String>>> = Lazy::new(|| RwLock::new(None));

/// Set a process-wide default app id.
///
/// Convenience for the fetch boundary only; [`Config::resolve`] reads it as
/// the last fallback. The transform itself never consults process state.
pub fn configure(app_id: impl Into<String>) {
    *DEFAULT_APP_ID.write().unwrap() = Some(app_id.into());
}

fn default_app_id() -> Option<String> {
    DEFAULT_APP_ID.read().unwrap().clone()
}

/// Settings for the e-Stat fetch collaborator.
#[derive(Debug, Clone)]
pub struct Config {
    /// Application id issued by e-stat.go.jp.
    pub app_id: String,
    pub base_url: Url,
    /// Directory for cached responses; `None` disables caching.
    pub cache_dir: Option<PathBuf>,
}

impl Config {
    /// Build a config from an explicit app id.
    ///
    /// Fails at construction, before any fetch, when the id is empty.
    pub fn new(app_id: impl Into<String>) -> Result<Self> {
        let app_id = app_id.into();
        if app_id.is_empty() {
            return Err(EstatError::Configuration(
                "app_id must not be empty".into(),
            ));
        }
        Ok(Self {
            app_id,
            base_url: Url::parse(BASE_URL).expect("base url should parse"),
            cache_dir: None,
        })
    }

    /// Resolve an app id from, in order: the explicit argument, the
    /// `ESTAT_APP_ID` environment variable, the process-wide default set by
    /// [`configure`].
    pub fn resolve(app_id: Option<String>) -> Result<Self> {
        let resolved = app_id
            .filter(|id| !id.is_empty())
            .or_else(|| env::var(APP_ID_ENV).ok().filter(|id| !id.is_empty()))
            .or_else(default_app_id)
            .ok_or_else(|| {
                EstatError::Configuration(format!(
                    "no app id: pass one explicitly, set {}, or call configure()",
                    APP_ID_ENV
                ))
            })?;
        Self::new(resolved)
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }
}
