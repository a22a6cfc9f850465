// src/fetch/cache.rs
use std::fs;
use std::path::PathBuf;

use sha2::{Digest, Sha256};
use tracing::debug;
use url::Url;

use crate::error::Result;

/// On-disk cache of raw API payloads, one file per request URL.
///
/// Files are named `estat-<hex sha256(url)>.json`, so a query change (new
/// code list, different app id) lands in a new file and the old payload
/// stays untouched.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
}

impl ResponseCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Cache file for `url`.
    pub fn path_for(&self, url: &Url) -> PathBuf {
        let digest = Sha256::digest(url.as_str().as_bytes());
        self.dir.join(format!("estat-{}.json", hex::encode(digest)))
    }

    /// Cached payload for `url`, if present and readable.
    pub fn load(&self, url: &Url) -> Option<String> {
        let path = self.path_for(url);
        match fs::read_to_string(&path) {
            Ok(body) => {
                debug!(path = %path.display(), "cache hit");
                Some(body)
            }
            Err(_) => None,
        }
    }

    /// Persist `body` as the payload for `url`, creating the cache
    /// directory on first use.
    pub fn store(&self, url: &Url, body: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(url);
        fs::write(&path, body)?;
        debug!(path = %path.display(), bytes = body.len(), "cached response");
        Ok(())
    }

    /// Drop the cached payload for `url`, e.g. when it no longer parses.
    pub fn evict(&self, url: &Url) -> Result<()> {
        let path = self.path_for(url);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}
