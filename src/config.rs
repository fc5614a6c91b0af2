//! Environment-driven settings for callers that assemble a cache and feed.

use std::ffi::OsString;

use camino::Utf8PathBuf;
use color_eyre::eyre::eyre;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::browser_data::{CHROME_FOR_TESTING_BASE_URL, ReleaseFeed};
use crate::cache::{Cache, resolve_cache_dir};
use crate::error::{ConfigError, ConfigResult};
use crate::ReleaseChannel;

/// Captures browser cache settings supplied via environment variables.
#[derive(Debug, Clone, Serialize, Deserialize, OrthoConfig, Default)]
#[ortho_config(prefix = "BROWSER_CACHE")]
///
/// # Examples
/// ```
/// use browser_cache::BrowserCacheCfg;
///
/// let cfg = BrowserCacheCfg::default();
/// assert!(cfg.cache_dir.is_none());
/// ```
pub struct BrowserCacheCfg {
    /// Root directory of the cache when provided.
    pub cache_dir: Option<Utf8PathBuf>,
    /// Base URL that download URLs are built from.
    pub download_base_url: Option<String>,
    /// Release feed endpoint used for build-id lookups.
    pub release_feed_url: Option<String>,
    /// Release channel used when the caller does not pick one.
    pub channel: Option<ReleaseChannel>,
}

impl BrowserCacheCfg {
    /// Loads configuration from environment variables without parsing CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a value cannot be deserialised, including
    /// a `BROWSER_CACHE_CHANNEL` that names no known release channel.
    pub fn load() -> ConfigResult<Self> {
        let args = [OsString::from("browser-cache")];
        Self::load_from_iter(args).map_err(|err| ConfigError::from(eyre!(err)))
    }

    /// Cache rooted at `cache_dir`, or at [`resolve_cache_dir`] when unset.
    #[must_use]
    pub fn cache(&self) -> Cache {
        Cache::new(self.cache_dir.clone().unwrap_or_else(resolve_cache_dir))
    }

    /// Release feed targeting `release_feed_url`, or the public feed when unset.
    #[must_use]
    pub fn release_feed(&self) -> ReleaseFeed {
        self.release_feed_url
            .as_deref()
            .map_or_else(ReleaseFeed::new, ReleaseFeed::with_endpoint)
    }

    /// Configured download base, or the Chrome for Testing bucket when unset.
    #[must_use]
    pub fn download_base_url(&self) -> &str {
        self.download_base_url
            .as_deref()
            .unwrap_or(CHROME_FOR_TESTING_BASE_URL)
    }

    /// Configured release channel, defaulting to beta.
    #[must_use]
    pub fn channel(&self) -> ReleaseChannel {
        self.channel.unwrap_or_default()
    }
}
