//! Maps browser builds onto a local on-disk cache and resolves the metadata
//! needed to fetch and run them.
//!
//! Two independent pieces are exposed. [`Cache`] turns a browser, platform,
//! and build id into deterministic paths below a caller-owned root and can
//! delete the whole tree. [`browser_data`] knows, per browser, where
//! archives are downloaded from, where the executable sits inside them, which
//! build is current on a release channel, and where a system-wide copy is
//! installed.
//!
//! Downloading, extracting, and launching are left to the caller:
//!
//! ```
//! use browser_cache::browser_data::chrome;
//! use browser_cache::{Browser, BrowserPlatform, Cache};
//!
//! let cache = Cache::new("/var/cache/browsers");
//! let build_id = "115.0.5790.0";
//! let dir = cache.installation_dir(Browser::Chrome, BrowserPlatform::Linux, build_id);
//! let executable = dir.join(chrome::relative_executable_path(BrowserPlatform::Linux, build_id));
//! assert_eq!(
//!     executable.as_str(),
//!     "/var/cache/browsers/chrome/linux-115.0.5790.0/chrome-linux64/chrome"
//! );
//! ```

mod browser;
pub mod browser_data;
mod cache;
mod config;
mod error;
mod observability;

pub use browser::{Browser, BrowserPlatform, ReleaseChannel, UnknownVariant};
pub use cache::{
    CLEAR_MAX_RETRIES, CLEAR_RETRY_DELAY, Cache, InstalledBrowser, RemovalOutcome, RetryPolicy,
    resolve_cache_dir,
};
pub use config::BrowserCacheCfg;
pub use error::{BrowserCacheError, ConfigError, ConfigResult, Result};
