//! On-disk cache layout for installed browser builds.
//!
//! The cache relies on the following structure:
//!
//! ```text
//! <root>
//! ├── <browser>                  browser_root(browser)
//! │   └── <platform>-<build_id>  installation_dir(browser, platform, build_id)
//! │       └── browser specific contents
//! └── <browser>
//!     └── ...
//! ```
//!
//! Paths are computed on demand and never created here; installers write the
//! contents and [`Cache::clear`] removes the whole tree.

mod config;
mod removal;

use std::fs;
use std::io::ErrorKind;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, warn};

use crate::error::{BrowserCacheError, Result};
use crate::observability::CACHE_TARGET;
use crate::{Browser, BrowserPlatform};

pub use config::resolve_cache_dir;
pub use removal::{CLEAR_MAX_RETRIES, CLEAR_RETRY_DELAY, RemovalOutcome, RetryPolicy};

/// Browsers whose builds are stored under another browser's folder.
///
/// Chromium shares the Chrome folder so that existing Chrome lookups keep
/// finding it.
const CACHE_ALIASES: [(Browser, Browser); 1] = [(Browser::Chromium, Browser::Chrome)];

fn cache_folder(browser: Browser) -> Browser {
    CACHE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == browser)
        .map_or(browser, |&(_, target)| target)
}

/// A build found while scanning the cache.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct InstalledBrowser {
    /// Browser folder the build lives in.
    pub browser: Browser,
    /// Platform half of the installation folder name.
    pub platform: BrowserPlatform,
    /// Build id half of the installation folder name.
    pub build_id: String,
    /// Installation directory of the build.
    pub path: Utf8PathBuf,
}

/// Maps browser identities onto paths below a caller-owned root directory.
///
/// # Examples
/// ```
/// use browser_cache::{Browser, BrowserPlatform, Cache};
///
/// let cache = Cache::new("/var/cache/browsers");
/// let dir = cache.installation_dir(Browser::Chromium, BrowserPlatform::Linux, "115.0.5790.0");
/// assert_eq!(dir.as_str(), "/var/cache/browsers/chrome/linux-115.0.5790.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cache {
    root: Utf8PathBuf,
    retry: RetryPolicy,
}

impl Cache {
    /// Creates a cache rooted at `root`. Nothing is created on disk.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            retry: RetryPolicy::default(),
        }
    }

    /// Creates a cache rooted at the directory chosen by [`resolve_cache_dir`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(resolve_cache_dir())
    }

    /// Replaces the retry policy used by the removal operations.
    #[must_use]
    pub const fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Root directory of the cache.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Directory holding every build of `browser`.
    #[must_use]
    pub fn browser_root(&self, browser: Browser) -> Utf8PathBuf {
        self.root.join(cache_folder(browser).as_str())
    }

    /// Directory holding one build of `browser` for `platform`.
    ///
    /// `build_id` is used verbatim as part of a single path segment, so it
    /// must not contain path separators.
    #[must_use]
    pub fn installation_dir(
        &self,
        browser: Browser,
        platform: BrowserPlatform,
        build_id: &str,
    ) -> Utf8PathBuf {
        self.browser_root(browser).join(format!("{platform}-{build_id}"))
    }

    /// Deletes the whole cache, swallowing any failure that survives the
    /// retries.
    ///
    /// A missing root is treated as already cleared. Use [`Cache::try_clear`]
    /// to observe the final failure instead.
    pub fn clear(&self) {
        if let Err(err) = self.try_clear() {
            warn!(
                target: CACHE_TARGET,
                root = %self.root,
                error = %err,
                "failed to clear browser cache"
            );
        }
    }

    /// Deletes the whole cache and reports how the removal ended.
    ///
    /// Transient failures such as a file locked by another process are
    /// retried according to the cache's [`RetryPolicy`].
    ///
    /// # Errors
    ///
    /// Returns [`BrowserCacheError::Io`] when the root is unsafe to remove or
    /// the deletion still fails once the retries are exhausted.
    pub fn try_clear(&self) -> Result<RemovalOutcome> {
        remove_logged(&self.root, self.retry, "cache root")
    }

    /// Removes a single installed build.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserCacheError::Io`] when the installation directory
    /// cannot be removed.
    pub fn uninstall(
        &self,
        browser: Browser,
        platform: BrowserPlatform,
        build_id: &str,
    ) -> Result<RemovalOutcome> {
        let dir = self.installation_dir(browser, platform, build_id);
        remove_logged(&dir, self.retry, "installation")
    }

    /// Lists the builds currently present in the cache.
    ///
    /// Entries that do not follow the `<platform>-<build_id>` naming are
    /// ignored. Aliased browsers are reported under the browser whose folder
    /// they share.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserCacheError::Io`] when an existing browser folder
    /// cannot be read.
    pub fn installed_browsers(&self) -> Result<Vec<InstalledBrowser>> {
        let mut installed = Vec::new();
        for browser in Browser::ALL
            .into_iter()
            .filter(|candidate| cache_folder(*candidate) == *candidate)
        {
            self.collect_installed(browser, &mut installed)?;
        }
        installed.sort();
        Ok(installed)
    }

    fn collect_installed(&self, browser: Browser, out: &mut Vec<InstalledBrowser>) -> Result<()> {
        let browser_root = self.browser_root(browser);
        let entries = match fs::read_dir(&browser_root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(BrowserCacheError::io("read", browser_root, err)),
        };

        for entry in entries {
            let dir_entry = entry.map_err(|err| BrowserCacheError::io("read", &browser_root, err))?;
            if !dir_entry.file_type().is_ok_and(|kind| kind.is_dir()) {
                continue;
            }
            let Ok(name) = dir_entry.file_name().into_string() else {
                continue;
            };
            let Some((platform, build_id)) = parse_installation_name(&name) else {
                debug!(
                    target: CACHE_TARGET,
                    browser = %browser,
                    entry = %name,
                    "skipping unrecognised cache entry"
                );
                continue;
            };
            out.push(InstalledBrowser {
                browser,
                platform,
                build_id: build_id.to_owned(),
                path: browser_root.join(&name),
            });
        }
        Ok(())
    }
}

fn parse_installation_name(name: &str) -> Option<(BrowserPlatform, &str)> {
    let (platform, build_id) = name.split_once('-')?;
    if build_id.is_empty() {
        return None;
    }
    Some((platform.parse().ok()?, build_id))
}

fn remove_logged(path: &Utf8Path, retry: RetryPolicy, label: &str) -> Result<RemovalOutcome> {
    let outcome = removal::remove_dir_all_with_retry(path, retry)
        .map_err(|err| BrowserCacheError::io("remove", path, err))?;
    match outcome {
        RemovalOutcome::Removed => {
            debug!(target: CACHE_TARGET, path = %path, label, "removed browser directory");
        }
        RemovalOutcome::Missing => {
            debug!(target: CACHE_TARGET, path = %path, label, "browser directory already removed");
        }
    }
    Ok(outcome)
}
