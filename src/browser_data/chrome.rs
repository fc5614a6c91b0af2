//! Chrome for Testing metadata.

use camino::Utf8PathBuf;

use super::{CHROME_FOR_TESTING_BASE_URL, ReleaseFeed, folder, release_feed_platform};
use crate::error::{BrowserCacheError, Result};
use crate::{BrowserPlatform, ReleaseChannel};

/// Builds the archive URL for a Chrome build.
///
/// `base_url` defaults to [`CHROME_FOR_TESTING_BASE_URL`] and is joined
/// verbatim.
///
/// # Examples
/// ```
/// use browser_cache::BrowserPlatform;
/// use browser_cache::browser_data::chrome;
///
/// let url = chrome::resolve_download_url(BrowserPlatform::Linux, "115.0.5790.0", None);
/// assert_eq!(
///     url,
///     "https://edgedl.me.gvt1.com/edgedl/chrome/chrome-for-testing/115.0.5790.0/linux64/chrome-linux64.zip"
/// );
/// ```
#[must_use]
pub fn resolve_download_url(
    platform: BrowserPlatform,
    build_id: &str,
    base_url: Option<&str>,
) -> String {
    let base = base_url.unwrap_or(CHROME_FOR_TESTING_BASE_URL);
    let folder = folder(platform);
    format!("{base}/{build_id}/{folder}/chrome-{folder}.zip")
}

/// Path of the Chrome executable relative to an extracted archive.
///
/// The layout does not vary between Chrome builds, so `_build_id` is unused.
#[must_use]
pub fn relative_executable_path(platform: BrowserPlatform, _build_id: &str) -> Utf8PathBuf {
    let archive_root = Utf8PathBuf::from(format!("chrome-{}", folder(platform)));
    match platform {
        BrowserPlatform::Mac | BrowserPlatform::MacArm => archive_root
            .join("Google Chrome for Testing.app")
            .join("Contents")
            .join("MacOS")
            .join("Google Chrome for Testing"),
        BrowserPlatform::Linux => archive_root.join("chrome"),
        BrowserPlatform::Win32 | BrowserPlatform::Win64 => archive_root.join("chrome.exe"),
    }
}

/// Asks the public release feed for the newest Chrome version on `channel`.
///
/// # Errors
///
/// See [`ReleaseFeed::latest_version`].
pub async fn resolve_build_id(
    platform: BrowserPlatform,
    channel: ReleaseChannel,
) -> Result<String> {
    resolve_build_id_with(&ReleaseFeed::new(), platform, channel).await
}

/// Asks `feed` for the newest Chrome version on `channel`.
///
/// # Errors
///
/// See [`ReleaseFeed::latest_version`].
pub async fn resolve_build_id_with(
    feed: &ReleaseFeed,
    platform: BrowserPlatform,
    channel: ReleaseChannel,
) -> Result<String> {
    feed.latest_version(release_feed_platform(platform), channel).await
}

/// Well-known location of a system-wide Chrome installation.
///
/// On Windows the path is built from `PROGRAMFILES`; when the variable is
/// unset the leading segment is left empty.
///
/// # Errors
///
/// Returns [`BrowserCacheError::UnsupportedCombination`] when Chrome does not
/// publish `channel` for `platform` (canary on Linux).
///
/// # Examples
/// ```
/// use browser_cache::browser_data::chrome;
/// use browser_cache::{BrowserPlatform, ReleaseChannel};
///
/// let linux = BrowserPlatform::Linux;
/// let path = chrome::resolve_system_executable_path(linux, ReleaseChannel::Stable)?;
/// assert_eq!(path.as_str(), "/opt/google/chrome/chrome");
///
/// assert!(chrome::resolve_system_executable_path(linux, ReleaseChannel::Canary).is_err());
/// # Ok::<(), browser_cache::BrowserCacheError>(())
/// ```
pub fn resolve_system_executable_path(
    platform: BrowserPlatform,
    channel: ReleaseChannel,
) -> Result<Utf8PathBuf> {
    let path = match platform {
        BrowserPlatform::Win32 | BrowserPlatform::Win64 => Some(windows_executable(channel)),
        BrowserPlatform::Mac | BrowserPlatform::MacArm => {
            Some(Utf8PathBuf::from(mac_executable(channel)))
        }
        BrowserPlatform::Linux => linux_executable(channel).map(Utf8PathBuf::from),
    };
    path.ok_or(BrowserCacheError::UnsupportedCombination { channel, platform })
}

fn windows_executable(channel: ReleaseChannel) -> Utf8PathBuf {
    let program_files = std::env::var("PROGRAMFILES").unwrap_or_default();
    let install = match channel {
        ReleaseChannel::Stable => "Chrome",
        ReleaseChannel::Beta => "Chrome Beta",
        ReleaseChannel::Canary => "Chrome SxS",
        ReleaseChannel::Dev => "Chrome Dev",
    };
    Utf8PathBuf::from(format!(
        "{program_files}\\Google\\{install}\\Application\\chrome.exe"
    ))
}

const fn mac_executable(channel: ReleaseChannel) -> &'static str {
    match channel {
        ReleaseChannel::Stable => "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
        ReleaseChannel::Beta => {
            "/Applications/Google Chrome Beta.app/Contents/MacOS/Google Chrome Beta"
        }
        ReleaseChannel::Canary => {
            "/Applications/Google Chrome Canary.app/Contents/MacOS/Google Chrome Canary"
        }
        ReleaseChannel::Dev => {
            "/Applications/Google Chrome Dev.app/Contents/MacOS/Google Chrome Dev"
        }
    }
}

const fn linux_executable(channel: ReleaseChannel) -> Option<&'static str> {
    match channel {
        ReleaseChannel::Stable => Some("/opt/google/chrome/chrome"),
        ReleaseChannel::Beta => Some("/opt/google/chrome-beta/chrome"),
        ReleaseChannel::Dev => Some("/opt/google/chrome-unstable/chrome"),
        ReleaseChannel::Canary => None,
    }
}
