//! Chromedriver metadata.
//!
//! Chrome for Testing publishes a chromedriver archive next to every Chrome
//! build, so the folder table and the release feed are shared with
//! [`chrome`](super::chrome).

use camino::Utf8PathBuf;

use super::{CHROME_FOR_TESTING_BASE_URL, ReleaseFeed, folder, release_feed_platform};
use crate::error::Result;
use crate::{BrowserPlatform, ReleaseChannel};

/// Builds the archive URL for a chromedriver build.
#[must_use]
pub fn resolve_download_url(
    platform: BrowserPlatform,
    build_id: &str,
    base_url: Option<&str>,
) -> String {
    let base = base_url.unwrap_or(CHROME_FOR_TESTING_BASE_URL);
    let folder = folder(platform);
    format!("{base}/{build_id}/{folder}/chromedriver-{folder}.zip")
}

/// Path of the chromedriver executable relative to an extracted archive.
#[must_use]
pub fn relative_executable_path(platform: BrowserPlatform, _build_id: &str) -> Utf8PathBuf {
    let archive_root = Utf8PathBuf::from(format!("chromedriver-{}", folder(platform)));
    match platform {
        BrowserPlatform::Linux | BrowserPlatform::Mac | BrowserPlatform::MacArm => {
            archive_root.join("chromedriver")
        }
        BrowserPlatform::Win32 | BrowserPlatform::Win64 => archive_root.join("chromedriver.exe"),
    }
}

/// Asks the public release feed for the chromedriver matching the newest
/// Chrome on `channel`.
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

/// Asks `feed` for the chromedriver matching the newest Chrome on `channel`.
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
