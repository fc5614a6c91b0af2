//! Per-browser metadata: download URLs, archive layouts, build ids, and
//! system install locations.
//!
//! Every table in this module is an exhaustive `match` over
//! [`BrowserPlatform`](crate::BrowserPlatform) and
//! [`ReleaseChannel`](crate::ReleaseChannel), so adding a variant fails the
//! build until each table handles it. Cache aliases never apply here: these
//! lookups always use the browser that was asked for.

pub mod chrome;
pub mod chromedriver;
mod release_feed;

pub use release_feed::{DEFAULT_RELEASE_FEED_URL, ReleaseFeed};

use crate::BrowserPlatform;

/// Base URL of the Chrome for Testing download bucket.
pub const CHROME_FOR_TESTING_BASE_URL: &str =
    "https://edgedl.me.gvt1.com/edgedl/chrome/chrome-for-testing";

/// Folder name used by Chrome for Testing archives for `platform`.
pub(crate) const fn folder(platform: BrowserPlatform) -> &'static str {
    match platform {
        BrowserPlatform::Linux => "linux64",
        BrowserPlatform::MacArm => "mac-arm64",
        BrowserPlatform::Mac => "mac-x64",
        BrowserPlatform::Win32 => "win32",
        BrowserPlatform::Win64 => "win64",
    }
}

/// Platform token understood by the chromiumdash release feed.
///
/// Distinct from [`folder`]: both mac variants collapse to `mac`.
pub(crate) const fn release_feed_platform(platform: BrowserPlatform) -> &'static str {
    match platform {
        BrowserPlatform::Linux => "linux",
        BrowserPlatform::MacArm | BrowserPlatform::Mac => "mac",
        BrowserPlatform::Win32 => "win",
        BrowserPlatform::Win64 => "win64",
    }
}
