//! Identity types shared by the cache layout and the metadata resolvers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Browser products whose builds can live in the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    /// Chrome for Testing.
    Chrome,
    /// Chromium snapshot builds, stored under the Chrome folder.
    Chromium,
    /// The chromedriver companion binary.
    Chromedriver,
    /// Firefox.
    Firefox,
}

impl Browser {
    /// Every browser, in declaration order.
    pub const ALL: [Self; 4] = [Self::Chrome, Self::Chromium, Self::Chromedriver, Self::Firefox];

    /// Returns the lowercase name used on disk and in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chrome => "chrome",
            Self::Chromium => "chromium",
            Self::Chromedriver => "chromedriver",
            Self::Firefox => "firefox",
        }
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Browser {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|browser| browser.as_str() == value)
            .ok_or_else(|| UnknownVariant::new("browser", value))
    }
}

/// Host operating system and architecture a build targets.
///
/// The textual form is also the platform half of an installation folder
/// name, so it must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BrowserPlatform {
    /// 64-bit Linux.
    #[serde(rename = "linux")]
    Linux,
    /// Intel macOS.
    #[serde(rename = "mac")]
    Mac,
    /// Apple Silicon macOS.
    #[serde(rename = "mac_arm")]
    MacArm,
    /// 32-bit Windows.
    #[serde(rename = "win32")]
    Win32,
    /// 64-bit Windows.
    #[serde(rename = "win64")]
    Win64,
}

impl BrowserPlatform {
    /// Every platform, in declaration order.
    pub const ALL: [Self; 5] = [Self::Linux, Self::Mac, Self::MacArm, Self::Win32, Self::Win64];

    /// Returns the token used in installation folder names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Mac => "mac",
            Self::MacArm => "mac_arm",
            Self::Win32 => "win32",
            Self::Win64 => "win64",
        }
    }

    /// Detects the platform of the running host.
    ///
    /// Returns `None` on operating systems no browser build is published for.
    ///
    /// # Examples
    /// ```
    /// use browser_cache::BrowserPlatform;
    ///
    /// if let Some(platform) = BrowserPlatform::detect() {
    ///     println!("running on {platform}");
    /// }
    /// ```
    #[must_use]
    pub fn detect() -> Option<Self> {
        Self::from_os_arch(std::env::consts::OS, std::env::consts::ARCH)
    }

    fn from_os_arch(os: &str, arch: &str) -> Option<Self> {
        match (os, arch) {
            ("linux", _) => Some(Self::Linux),
            ("macos", "aarch64") => Some(Self::MacArm),
            ("macos", _) => Some(Self::Mac),
            ("windows", "x86_64" | "aarch64") => Some(Self::Win64),
            ("windows", _) => Some(Self::Win32),
            _ => None,
        }
    }
}

impl fmt::Display for BrowserPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BrowserPlatform {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|platform| platform.as_str() == value)
            .ok_or_else(|| UnknownVariant::new("platform", value))
    }
}

/// Stability tier of a browser release.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseChannel {
    /// Stable releases.
    Stable,
    /// Beta releases, the default for build-id lookups.
    #[default]
    Beta,
    /// Dev releases.
    Dev,
    /// Canary releases.
    Canary,
}

impl ReleaseChannel {
    /// Every channel, in declaration order.
    pub const ALL: [Self; 4] = [Self::Stable, Self::Beta, Self::Dev, Self::Canary];

    /// Returns the lowercase channel name used by the release feed.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stable => "stable",
            Self::Beta => "beta",
            Self::Dev => "dev",
            Self::Canary => "canary",
        }
    }
}

impl fmt::Display for ReleaseChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReleaseChannel {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|channel| channel.as_str() == value)
            .ok_or_else(|| UnknownVariant::new("release channel", value))
    }
}

/// Returned when text does not name a known browser, platform, or channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Browser::Chrome, "chrome")]
    #[case(Browser::Chromium, "chromium")]
    #[case(Browser::Chromedriver, "chromedriver")]
    #[case(Browser::Firefox, "firefox")]
    fn browser_names_parse_back(#[case] browser: Browser, #[case] name: &str) {
        assert_eq!(browser.to_string(), name);
        assert_eq!(name.parse::<Browser>(), Ok(browser));
    }

    #[rstest]
    #[case("linux", BrowserPlatform::Linux)]
    #[case("mac", BrowserPlatform::Mac)]
    #[case("mac_arm", BrowserPlatform::MacArm)]
    #[case("win32", BrowserPlatform::Win32)]
    #[case("win64", BrowserPlatform::Win64)]
    fn platform_tokens_are_stable(#[case] token: &str, #[case] platform: BrowserPlatform) {
        assert_eq!(platform.as_str(), token);
        assert_eq!(token.parse::<BrowserPlatform>(), Ok(platform));
    }

    #[test]
    fn unknown_platform_is_rejected() {
        let err = "mac-arm64"
            .parse::<BrowserPlatform>()
            .expect_err("folder names are not platform tokens");
        assert_eq!(err.to_string(), "unknown platform 'mac-arm64'");
    }

    #[test]
    fn beta_is_the_default_channel() {
        assert_eq!(ReleaseChannel::default(), ReleaseChannel::Beta);
    }

    #[test]
    fn channels_deserialise_from_lowercase_names() {
        let parsed: Vec<ReleaseChannel> =
            serde_json::from_str(r#"["stable","beta","dev","canary"]"#).expect("parse channels");
        assert_eq!(parsed, ReleaseChannel::ALL.to_vec());
    }

    #[rstest]
    #[case("linux", "x86_64", Some(BrowserPlatform::Linux))]
    #[case("linux", "aarch64", Some(BrowserPlatform::Linux))]
    #[case("macos", "aarch64", Some(BrowserPlatform::MacArm))]
    #[case("macos", "x86_64", Some(BrowserPlatform::Mac))]
    #[case("windows", "x86_64", Some(BrowserPlatform::Win64))]
    #[case("windows", "aarch64", Some(BrowserPlatform::Win64))]
    #[case("windows", "x86", Some(BrowserPlatform::Win32))]
    #[case("freebsd", "x86_64", None)]
    fn host_detection_maps_os_and_arch(
        #[case] os: &str,
        #[case] arch: &str,
        #[case] expected: Option<BrowserPlatform>,
    ) {
        assert_eq!(BrowserPlatform::from_os_arch(os, arch), expected);
    }
}
