//! Client for the chromiumdash release feed.

use serde_json::Value;
use tracing::debug;

use crate::ReleaseChannel;
use crate::error::{BrowserCacheError, Result};
use crate::observability::RELEASE_FEED_TARGET;

/// Endpoint listing the latest releases per platform and channel.
pub const DEFAULT_RELEASE_FEED_URL: &str = "https://chromiumdash.appspot.com/fetch_releases";

/// Looks up the newest published version for a platform and channel.
///
/// Each lookup is a single GET with no retry and no timeout of its own; wrap
/// the future in a timeout or drop it to abandon the request.
#[derive(Debug, Clone)]
pub struct ReleaseFeed {
    client: reqwest::Client,
    endpoint: String,
}

impl ReleaseFeed {
    /// Targets the public chromiumdash feed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_RELEASE_FEED_URL)
    }

    /// Targets a custom feed endpoint, for mirrors or tests.
    #[must_use]
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    /// Reuses a caller-owned HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Endpoint queried by [`ReleaseFeed::latest_version`].
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the `version` of the first release the feed lists.
    ///
    /// `platform` is the feed's own platform token, not a cache platform name.
    ///
    /// # Errors
    ///
    /// - [`BrowserCacheError::Status`] when the feed answers with status 400 or above.
    /// - [`BrowserCacheError::Transport`] when the request itself fails.
    /// - [`BrowserCacheError::BuildIdNotFound`] when the body is not JSON or
    ///   has no string `version` in its first element.
    pub async fn latest_version(&self, platform: &str, channel: ReleaseChannel) -> Result<String> {
        debug!(
            target: RELEASE_FEED_TARGET,
            endpoint = %self.endpoint,
            platform,
            channel = %channel,
            "fetching release feed"
        );

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("platform", platform), ("channel", channel.as_str())])
            .send()
            .await?;

        let status = response.status().as_u16();
        if status >= 400 {
            debug!(target: RELEASE_FEED_TARGET, status, "release feed returned an error status");
            return Err(BrowserCacheError::Status { status });
        }

        let body = response.text().await?;
        let version = first_release_version(&body).ok_or(BrowserCacheError::BuildIdNotFound)?;
        debug!(
            target: RELEASE_FEED_TARGET,
            platform,
            channel = %channel,
            version = %version,
            "resolved latest release"
        );
        Ok(version)
    }
}

impl Default for ReleaseFeed {
    fn default() -> Self {
        Self::new()
    }
}

fn first_release_version(body: &str) -> Option<String> {
    let releases: Value = serde_json::from_str(body).ok()?;
    releases
        .get(0)?
        .get("version")?
        .as_str()
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r#"[{"version":"115.0.5790.0"}]"#, Some("115.0.5790.0"))]
    #[case(
        r#"[{"version":"116.0.5845.4","milestone":116},{"channel":"Beta"}]"#,
        Some("116.0.5845.4")
    )]
    #[case("[]", None)]
    #[case(r#"[{"milestone":116}]"#, None)]
    #[case(r#"[{"version":116}]"#, None)]
    #[case(r#"{"version":"115.0.5790.0"}"#, None)]
    #[case("<html>maintenance</html>", None)]
    fn first_release_version_reads_only_the_first_entry(
        #[case] body: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(first_release_version(body).as_deref(), expected);
    }

    #[test]
    fn default_feed_targets_chromiumdash() {
        assert_eq!(ReleaseFeed::default().endpoint(), DEFAULT_RELEASE_FEED_URL);
    }
}
