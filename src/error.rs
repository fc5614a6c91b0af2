//! Domain error types for browser cache and metadata resolution.

use camino::Utf8PathBuf;
use color_eyre::Report;
use thiserror::Error;

use crate::{BrowserPlatform, ReleaseChannel};

/// Result alias for operations that may return a [`BrowserCacheError`].
pub type Result<T> = std::result::Result<T, BrowserCacheError>;

/// Result alias for configuration fallible operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Top-level error exposed by the crate.
#[derive(Debug, Error)]
pub enum BrowserCacheError {
    /// No known system install location exists for the channel on the platform.
    #[error("Unable to detect browser executable path for '{channel}' on {platform}.")]
    UnsupportedCombination {
        /// Channel that was requested.
        channel: ReleaseChannel,
        /// Platform that was requested.
        platform: BrowserPlatform,
    },
    /// The release feed answered with an HTTP error status.
    #[error("Got status code {status}")]
    Status {
        /// HTTP status code returned by the feed.
        status: u16,
    },
    /// The request to the release feed failed below the HTTP layer.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    /// The release feed body did not contain a usable version.
    #[error("Chrome version not found")]
    BuildIdNotFound,
    /// A filesystem operation on the cache failed.
    #[error("failed to {action} {path}: {source}")]
    Io {
        /// Short description of the attempted operation.
        action: &'static str,
        /// Path the operation targeted.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Indicates configuration parsing failed.
    #[error("configuration parsing failed")]
    Config(#[from] ConfigError),
}

impl BrowserCacheError {
    pub(crate) fn io(
        action: &'static str,
        path: impl Into<Utf8PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

/// Captures configuration failures.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ConfigError(#[from] Report);
