//! Shared tracing targets for the crate.
//!
//! Centralises the log targets so subscribers can filter cache and network
//! events without pulling in unrelated application logs.

/// Target used by cache filesystem events.
pub(crate) const CACHE_TARGET: &str = "browser_cache::cache";

/// Target used by release feed requests.
pub(crate) const RELEASE_FEED_TARGET: &str = "browser_cache::release_feed";
