//! Guarded directory removal with bounded retries.

use std::io::{self, ErrorKind};
use std::time::Duration;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::observability::CACHE_TARGET;

/// Retries applied by [`crate::Cache::clear`] before it gives up.
pub const CLEAR_MAX_RETRIES: u32 = 10;

/// Fixed pause between two removal attempts.
pub const CLEAR_RETRY_DELAY: Duration = Duration::from_millis(200);

/// Records the outcome of a guarded directory removal attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// The directory existed and was deleted.
    Removed,
    /// Nothing was present at the path.
    Missing,
}

/// How often and how patiently a removal is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy allowing `max_retries` extra attempts spaced by `delay`.
    #[must_use]
    pub const fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// Number of attempts after the first one.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Pause between attempts.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(CLEAR_MAX_RETRIES, CLEAR_RETRY_DELAY)
    }
}

/// Removes `path` recursively, retrying transient failures per `policy`.
pub(crate) fn remove_dir_all_with_retry(
    path: &Utf8Path,
    policy: RetryPolicy,
) -> io::Result<RemovalOutcome> {
    retry_removal(path, policy, try_remove_dir_all)
}

fn retry_removal<F>(
    path: &Utf8Path,
    policy: RetryPolicy,
    mut remove: F,
) -> io::Result<RemovalOutcome>
where
    F: FnMut(&Utf8Path) -> io::Result<RemovalOutcome>,
{
    let mut retries = 0;
    loop {
        match remove(path) {
            Ok(outcome) => return Ok(outcome),
            Err(err) if retries < policy.max_retries && is_transient(&err) => {
                retries += 1;
                debug!(
                    target: CACHE_TARGET,
                    path = %path,
                    attempt = retries,
                    error = %err,
                    "directory removal failed; retrying"
                );
                std::thread::sleep(policy.delay);
            }
            Err(err) => return Err(err),
        }
    }
}

fn is_transient(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::ResourceBusy | ErrorKind::DirectoryNotEmpty | ErrorKind::PermissionDenied
    ) || is_descriptor_exhaustion(err)
}

#[cfg(unix)]
fn is_descriptor_exhaustion(err: &io::Error) -> bool {
    matches!(err.raw_os_error(), Some(libc::EMFILE | libc::ENFILE))
}

#[cfg(not(unix))]
const fn is_descriptor_exhaustion(_err: &io::Error) -> bool {
    false
}

/// Attempts to remove a directory tree, rejecting unsafe paths before deletion.
fn try_remove_dir_all(path: &Utf8Path) -> io::Result<RemovalOutcome> {
    guard_removal_path(path)?;
    match std::fs::remove_dir_all(path) {
        Ok(()) => Ok(RemovalOutcome::Removed),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(RemovalOutcome::Missing),
        Err(err) => Err(err),
    }
}

fn guard_removal_path(path: &Utf8Path) -> io::Result<()> {
    if is_empty_or_root(&lexically_normalised(path)) {
        return Err(io::Error::new(
            ErrorKind::InvalidInput,
            format!("refuse to remove unsafe path {path}"),
        ));
    }
    Ok(())
}

/// Folds `.` and `..` segments without touching the filesystem.
///
/// A `..` that would climb above a root stays at the root; one that climbs
/// above a relative start is kept so the path is not mistaken for empty.
fn lexically_normalised(path: &Utf8Path) -> Utf8PathBuf {
    let mut normalised = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => match normalised.components().next_back() {
                Some(Utf8Component::Normal(_)) => {
                    normalised.pop();
                }
                Some(Utf8Component::RootDir | Utf8Component::Prefix(_)) => {}
                _ => normalised.push(".."),
            },
            other => normalised.push(other.as_str()),
        }
    }
    normalised
}

fn is_empty_or_root(path: &Utf8Path) -> bool {
    let mut components = path.components();
    match components.next() {
        None => true,
        Some(Utf8Component::CurDir | Utf8Component::RootDir) => components.next().is_none(),
        Some(Utf8Component::Prefix(_)) => match components.next() {
            None => true,
            Some(Utf8Component::RootDir) => components.next().is_none(),
            _ => false,
        },
        _ => false,
    }
}
