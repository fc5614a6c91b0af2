//! Default location of the browser cache.
//!
//! An explicit `BROWSER_CACHE_DIR` wins. Otherwise the cache lives under
//! `browser-cache/browsers` inside the first usable base directory: the XDG
//! cache home, `~/.cache`, then the system temporary directory. Candidates
//! that are blank or not valid UTF-8 are skipped.

use std::path::PathBuf;

use camino::Utf8PathBuf;

/// Environment variable that pins the cache root explicitly.
pub(crate) const CACHE_DIR_ENV: &str = "BROWSER_CACHE_DIR";

/// Path of the cache below whichever base directory is chosen.
const CACHE_SUBDIR: &str = "browser-cache/browsers";

/// Resolves the browser cache directory.
///
/// Checked in order, first usable wins:
///
/// 1. `BROWSER_CACHE_DIR`, trimmed, used as the root itself
/// 2. `$XDG_CACHE_HOME/browser-cache/browsers`
/// 3. `~/.cache/browser-cache/browsers`
/// 4. `browser-cache/browsers` under the system temporary directory
///
/// When none of them is usable the relative path `browser-cache/browsers` is
/// returned, which callers resolve against their working directory.
///
/// # Examples
///
/// ```
/// use browser_cache::resolve_cache_dir;
///
/// let cache_dir = resolve_cache_dir();
/// assert!(!cache_dir.as_str().is_empty());
/// ```
#[must_use]
pub fn resolve_cache_dir() -> Utf8PathBuf {
    explicit_root().unwrap_or_else(|| {
        [xdg_cache_home, home_cache, temp_base]
            .into_iter()
            .find_map(|base| base())
            .map_or_else(|| Utf8PathBuf::from(CACHE_SUBDIR), |base| base.join(CACHE_SUBDIR))
    })
}

fn explicit_root() -> Option<Utf8PathBuf> {
    utf8(env_path(CACHE_DIR_ENV)?)
}

fn xdg_cache_home() -> Option<Utf8PathBuf> {
    utf8(env_path("XDG_CACHE_HOME")?)
}

fn home_cache() -> Option<Utf8PathBuf> {
    utf8(dirs::home_dir()?).map(|home| home.join(".cache"))
}

fn temp_base() -> Option<Utf8PathBuf> {
    utf8(std::env::temp_dir())
}

/// Reads `name` as a path, treating unset and whitespace-only values alike.
fn env_path(name: &str) -> Option<PathBuf> {
    let raw = std::env::var(name).ok()?;
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
}

fn utf8(path: PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}
