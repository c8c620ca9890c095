//! Filesystem locations.

use std::path::{Path, PathBuf};

/// Directory name under `$HOME/.local/share`.
const APP_DIR: &str = "delv-shell";

/// Used when `$HOME` is unset.
const FALLBACK_DIR: &str = ".delv-shell";

/// Default data directory: `$HOME/.local/share/delv-shell`, or
/// `./.delv-shell` without a home directory.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    data_dir_from_home(std::env::var_os("HOME").map(PathBuf::from).as_deref())
}

fn data_dir_from_home(home: Option<&Path>) -> PathBuf {
    match home {
        Some(home) if !home.as_os_str().is_empty() => home.join(".local").join("share").join(APP_DIR),
        _ => PathBuf::from(FALLBACK_DIR),
    }
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a leading `~`, and every path when `$HOME` is unset, are
/// returned unchanged.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    expand_with_home(path, std::env::var_os("HOME").map(PathBuf::from).as_deref())
}

fn expand_with_home(path: &str, home: Option<&Path>) -> PathBuf {
    match (path, home) {
        ("~", Some(home)) => home.to_path_buf(),
        (_, Some(home)) if path.starts_with("~/") => home.join(&path[2..]),
        _ => PathBuf::from(path),
    }
}
