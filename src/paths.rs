//! XDG directory helpers for config/data locations.

use std::path::PathBuf;

/// Base directory for persistent data (the activity cache).
///
/// Uses `NF_DATA_DIR` if set, otherwise `$XDG_DATA_HOME/notefeed` or
/// `~/.local/share/notefeed`.
pub(crate) fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("NF_DATA_DIR")
        && !dir.trim().is_empty()
    {
        return PathBuf::from(dir);
    }

    std::env::var("XDG_DATA_HOME")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("/tmp"))
                .join(".local")
                .join("share")
        })
        .join("notefeed")
}

/// Activity cache document path (cache.json).
pub(crate) fn cache_path() -> PathBuf {
    data_dir().join("cache.json")
}

/// Base directory for configuration files.
///
/// Uses `NF_CONFIG_DIR` if set, otherwise `$XDG_CONFIG_HOME/notefeed` or
/// `~/.config/notefeed`.
pub(crate) fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("NF_CONFIG_DIR")
        && !dir.trim().is_empty()
    {
        return PathBuf::from(dir);
    }

    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("/tmp"))
                .join(".config")
        })
        .join("notefeed")
}
