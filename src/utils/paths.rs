//! Path labels and per-user data locations.

use std::path::{Path, PathBuf};

/// Final path component for display, falling back to the whole path.
pub fn dir_label(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

/// Per-user data directory (`$XDG_DATA_HOME`, `~/.local/share`, `%APPDATA%`).
pub fn data_root_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(PathBuf::from)
    }
    #[cfg(not(target_os = "windows"))]
    {
        if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
            return Some(PathBuf::from(xdg));
        }
        std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("share"))
    }
}

/// Fixed location of the override cache document.
pub fn default_storage_path() -> Option<PathBuf> {
    Some(data_root_dir()?.join("scripts-run").join(".manifest.json"))
}

pub fn home_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("USERPROFILE").map(PathBuf::from)
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var_os("HOME").map(PathBuf::from)
    }
}
