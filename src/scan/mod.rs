//! Filesystem discovery: existence probes, directory listing, manifest parsing.

use std::fs;
use std::path::Path;

pub mod lister;
pub mod manifest;

pub use lister::{list_children, ExcludeFilter};
pub use manifest::read_manifest_scripts;

/// Non-throwing existence probe; any failure (missing, permission denied) is `false`.
pub fn path_exists(path: &Path) -> bool {
    fs::metadata(path).is_ok()
}

/// True for real directories. Symlinks are not followed, so tree recursion
/// cannot loop.
pub fn is_directory(path: &Path) -> bool {
    fs::symlink_metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}
