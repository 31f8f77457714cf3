//! Depth-1 directory listing with glob exclusion.

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;
use walkdir::WalkDir;

/// Compiled exclusion patterns.
///
/// A child is excluded when any pattern matches either its bare name or its
/// full path, so both `node_modules` and `**/node_modules` work.
#[derive(Debug, Clone)]
pub struct ExcludeFilter {
    set: GlobSet,
}

impl ExcludeFilter {
    /// Build from glob patterns. Invalid patterns are skipped with a warning.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            match Glob::new(pattern.as_ref()) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => tracing::warn!("Ignoring invalid exclude glob '{}': {}", pattern.as_ref(), e),
            }
        }
        let set = builder.build().unwrap_or_else(|e| {
            tracing::warn!("Failed to compile exclude globs: {}", e);
            GlobSet::empty()
        });
        Self { set }
    }

    pub fn is_excluded(&self, path: &Path, name: &str) -> bool {
        self.set.is_match(name) || self.set.is_match(path)
    }
}

impl Default for ExcludeFilter {
    fn default() -> Self {
        Self { set: GlobSet::empty() }
    }
}

/// Names of the immediate children of `dir` not matched by `exclude`.
///
/// Order is whatever the filesystem enumerates; callers must not rely on it.
/// An unreadable directory yields an empty list.
pub fn list_children(dir: &Path, exclude: &ExcludeFilter) -> Vec<String> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_string();
            if exclude.is_excluded(entry.path(), &name) {
                tracing::trace!("excluded {}", entry.path().display());
                return None;
            }
            Some(name)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs;
    use tempfile::TempDir;

    fn names(list: Vec<String>) -> BTreeSet<String> {
        list.into_iter().collect()
    }

    #[test]
    fn lists_only_immediate_children() {
        let tmp = TempDir::new().expect("tmp");
        fs::create_dir_all(tmp.path().join("packages/web")).expect("mkdir");
        fs::write(tmp.path().join("package.json"), "{}").expect("write");

        let listed = names(list_children(tmp.path(), &ExcludeFilter::default()));
        let expected: BTreeSet<String> =
            ["package.json", "packages"].iter().map(|s| s.to_string()).collect();
        assert_eq!(listed, expected);
    }

    #[test]
    fn applies_exclusion_globs_to_names_and_paths() {
        let tmp = TempDir::new().expect("tmp");
        fs::create_dir(tmp.path().join("node_modules")).expect("mkdir");
        fs::create_dir(tmp.path().join("dist")).expect("mkdir");
        fs::create_dir(tmp.path().join("src")).expect("mkdir");

        let filter = ExcludeFilter::new(&["**/node_modules", "dist"]);
        let listed = names(list_children(tmp.path(), &filter));
        assert_eq!(listed, ["src".to_string()].into_iter().collect());
    }

    #[test]
    fn invalid_globs_are_skipped() {
        let filter = ExcludeFilter::new(&["a[", "target"]);
        assert!(filter.is_excluded(Path::new("/w/target"), "target"));
        assert!(!filter.is_excluded(Path::new("/w/src"), "src"));
    }

    #[test]
    fn missing_directory_lists_nothing() {
        let tmp = TempDir::new().expect("tmp");
        assert!(list_children(&tmp.path().join("gone"), &ExcludeFilter::default()).is_empty());
    }
}
