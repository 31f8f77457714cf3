//! Override cache: a single JSON document mapping root paths to user scripts.
//!
//! Every mutation reads the whole document, edits it in memory, and rewrites
//! the file in full. There is no locking, so two processes mutating the same
//! file concurrently can lose one side's update.

use crate::error::{Result, ScriptsError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// One persisted script: `k` is the name, `v` the command text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageItem {
    pub k: String,
    pub v: String,
}

impl StorageItem {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self { k: name.into(), v: command.into() }
    }
}

/// Root path (as supplied) to most-recent-first script list.
pub type OverrideDocument = BTreeMap<String, Vec<StorageItem>>;

#[derive(Debug, Clone)]
pub struct OverrideStore {
    path: PathBuf,
}

impl OverrideStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document. Missing or malformed files read as empty.
    pub fn load(&self) -> OverrideDocument {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("Override cache {} not readable: {}", self.path.display(), e);
                return OverrideDocument::new();
            }
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("Treating malformed override cache {} as empty: {}", self.path.display(), e);
            OverrideDocument::new()
        })
    }

    /// Overwrite the file with `doc`.
    pub fn save(&self, doc: &OverrideDocument) -> Result<()> {
        let write = || -> std::io::Result<()> {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&self.path, serde_json::to_string(doc)?)
        };
        write().map_err(|source| ScriptsError::Storage { path: self.path.clone(), source })
    }

    /// Persisted entries for one root, in stored order.
    pub fn entries(&self, root: &Path) -> Vec<StorageItem> {
        self.load().remove(&root_key(root)).unwrap_or_default()
    }

    /// Record a script under `root`, newest first. Names are not de-duplicated here.
    pub fn upsert(&self, root: &Path, name: &str, command: &str) -> Result<()> {
        let mut doc = self.load();
        doc.entry(root_key(root)).or_default().insert(0, StorageItem::new(name, command));
        tracing::debug!("Persisted script '{}' under {}", name, root.display());
        self.save(&doc)
    }

    /// Drop the first entry named `name` under `root`. Absent root or name is a no-op.
    pub fn remove(&self, root: &Path, name: &str) -> Result<()> {
        let mut doc = self.load();
        let Some(items) = doc.get_mut(&root_key(root)) else {
            return Ok(());
        };
        let Some(idx) = items.iter().position(|item| item.k == name) else {
            return Ok(());
        };
        items.remove(idx);
        self.save(&doc)
    }

    /// Empty the list stored for `root`, keeping the key.
    pub fn clear_root(&self, root: &Path) -> Result<()> {
        self.replace_root(root, Vec::new())
    }

    /// Replace everything stored for `root` with `items`.
    pub fn replace_root(&self, root: &Path, items: Vec<StorageItem>) -> Result<()> {
        let mut doc = self.load();
        doc.insert(root_key(root), items);
        self.save(&doc)
    }
}

/// Document key for a root: the path exactly as supplied.
pub fn root_key(root: &Path) -> String {
    root.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(tmp: &TempDir) -> OverrideStore {
        OverrideStore::new(tmp.path().join("state").join(".manifest.json"))
    }

    #[test]
    fn missing_file_loads_empty() {
        let tmp = TempDir::new().expect("tmp");
        assert!(store(&tmp).load().is_empty());
    }

    #[test]
    fn malformed_file_loads_empty() {
        let tmp = TempDir::new().expect("tmp");
        let store = store(&tmp);
        fs::create_dir_all(store.path().parent().expect("parent")).expect("mkdir");
        fs::write(store.path(), "[1, 2").expect("write");
        assert!(store.load().is_empty());
    }

    #[test]
    fn upsert_creates_root_and_prepends() {
        let tmp = TempDir::new().expect("tmp");
        let store = store(&tmp);
        let root = Path::new("/work/app");

        store.upsert(root, "deploy", "./deploy.sh").expect("upsert");
        store.upsert(root, "lint", "eslint .").expect("upsert");

        assert_eq!(
            store.entries(root),
            vec![StorageItem::new("lint", "eslint ."), StorageItem::new("deploy", "./deploy.sh")]
        );
    }

    #[test]
    fn file_uses_k_v_pairs_keyed_by_root() {
        let tmp = TempDir::new().expect("tmp");
        let store = store(&tmp);
        store.upsert(Path::new("/work/app"), "lint", "eslint .").expect("upsert");

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).expect("read")).expect("json");
        assert_eq!(raw, serde_json::json!({"/work/app": [{"k": "lint", "v": "eslint ."}]}));
    }

    #[test]
    fn remove_drops_first_match_only() {
        let tmp = TempDir::new().expect("tmp");
        let store = store(&tmp);
        let root = Path::new("/work/app");
        store
            .replace_root(
                root,
                vec![
                    StorageItem::new("a", "1"),
                    StorageItem::new("b", "2"),
                    StorageItem::new("a", "3"),
                ],
            )
            .expect("seed");

        store.remove(root, "a").expect("remove");
        assert_eq!(store.entries(root), vec![StorageItem::new("b", "2"), StorageItem::new("a", "3")]);
    }

    #[test]
    fn remove_missing_root_or_name_is_noop() {
        let tmp = TempDir::new().expect("tmp");
        let store = store(&tmp);
        store.remove(Path::new("/nowhere"), "x").expect("remove");
        assert!(!store.path().exists());

        store.upsert(Path::new("/w"), "a", "1").expect("upsert");
        store.remove(Path::new("/w"), "zzz").expect("remove");
        assert_eq!(store.entries(Path::new("/w")).len(), 1);
    }

    #[test]
    fn clear_root_empties_one_root_and_keeps_others() {
        let tmp = TempDir::new().expect("tmp");
        let store = store(&tmp);
        store.upsert(Path::new("/a"), "x", "1").expect("upsert");
        store.upsert(Path::new("/b"), "y", "2").expect("upsert");

        store.clear_root(Path::new("/a")).expect("clear");

        let doc = store.load();
        assert_eq!(doc.get("/a"), Some(&Vec::new()));
        assert_eq!(doc.get("/b").map(Vec::len), Some(1));
    }
}
