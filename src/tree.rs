//! Script tree: merges override-cache entries with manifest scripts per root,
//! memoizes the result, and applies add/delete mutations.

use crate::domain::{Config, Entry, FolderEntry, ScriptEntry, MANIFEST_FILE};
use crate::error::{Result, ScriptsError};
use crate::scan::{self, ExcludeFilter};
use crate::store::{OverrideStore, StorageItem};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Called after every change that should trigger a re-render.
pub type RefreshListener = Box<dyn Fn()>;

pub struct ScriptTree {
    roots: Vec<PathBuf>,
    config: Config,
    exclude: ExcludeFilter,
    store: OverrideStore,
    cache: HashMap<PathBuf, Vec<ScriptEntry>>,
    listeners: Vec<RefreshListener>,
}

impl ScriptTree {
    pub fn new(roots: Vec<PathBuf>, config: Config, store: OverrideStore) -> Self {
        let exclude = ExcludeFilter::new(&config.directory_exclude_globs);
        Self { roots, config, exclude, store, cache: HashMap::new(), listeners: Vec::new() }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &OverrideStore {
        &self.store
    }

    /// Register a refresh callback.
    pub fn on_refresh(&mut self, listener: impl Fn() + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener();
        }
    }

    /// One folder node per workspace root.
    pub fn list_roots(&self) -> Vec<FolderEntry> {
        self.roots
            .iter()
            .map(|root| FolderEntry::root(root, scan::path_exists(&root.join(MANIFEST_FILE))))
            .collect()
    }

    /// Children of `node`, or the roots when `node` is `None`.
    pub fn list_children(&mut self, node: Option<&Entry>) -> Vec<Entry> {
        match node {
            None => self.list_roots().into_iter().map(Entry::Folder).collect(),
            Some(Entry::Script(_)) => Vec::new(),
            Some(Entry::Folder(folder)) => self.folder_children(&folder.path),
        }
    }

    fn folder_children(&mut self, dir: &Path) -> Vec<Entry> {
        let names = scan::list_children(dir, &self.exclude);
        let mut children = Vec::new();

        if names.iter().any(|name| name == MANIFEST_FILE) {
            children.extend(self.resolve_scripts(dir).into_iter().map(Entry::Script));
        }

        if self.config.tree_mode_enabled {
            // Only the first displayed folder starts expanded.
            let mut expanded = true;
            for name in names.iter().filter(|name| *name != MANIFEST_FILE) {
                let path = dir.join(name);
                if !scan::is_directory(&path) || !self.subtree_has_scripts(&path) {
                    continue;
                }
                let has_manifest = scan::path_exists(&path.join(MANIFEST_FILE));
                children.push(Entry::Folder(FolderEntry {
                    display_name: name.clone(),
                    path,
                    has_manifest,
                    expanded,
                }));
                expanded = false;
            }
        }

        children
    }

    /// Whether expanding `dir` in tree mode would show anything.
    fn subtree_has_scripts(&self, dir: &Path) -> bool {
        let names = scan::list_children(dir, &self.exclude);
        if names.iter().any(|name| name == MANIFEST_FILE) {
            let has_scripts = match self.cache.get(dir) {
                Some(cached) => !cached.is_empty(),
                None => {
                    !self.store.entries(dir).is_empty()
                        || !scan::read_manifest_scripts(dir).is_empty()
                }
            };
            if has_scripts {
                return true;
            }
        }
        names
            .iter()
            .filter(|name| *name != MANIFEST_FILE)
            .map(|name| dir.join(name))
            .any(|path| scan::is_directory(&path) && self.subtree_has_scripts(&path))
    }

    /// Merged script list for `dir`: persisted overrides first, then manifest scripts.
    ///
    /// Cached until [`ScriptTree::reload`]; a cache hit never touches the disk.
    pub fn resolve_scripts(&mut self, dir: &Path) -> Vec<ScriptEntry> {
        if let Some(cached) = self.cache.get(dir) {
            return cached.clone();
        }

        let manifest = scan::read_manifest_scripts(dir);
        let snapshot = self.config.persist_discovered_scripts_to_storage;

        let mut scripts: Vec<ScriptEntry> = self
            .store
            .entries(dir)
            .into_iter()
            // A snapshot stores manifest scripts too; the live manifest copy wins.
            .filter(|item| !snapshot || !manifest.iter().any(|m| m.name == item.k))
            .map(|item| ScriptEntry::persisted_override(dir, item.k, item.v))
            .collect();
        scripts.extend(manifest);

        if snapshot {
            let items =
                scripts.iter().map(|s| StorageItem::new(s.name.as_str(), s.command.as_str())).collect();
            if let Err(e) = self.store.replace_root(dir, items) {
                tracing::warn!("Failed to snapshot scripts for {}: {}", dir.display(), e);
            }
        }

        tracing::debug!("Resolved {} scripts for {}", scripts.len(), dir.display());
        self.cache.insert(dir.to_path_buf(), scripts.clone());
        scripts
    }

    /// Find a script by name under `dir`.
    pub fn find(&mut self, dir: &Path, name: &str) -> Option<ScriptEntry> {
        self.resolve_scripts(dir).into_iter().find(|s| s.name == name)
    }

    /// Add a user script at the front of `dir`'s list.
    ///
    /// Fails without touching memory or disk when the name is already taken.
    pub fn add(&mut self, dir: &Path, name: &str, command: &str) -> Result<ScriptEntry> {
        if self.resolve_scripts(dir).iter().any(|s| s.name == name) {
            tracing::warn!("Script '{}' already exists in {}", name, dir.display());
            return Err(ScriptsError::DuplicateName {
                name: name.to_string(),
                root: dir.to_path_buf(),
            });
        }

        let entry = ScriptEntry::persisted_override(dir, name, command);
        if self.config.enable_persisted_script_cache {
            self.store.upsert(dir, name, command)?;
        }
        self.cache.entry(dir.to_path_buf()).or_default().insert(0, entry.clone());
        tracing::info!("Added script '{}' to {}", name, dir.display());
        self.notify();
        Ok(entry)
    }

    /// Remove `entry`, matching on name and origin. Returns `false` when absent.
    pub fn delete(&mut self, entry: &ScriptEntry) -> Result<bool> {
        let Some(list) = self.cache.get_mut(&entry.root_path) else {
            return Ok(false);
        };
        let Some(idx) = list.iter().position(|s| s.name == entry.name && s.origin == entry.origin)
        else {
            return Ok(false);
        };
        let removed = list.remove(idx);
        if removed.persisted {
            self.store.remove(&removed.root_path, &removed.name)?;
        }
        tracing::info!("Deleted script '{}' from {}", removed.name, removed.root_path.display());
        self.notify();
        Ok(true)
    }

    /// Drop every script shown under `dir` and clear its persisted list.
    pub fn delete_all(&mut self, dir: &Path) -> Result<()> {
        self.cache.insert(dir.to_path_buf(), Vec::new());
        self.store.clear_root(dir)?;
        tracing::info!("Deleted all scripts from {}", dir.display());
        self.notify();
        Ok(())
    }

    /// Forget every cached root; the next listing re-reads the disk.
    pub fn reload(&mut self) {
        self.cache.clear();
        self.notify();
    }
}
