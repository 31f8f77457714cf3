//! Workspace setup shared by every subcommand: roots, config, override store.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use super::utils::parse_csv;
use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::domain::{Config, Entry, FolderEntry, ScriptEntry, MANIFEST_FILE};
use crate::scan;
use crate::store::OverrideStore;
use crate::tree::ScriptTree;
use crate::utils::default_storage_path;

#[derive(Args, Debug, Clone, Default)]
pub struct WorkspaceArgs {
    /// Workspace folder (repeatable; defaults to the current directory)
    #[arg(short = 'r', long = "root", value_name = "PATH", global = true)]
    pub roots: Vec<PathBuf>,

    /// Config file (TOML or YAML); auto-discovered in the first root otherwise
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Override cache file location
    #[arg(long, value_name = "FILE", global = true)]
    pub storage: Option<PathBuf>,

    /// Show script-bearing subdirectories as folders
    #[arg(long, global = true)]
    pub tree: bool,

    /// Exclude directories matching these globs (comma-separated)
    #[arg(short = 'e', long, value_name = "GLOBS", global = true)]
    pub exclude_glob: Option<String>,

    /// nvm install directory (defaults to $NVM_DIR or ~/.nvm)
    #[arg(long, value_name = "DIR", global = true)]
    pub nvm_dir: Option<PathBuf>,

    /// Discard terminal output
    #[arg(long, global = true)]
    pub hide_terminal: bool,

    /// Keep added scripts in memory only
    #[arg(long, global = true)]
    pub no_cache_writes: bool,
}

impl WorkspaceArgs {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            tree_mode: self.tree.then_some(true),
            exclude_globs: parse_csv(&self.exclude_glob),
            storage_path: self.storage.clone(),
            nvm_install_path: self.nvm_dir.clone(),
            hide_terminal: self.hide_terminal,
            no_cache_writes: self.no_cache_writes,
        }
    }
}

pub struct Workspace {
    pub tree: ScriptTree,
    pub config: Config,
}

/// Resolve roots and effective configuration.
pub fn load_settings(args: &WorkspaceArgs) -> Result<(Vec<PathBuf>, Config)> {
    let roots = resolve_roots(&args.roots)?;
    let config = load_config(&roots[0], args.config.as_deref())?;
    Ok((roots, merge_cli_with_config(config, args.overrides())))
}

pub fn open(args: &WorkspaceArgs) -> Result<Workspace> {
    let (roots, config) = load_settings(args)?;
    let storage = match &config.storage_path {
        Some(path) => path.clone(),
        None => default_storage_path()
            .context("Cannot determine a data directory for the override cache; pass --storage")?,
    };
    tracing::debug!("Using override cache {}", storage.display());
    let tree = ScriptTree::new(roots, config.clone(), OverrideStore::new(storage));
    Ok(Workspace { tree, config })
}

fn resolve_roots(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let candidates = if paths.is_empty() {
        vec![std::env::current_dir().context("Cannot read the current directory")?]
    } else {
        paths.to_vec()
    };

    let mut roots = Vec::with_capacity(candidates.len());
    for path in candidates {
        let canonical = path
            .canonicalize()
            .with_context(|| format!("Path does not exist: {}", path.display()))?;
        if !canonical.is_dir() {
            anyhow::bail!("Path is not a directory: {}", path.display());
        }
        if !roots.contains(&canonical) {
            roots.push(canonical);
        }
    }
    Ok(roots)
}

/// Directory a mutation targets: `--dir` if given, else the first root.
pub fn target_dir(tree: &ScriptTree, dir: Option<&Path>) -> Result<PathBuf> {
    match dir {
        Some(dir) => dir
            .canonicalize()
            .with_context(|| format!("Path does not exist: {}", dir.display())),
        None => tree.roots().first().cloned().context("No workspace root"),
    }
}

/// Scripts are only listed for folders holding a manifest; refuse to add
/// anywhere else.
pub fn require_manifest(dir: &Path) -> Result<()> {
    if !scan::path_exists(&dir.join(MANIFEST_FILE)) {
        anyhow::bail!(
            "No {} in {}; scripts added there would never be listed",
            MANIFEST_FILE,
            dir.display()
        );
    }
    Ok(())
}

/// Depth-first walk over every node below the roots.
pub fn walk_entries(tree: &mut ScriptTree) -> Vec<Entry> {
    let mut out = Vec::new();
    let mut stack: Vec<Entry> = tree.list_children(None).into_iter().rev().collect();
    while let Some(entry) = stack.pop() {
        stack.extend(tree.list_children(Some(&entry)).into_iter().rev());
        out.push(entry);
    }
    out
}

pub fn all_scripts(tree: &mut ScriptTree) -> Vec<ScriptEntry> {
    walk_entries(tree).into_iter().filter_map(|e| e.as_script().cloned()).collect()
}

/// Roots plus every folder holding a manifest.
pub fn script_dirs(tree: &mut ScriptTree) -> Vec<FolderEntry> {
    let mut dirs: Vec<FolderEntry> = Vec::new();
    for folder in walk_entries(tree).into_iter().filter_map(|e| e.as_folder().cloned()) {
        let is_root = tree.roots().contains(&folder.path);
        if (is_root || folder.has_manifest) && !dirs.iter().any(|d| d.path == folder.path) {
            dirs.push(folder);
        }
    }
    dirs
}
