//! Core domain types shared by discovery, storage, and the CLI.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

use crate::utils::dir_label;

/// Manifest file whose `scripts` map feeds the script tree.
pub const MANIFEST_FILE: &str = "package.json";

/// Where a script entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Parsed from a `package.json` `scripts` map.
    Manifest,
    /// Added by the user and kept in the override cache.
    Override,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Manifest => "manifest",
            Origin::Override => "override",
        }
    }
}

/// A runnable script under a root directory.
///
/// Identity within a root is `(root_path, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptEntry {
    pub name: String,
    pub command: String,
    pub root_path: PathBuf,
    pub origin: Origin,
    /// Mutations on this entry are written through to the override cache.
    pub persisted: bool,
    pub collapsible: bool,
}

impl ScriptEntry {
    pub fn manifest(root_path: &Path, name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            root_path: root_path.to_path_buf(),
            origin: Origin::Manifest,
            persisted: false,
            collapsible: false,
        }
    }

    pub fn persisted_override(
        root_path: &Path,
        name: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            root_path: root_path.to_path_buf(),
            origin: Origin::Override,
            persisted: true,
            collapsible: false,
        }
    }

    /// Shell line that runs this entry from its root directory.
    ///
    /// Manifest scripts go through `npm run` so `node_modules/.bin` is on the
    /// path; override entries are sent verbatim.
    pub fn shell_line(&self) -> String {
        match self.origin {
            Origin::Manifest => format!("npm run {}", self.name),
            Origin::Override => self.command.clone(),
        }
    }
}

/// A directory node: a workspace root, or a subdirectory in tree mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderEntry {
    pub display_name: String,
    pub path: PathBuf,
    pub has_manifest: bool,
    pub expanded: bool,
}

impl FolderEntry {
    pub fn root(path: &Path, has_manifest: bool) -> Self {
        Self { display_name: dir_label(path), path: path.to_path_buf(), has_manifest, expanded: true }
    }
}

/// Node handed to the view layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Folder(FolderEntry),
    Script(ScriptEntry),
}

impl Entry {
    pub fn label(&self) -> &str {
        match self {
            Entry::Folder(folder) => &folder.display_name,
            Entry::Script(script) => &script.name,
        }
    }

    pub fn as_script(&self) -> Option<&ScriptEntry> {
        match self {
            Entry::Script(script) => Some(script),
            Entry::Folder(_) => None,
        }
    }

    pub fn as_folder(&self) -> Option<&FolderEntry> {
        match self {
            Entry::Folder(folder) => Some(folder),
            Entry::Script(_) => None,
        }
    }
}

/// Runtime configuration.
///
/// Field aliases accept the camelCase names used by editor settings files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(alias = "terminalAutoShow")]
    pub terminal_auto_show: bool,

    /// Write user-added scripts through to the override cache.
    #[serde(alias = "enablePersistedScriptCache")]
    pub enable_persisted_script_cache: bool,

    /// Snapshot every resolved script list into the override cache.
    #[serde(alias = "persistDiscoveredScriptsToStorage")]
    pub persist_discovered_scripts_to_storage: bool,

    #[serde(alias = "treeModeEnabled")]
    pub tree_mode_enabled: bool,

    #[serde(alias = "directoryExcludeGlobs", deserialize_with = "string_or_list")]
    pub directory_exclude_globs: Vec<String>,

    #[serde(alias = "nvmInstallPath")]
    pub nvm_install_path: Option<PathBuf>,

    #[serde(alias = "storagePath")]
    pub storage_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            terminal_auto_show: true,
            enable_persisted_script_cache: true,
            persist_discovered_scripts_to_storage: false,
            tree_mode_enabled: false,
            directory_exclude_globs: default_exclude_globs().iter().map(|s| s.to_string()).collect(),
            nvm_install_path: None,
            storage_path: None,
        }
    }
}

pub fn default_exclude_globs() -> &'static [&'static str] {
    &["**/node_modules", "**/.git"]
}

/// Accept either a list of strings or a single comma-separated string.
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        One(String),
        Many(Vec<String>),
    }

    let parts = match Raw::deserialize(deserializer)? {
        Raw::One(s) => s.split(',').map(str::to_string).collect::<Vec<_>>(),
        Raw::Many(list) => list,
    };
    Ok(parts.into_iter().map(|p| p.trim().to_string()).filter(|p| !p.is_empty()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_entries_run_through_npm() {
        let entry = ScriptEntry::manifest(Path::new("/w"), "build", "tsc -p .");
        assert_eq!(entry.shell_line(), "npm run build");
        assert!(!entry.persisted);
    }

    #[test]
    fn override_entries_run_verbatim() {
        let entry = ScriptEntry::persisted_override(Path::new("/w"), "deploy", "./deploy.sh");
        assert_eq!(entry.shell_line(), "./deploy.sh");
        assert!(entry.persisted);
        assert_eq!(entry.origin, Origin::Override);
    }

    #[test]
    fn config_accepts_camel_case_and_csv_globs() {
        let cfg: Config = serde_json::from_str(
            r#"{"treeModeEnabled": true, "directoryExcludeGlobs": "dist, build ,"}"#,
        )
        .expect("config");
        assert!(cfg.tree_mode_enabled);
        assert!(cfg.terminal_auto_show);
        assert_eq!(cfg.directory_exclude_globs, vec!["dist", "build"]);
    }
}
