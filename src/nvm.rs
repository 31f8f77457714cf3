//! Node version discovery through an nvm install directory.

use crate::utils::home_dir;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::Command;
use walkdir::WalkDir;

/// Pseudo-version meaning "whatever node is on PATH outside nvm".
pub const SYSTEM_VERSION: &str = "system";

static NVM_PATH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.?nvm").expect("valid regex"));
static VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"v?\d+(?:\.\d+)*").expect("valid regex"));
static NOT_FOUND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"node\s*not\s*found").expect("valid regex"));

/// A version row for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionItem {
    pub label: String,
    pub active: bool,
}

/// nvm install directory: `$NVM_DIR`, else `~/.nvm`.
pub fn default_install_path() -> PathBuf {
    if let Some(dir) = std::env::var_os("NVM_DIR") {
        return PathBuf::from(dir);
    }
    home_dir().unwrap_or_else(|| PathBuf::from("~")).join(".nvm")
}

fn install_path_or_default(install_path: Option<&Path>) -> PathBuf {
    install_path.map(Path::to_path_buf).unwrap_or_else(default_install_path)
}

/// `["system", ...installed versions]`, installed versions sorted by name.
pub fn list_versions(install_path: Option<&Path>) -> Vec<String> {
    let versions_dir = install_path_or_default(install_path).join("versions").join("node");
    let mut installed: Vec<String> = WalkDir::new(&versions_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .collect();
    installed.sort();
    tracing::debug!("Found {} node versions in {}", installed.len(), versions_dir.display());

    let mut versions = vec![SYSTEM_VERSION.to_string()];
    versions.extend(installed);
    versions
}

/// Output of `node -v`, trimmed; empty when node cannot be run.
pub fn current_node_version() -> String {
    match Command::new("node").arg("-v").output() {
        Ok(output) if output.status.success() => {
            String::from_utf8_lossy(&output.stdout).trim().to_string()
        }
        Ok(output) => {
            tracing::debug!("node -v exited with {}", output.status);
            String::new()
        }
        Err(e) => {
            tracing::debug!("node -v failed: {}", e);
            String::new()
        }
    }
}

/// Which node `which node` resolves to: an nvm version, `system`, or empty.
pub fn which_node() -> String {
    match Command::new("which").arg("node").output() {
        Ok(output) if output.status.success() => {
            classify_node_path(&String::from_utf8_lossy(&output.stdout))
        }
        _ => String::new(),
    }
}

fn classify_node_path(which_output: &str) -> String {
    if which_output.trim().is_empty() || NOT_FOUND_RE.is_match(which_output) {
        return String::new();
    }
    if NVM_PATH_RE.is_match(which_output) {
        if let Some(found) = VERSION_RE.find(which_output) {
            return found.as_str().to_string();
        }
    }
    SYSTEM_VERSION.to_string()
}

/// Mark the version that is currently running.
///
/// When `current` is one of the listed versions it is matched, otherwise
/// `system` is.
pub fn version_items(versions: &[String], current: &str) -> Vec<VersionItem> {
    let target =
        if !current.is_empty() && versions.iter().any(|v| v == current) { current } else { SYSTEM_VERSION };
    let pattern = Regex::new(&format!("^v?{}", regex::escape(target)));
    versions
        .iter()
        .map(|v| VersionItem {
            label: v.clone(),
            active: pattern.as_ref().map(|re| re.is_match(v)).unwrap_or(false),
        })
        .collect()
}

/// Shell prefix that switches the active node version.
pub fn activation_command(install_path: Option<&Path>, version: &str) -> String {
    let script = install_path_or_default(install_path).join("nvm.sh");
    format!(". \"{}\" && nvm use {}", script.display(), version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn lists_system_then_installed_versions() {
        let tmp = TempDir::new().expect("tmp");
        for v in ["v20.11.0", "v18.19.0"] {
            fs::create_dir_all(tmp.path().join("versions/node").join(v)).expect("mkdir");
        }
        fs::write(tmp.path().join("versions/node/.DS_Store"), "").expect("write");

        let versions = list_versions(Some(tmp.path()));
        assert_eq!(versions, vec!["system", "v18.19.0", "v20.11.0"]);
    }

    #[test]
    fn missing_install_lists_only_system() {
        let tmp = TempDir::new().expect("tmp");
        assert_eq!(list_versions(Some(&tmp.path().join("none"))), vec!["system"]);
    }

    #[test]
    fn marks_running_version_when_installed() {
        let versions: Vec<String> =
            ["system", "v18.19.0", "v20.11.0"].iter().map(|s| s.to_string()).collect();
        let items = version_items(&versions, "v20.11.0");
        let active: Vec<&str> = items.iter().filter(|i| i.active).map(|i| i.label.as_str()).collect();
        assert_eq!(active, vec!["v20.11.0"]);
    }

    #[test]
    fn falls_back_to_system_when_running_version_unknown() {
        let versions: Vec<String> = ["system", "v18.19.0"].iter().map(|s| s.to_string()).collect();
        for current in ["v21.0.0", ""] {
            let items = version_items(&versions, current);
            let active: Vec<&str> =
                items.iter().filter(|i| i.active).map(|i| i.label.as_str()).collect();
            assert_eq!(active, vec!["system"]);
        }
    }

    #[test]
    fn classifies_which_output() {
        assert_eq!(classify_node_path("/home/u/.nvm/versions/node/v18.19.0/bin/node\n"), "v18.19.0");
        assert_eq!(classify_node_path("/usr/bin/node\n"), "system");
        assert_eq!(classify_node_path("node not found"), "");
        assert_eq!(classify_node_path(""), "");
    }

    #[test]
    fn activation_sources_nvm_script() {
        let cmd = activation_command(Some(Path::new("/opt/nvm")), "v18.19.0");
        assert_eq!(cmd, ". \"/opt/nvm/nvm.sh\" && nvm use v18.19.0");
    }
}
