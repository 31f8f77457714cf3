//! `package.json` script extraction.

use crate::domain::{ScriptEntry, MANIFEST_FILE};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    scripts: Option<Map<String, Value>>,
}

/// Scripts declared in `<root>/package.json`, in declaration order.
///
/// A missing or unparsable manifest yields an empty list. Non-string script
/// values are skipped.
pub fn read_manifest_scripts(root: &Path) -> Vec<ScriptEntry> {
    let path = root.join(MANIFEST_FILE);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!("No manifest at {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    let manifest: Manifest = match serde_json::from_str(&content) {
        Ok(manifest) => manifest,
        Err(e) => {
            tracing::warn!("Ignoring unparsable manifest {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    manifest
        .scripts
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(name, value)| match value {
            Value::String(command) => Some(ScriptEntry::manifest(root, name, command)),
            other => {
                tracing::debug!("Skipping non-string script '{}': {}", name, other);
                None
            }
        })
        .collect()
}
