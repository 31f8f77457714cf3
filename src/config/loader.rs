//! Config file loading

use crate::domain::Config;
use anyhow::{Context, Result};
use figment::providers::{Env, Serialized};
use figment::Figment;
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix for environment overrides, e.g. `SCRIPTS_RUN_TREE_MODE_ENABLED=true`.
pub const ENV_PREFIX: &str = "SCRIPTS_RUN_";

const SECTION: &str = "scripts-run";

pub fn load_config(root: &Path, config_path: Option<&Path>) -> Result<Config> {
    let file_config = load_file_config(root, config_path)?;
    apply_env_overrides(file_config)
}

fn load_file_config(root: &Path, config_path: Option<&Path>) -> Result<Config> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(root),
    };

    let Some(config_file) = discovered else {
        return Ok(Config::default());
    };

    let content = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "toml" => parse_toml_config(&content, &config_file),
        "yaml" | "yml" => parse_yaml_config(&content, &config_file),
        other => Err(anyhow::anyhow!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        )),
    };

    match parsed {
        Ok(cfg) => {
            tracing::debug!("Loaded config from {}", config_file.display());
            Ok(cfg)
        }
        Err(e) if config_path_provided => Err(e),
        Err(e) => {
            // Auto-discovered files never block a run.
            tracing::warn!(
                "Failed to parse auto-discovered config {}: {:#}",
                config_file.display(),
                e
            );
            Ok(Config::default())
        }
    }
}

/// Layer `SCRIPTS_RUN_*` environment variables over `config`.
pub fn apply_env_overrides(config: Config) -> Result<Config> {
    Figment::from(Serialized::defaults(config))
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()
        .context("Invalid SCRIPTS_RUN_* environment override")
}

/// Parse TOML config, supporting a nested `[scripts-run]` section.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    config_val.try_into().with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

/// Parse YAML config, supporting a nested `scripts-run` section.
fn parse_yaml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    let config_val = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    serde_yaml::from_value(config_val)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}

fn discover_config(root: &Path) -> Option<PathBuf> {
    let candidates =
        ["scripts-run.toml", ".scripts-run.toml", "scripts-run.yml", ".scripts-run.yml", "scripts-run.yaml"];

    candidates.iter().map(|candidate| root.join(candidate)).find(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_defaults_when_missing() {
        let tmp = TempDir::new().expect("tmp");
        let cfg = load_file_config(tmp.path(), None).expect("config");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_load_toml_config() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join("scripts-run.toml"),
            "tree_mode_enabled = true\nterminal_auto_show = false\nnvm_install_path = '/opt/nvm'\n",
        )
        .expect("write");

        let cfg = load_file_config(tmp.path(), None).expect("config");
        assert!(cfg.tree_mode_enabled);
        assert!(!cfg.terminal_auto_show);
        assert_eq!(cfg.nvm_install_path, Some(PathBuf::from("/opt/nvm")));
        assert!(cfg.enable_persisted_script_cache);
    }

    #[test]
    fn test_nested_toml_section() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join(".scripts-run.toml"),
            "[scripts-run]\ndirectoryExcludeGlobs = ['**/dist']\n",
        )
        .expect("write");

        let cfg = load_file_config(tmp.path(), None).expect("config");
        assert_eq!(cfg.directory_exclude_globs, vec!["**/dist"]);
    }

    #[test]
    fn test_yaml_config_with_csv_globs() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join("scripts-run.yml"),
            "persistDiscoveredScriptsToStorage: true\ndirectory_exclude_globs: \"dist, build ,  node_modules\"\n",
        )
        .expect("write");

        let cfg = load_file_config(tmp.path(), None).expect("config");
        assert!(cfg.persist_discovered_scripts_to_storage);
        assert_eq!(cfg.directory_exclude_globs, vec!["dist", "build", "node_modules"]);
    }

    #[test]
    fn test_explicit_config_invalid_type_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "tree_mode_enabled = 'sometimes'\n").expect("write");

        let result = load_file_config(tmp.path(), Some(&path));
        assert!(result.is_err(), "explicit config with invalid type should return Err");
    }

    #[test]
    fn test_explicit_config_unsupported_extension_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("settings.ini");
        fs::write(&path, "a=b\n").expect("write");

        assert!(load_file_config(tmp.path(), Some(&path)).is_err());
    }

    #[test]
    fn test_auto_discovered_invalid_type_returns_default() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("scripts-run.toml"), "directory_exclude_globs = 123\n")
            .expect("write");

        let cfg = load_file_config(tmp.path(), None).expect("should not error on auto-discovery");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_env_overlay_keeps_file_values_without_env() {
        let cfg = Config { tree_mode_enabled: true, ..Config::default() };
        let merged = apply_env_overrides(cfg.clone()).expect("merge");
        assert_eq!(merged.tree_mode_enabled, cfg.tree_mode_enabled);
        assert_eq!(merged.directory_exclude_globs, cfg.directory_exclude_globs);
    }
}
