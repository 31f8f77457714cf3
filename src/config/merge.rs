//! CLI flag overrides applied on top of file and environment config.

use crate::domain::Config;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub tree_mode: Option<bool>,
    pub exclude_globs: Option<Vec<String>>,
    pub storage_path: Option<PathBuf>,
    pub nvm_install_path: Option<PathBuf>,
    pub hide_terminal: bool,
    pub no_cache_writes: bool,
}

pub fn merge_cli_with_config(mut config: Config, cli: CliOverrides) -> Config {
    if let Some(tree_mode) = cli.tree_mode {
        config.tree_mode_enabled = tree_mode;
    }
    if let Some(globs) = cli.exclude_globs {
        config.directory_exclude_globs = globs;
    }
    if cli.storage_path.is_some() {
        config.storage_path = cli.storage_path;
    }
    if cli.nvm_install_path.is_some() {
        config.nvm_install_path = cli.nvm_install_path;
    }
    if cli.hide_terminal {
        config.terminal_auto_show = false;
    }
    if cli.no_cache_writes {
        config.enable_persisted_script_cache = false;
    }
    config
}
