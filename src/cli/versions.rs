//! Versions command implementation

use anyhow::Result;
use clap::Args;
use console::style;

use super::workspace::{self, WorkspaceArgs};
use crate::nvm;

#[derive(Args)]
pub struct VersionsArgs {
    /// Print versions as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: VersionsArgs, workspace_args: &WorkspaceArgs) -> Result<()> {
    let (_, config) = workspace::load_settings(workspace_args)?;
    let versions = nvm::list_versions(config.nvm_install_path.as_deref());
    let current = nvm::current_node_version();
    let items = nvm::version_items(&versions, &current);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    for item in &items {
        if item.active {
            println!("{} {}", style("●").green(), style(&item.label).bold());
        } else {
            println!("  {}", item.label);
        }
    }

    let node = if current.is_empty() { "not found".to_string() } else { current };
    let which = nvm::which_node();
    if which.is_empty() {
        println!("node: {node}");
    } else {
        println!("node: {node} ({which})");
    }
    Ok(())
}
