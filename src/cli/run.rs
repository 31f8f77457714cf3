//! Run command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use super::workspace::{self, Workspace, WorkspaceArgs};
use crate::terminal::Session;

#[derive(Args)]
pub struct RunArgs {
    /// Name of the script to run
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Activate this node version through nvm first
    #[arg(long, value_name = "VERSION")]
    pub node: Option<String>,

    /// Directory holding the script (defaults to the first root)
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

pub fn run(args: RunArgs, workspace_args: &WorkspaceArgs) -> Result<()> {
    let Workspace { mut tree, config } = workspace::open(workspace_args)?;
    let dir = workspace::target_dir(&tree, args.dir.as_deref())?;

    let entry = tree
        .find(&dir, &args.name)
        .with_context(|| format!("No script named '{}' in {}", args.name, dir.display()))?;

    let mut session = Session::new(&config);
    if let Some(version) = args.node {
        session.select_version(version);
    }
    session.run(&entry)?;

    let code = session.close()?;
    if code != 0 {
        anyhow::bail!("Script '{}' exited with status {}", entry.name, code);
    }
    Ok(())
}
