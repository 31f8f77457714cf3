//! Add / delete commands.

use anyhow::Result;
use clap::Args;
use console::style;
use std::path::PathBuf;

use super::prompt;
use super::workspace::{self, Workspace, WorkspaceArgs};
use crate::input::{validate_command, validate_script_name};

#[derive(Args)]
pub struct AddArgs {
    /// Script name (no whitespace)
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Command line to run
    #[arg(value_name = "COMMAND")]
    pub command: Option<String>,

    /// Directory to add the script to (defaults to the first root)
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Name of the script to delete
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Directory holding the script (defaults to the first root)
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct DeleteAllArgs {
    /// Directory to clear (defaults to the first root)
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

pub fn add(args: AddArgs, workspace_args: &WorkspaceArgs) -> Result<()> {
    let Workspace { mut tree, .. } = workspace::open(workspace_args)?;
    let dir = workspace::target_dir(&tree, args.dir.as_deref())?;
    workspace::require_manifest(&dir)?;

    let name = match args.name {
        Some(name) => {
            validate_script_name(&name)?;
            name
        }
        None => prompt::script_name()?,
    };
    let command = match args.command {
        Some(command) => {
            validate_command(&command)?;
            command
        }
        None => prompt::script_command()?,
    };

    let entry = tree.add(&dir, &name, &command)?;
    println!("Added {} to {}", style(&entry.name).cyan(), dir.display());
    Ok(())
}

pub fn delete(args: DeleteArgs, workspace_args: &WorkspaceArgs) -> Result<()> {
    let Workspace { mut tree, .. } = workspace::open(workspace_args)?;
    let dir = workspace::target_dir(&tree, args.dir.as_deref())?;

    let Some(entry) = tree.find(&dir, &args.name) else {
        eprintln!("{} no script named '{}' in {}", style("warning:").yellow(), args.name, dir.display());
        return Ok(());
    };
    if tree.delete(&entry)? {
        println!("Deleted {} from {}", style(&entry.name).cyan(), dir.display());
    }
    Ok(())
}

pub fn delete_all(args: DeleteAllArgs, workspace_args: &WorkspaceArgs) -> Result<()> {
    let Workspace { mut tree, .. } = workspace::open(workspace_args)?;
    let dir = workspace::target_dir(&tree, args.dir.as_deref())?;

    if !args.yes && !prompt::confirm(&format!("Delete all scripts in {}?", dir.display()))? {
        return Ok(());
    }
    tree.delete_all(&dir)?;
    println!("Cleared scripts in {}", dir.display());
    Ok(())
}
