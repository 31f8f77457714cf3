//! Interactive script browser.

use anyhow::Result;
use console::style;
use dialoguer::{theme::ColorfulTheme, Select};

use super::prompt;
use super::workspace::{self, Workspace, WorkspaceArgs};
use crate::domain::{FolderEntry, ScriptEntry};
use crate::nvm;
use crate::terminal::Session;
use crate::tree::ScriptTree;

const ACTIONS: &[&str] = &[
    "Run script",
    "Add script",
    "Delete script",
    "Delete all scripts",
    "Reload scripts",
    "Reload node versions",
    "Choose node version",
    "Quit",
];

pub fn run(workspace_args: &WorkspaceArgs) -> Result<()> {
    let Workspace { mut tree, config } = workspace::open(workspace_args)?;
    tree.on_refresh(|| tracing::debug!("Script tree changed"));

    let mut session = Session::new(&config);
    let mut versions = nvm::list_versions(config.nvm_install_path.as_deref());
    let theme = ColorfulTheme::default();

    loop {
        let header = match session.selected_version() {
            Some(version) => format!("scripts-run (node {version})"),
            None => "scripts-run".to_string(),
        };
        let choice =
            Select::with_theme(&theme).with_prompt(header).items(ACTIONS).default(0).interact()?;

        let outcome = match choice {
            0 => run_script(&theme, &mut tree, &mut session),
            1 => add_script(&theme, &mut tree),
            2 => delete_script(&theme, &mut tree),
            3 => delete_all(&theme, &mut tree),
            4 => {
                tree.reload();
                Ok(())
            }
            5 => {
                versions = nvm::list_versions(config.nvm_install_path.as_deref());
                println!("Found {} node versions", versions.len());
                Ok(())
            }
            6 => choose_version(&theme, &versions, &mut session),
            _ => break,
        };

        // Failures are reported and the loop carries on.
        if let Err(e) = outcome {
            eprintln!("{} {:#}", style("error:").red(), e);
        }
    }

    let code = session.close()?;
    if code != 0 {
        tracing::warn!("A terminal exited with status {}", code);
    }
    Ok(())
}

fn pick_script(theme: &ColorfulTheme, tree: &mut ScriptTree) -> Result<Option<ScriptEntry>> {
    let scripts = workspace::all_scripts(tree);
    if scripts.is_empty() {
        println!("No scripts found");
        return Ok(None);
    }
    let labels: Vec<String> = scripts
        .iter()
        .map(|s| format!("{}  {}  [{}]", s.name, s.command, crate::utils::dir_label(&s.root_path)))
        .collect();
    let selected =
        Select::with_theme(theme).with_prompt("Script").items(&labels).default(0).interact_opt()?;
    Ok(selected.and_then(|idx| scripts.get(idx).cloned()))
}

fn pick_dir(theme: &ColorfulTheme, tree: &mut ScriptTree) -> Result<Option<FolderEntry>> {
    let mut dirs = workspace::script_dirs(tree);
    if dirs.len() <= 1 {
        return Ok(dirs.pop());
    }
    let labels: Vec<String> = dirs.iter().map(|d| d.path.display().to_string()).collect();
    let selected =
        Select::with_theme(theme).with_prompt("Folder").items(&labels).default(0).interact_opt()?;
    Ok(selected.and_then(|idx| dirs.get(idx).cloned()))
}

fn run_script(theme: &ColorfulTheme, tree: &mut ScriptTree, session: &mut Session) -> Result<()> {
    if let Some(entry) = pick_script(theme, tree)? {
        session.run(&entry)?;
    }
    Ok(())
}

fn add_script(theme: &ColorfulTheme, tree: &mut ScriptTree) -> Result<()> {
    let Some(dir) = pick_dir(theme, tree)? else {
        return Ok(());
    };
    workspace::require_manifest(&dir.path)?;
    let name = prompt::script_name()?;
    let command = prompt::script_command()?;
    let entry = tree.add(&dir.path, &name, &command)?;
    println!("Added {}", style(&entry.name).cyan());
    Ok(())
}

fn delete_script(theme: &ColorfulTheme, tree: &mut ScriptTree) -> Result<()> {
    if let Some(entry) = pick_script(theme, tree)? {
        tree.delete(&entry)?;
    }
    Ok(())
}

fn delete_all(theme: &ColorfulTheme, tree: &mut ScriptTree) -> Result<()> {
    let Some(dir) = pick_dir(theme, tree)? else {
        return Ok(());
    };
    if prompt::confirm(&format!("Delete all scripts in {}?", dir.path.display()))? {
        tree.delete_all(&dir.path)?;
    }
    Ok(())
}

fn choose_version(theme: &ColorfulTheme, versions: &[String], session: &mut Session) -> Result<()> {
    let items = nvm::version_items(versions, &nvm::current_node_version());
    let labels: Vec<String> = items
        .iter()
        .map(|item| if item.active { format!("{} (active)", item.label) } else { item.label.clone() })
        .collect();
    let default = items.iter().position(|item| item.active).unwrap_or(0);
    let selected = Select::with_theme(theme)
        .with_prompt("Node version")
        .items(&labels)
        .default(default)
        .interact_opt()?;
    if let Some(idx) = selected {
        session.select_version(versions[idx].clone());
    }
    Ok(())
}
