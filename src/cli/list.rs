//! List command implementation

use anyhow::Result;
use clap::Args;
use console::style;
use serde_json::{json, Value};

use super::workspace::{self, Workspace, WorkspaceArgs};
use crate::domain::{Entry, Origin};
use crate::tree::ScriptTree;

#[derive(Args)]
pub struct ListArgs {
    /// Print the tree as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ListArgs, workspace_args: &WorkspaceArgs) -> Result<()> {
    let Workspace { mut tree, .. } = workspace::open(workspace_args)?;

    if args.json {
        let roots = tree.list_children(None);
        let nodes: Vec<Value> = roots.iter().map(|root| entry_json(&mut tree, root)).collect();
        println!("{}", serde_json::to_string_pretty(&nodes)?);
        return Ok(());
    }

    for line in render_tree(&mut tree) {
        println!("{line}");
    }
    Ok(())
}

/// Text rendering of every root and its children.
pub fn render_tree(tree: &mut ScriptTree) -> Vec<String> {
    let mut lines = Vec::new();
    for root in tree.list_children(None) {
        let Some(folder) = root.as_folder() else {
            continue;
        };
        let note = if folder.has_manifest { String::new() } else { " (no package.json)".to_string() };
        lines.push(format!(
            "{}/ {}{}",
            style(&folder.display_name).bold(),
            style(folder.path.display()).dim(),
            note
        ));
        let before = lines.len();
        walk_tree(tree, &root, "", &mut lines);
        if lines.len() == before {
            lines.push("└── (no scripts)".to_string());
        }
    }
    lines
}

fn walk_tree(tree: &mut ScriptTree, node: &Entry, prefix: &str, lines: &mut Vec<String>) {
    let children = tree.list_children(Some(node));
    let total_entries = children.len();
    for (idx, child) in children.iter().enumerate() {
        let is_last = idx == total_entries - 1;
        let connector = if is_last { "└── " } else { "├── " };

        match child {
            Entry::Script(script) => {
                let tag = match script.origin {
                    Origin::Override => " (override)",
                    Origin::Manifest => "",
                };
                lines.push(format!(
                    "{}{}{}  {}{}",
                    prefix,
                    connector,
                    style(&script.name).cyan(),
                    script.command,
                    tag
                ));
            }
            Entry::Folder(folder) => {
                let marker = if folder.expanded { "▾" } else { "▸" };
                lines.push(format!("{}{}{} {}/", prefix, connector, marker, folder.display_name));
                let extension = if is_last { "    " } else { "│   " };
                walk_tree(tree, child, &format!("{}{}", prefix, extension), lines);
            }
        }
    }
}

fn entry_json(tree: &mut ScriptTree, entry: &Entry) -> Value {
    match entry {
        Entry::Script(script) => json!({
            "type": "script",
            "name": script.name,
            "command": script.command,
            "origin": script.origin,
            "persisted": script.persisted,
            "root": script.root_path,
        }),
        Entry::Folder(folder) => {
            let children: Vec<Value> =
                tree.list_children(Some(entry)).iter().map(|child| entry_json(tree, child)).collect();
            json!({
                "type": "folder",
                "name": folder.display_name,
                "path": folder.path,
                "has_manifest": folder.has_manifest,
                "expanded": folder.expanded,
                "children": children,
            })
        }
    }
}
