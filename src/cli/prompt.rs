//! Interactive prompts for script names and commands.

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use crate::input::{validate_command, validate_script_name};

/// Ask for a script name until it is non-empty and whitespace-free.
pub fn script_name() -> Result<String> {
    let name = Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("Script name")
        .validate_with(|input: &String| -> Result<(), String> {
            validate_script_name(input).map_err(|e| e.to_string())
        })
        .interact_text()?;
    Ok(name)
}

/// Ask for a command until it is non-empty.
pub fn script_command() -> Result<String> {
    let command = Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("Command")
        .validate_with(|input: &String| -> Result<(), String> {
            validate_command(input).map_err(|e| e.to_string())
        })
        .interact_text()?;
    Ok(command.trim().to_string())
}

pub fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}
