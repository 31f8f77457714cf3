//! Validation for user-supplied script names and commands.

use crate::error::{Result, ScriptsError};

/// Names must be non-empty and free of whitespace.
pub fn validate_script_name(name: &str) -> Result<()> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(ScriptsError::InvalidName(name.to_string()));
    }
    Ok(())
}

pub fn validate_command(command: &str) -> Result<()> {
    if command.trim().is_empty() {
        return Err(ScriptsError::EmptyCommand);
    }
    Ok(())
}
