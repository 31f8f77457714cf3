//! Per-session run state: one terminal per root, and which terminals have
//! already received the nvm activation for the selected version.

use super::Terminal;
use crate::domain::{Config, ScriptEntry};
use crate::error::{Result, ScriptsError};
use crate::nvm;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::PathBuf;

pub struct Session {
    terminals: HashMap<String, Terminal>,
    activated: HashMap<String, bool>,
    selected_version: Option<String>,
    nvm_install_path: Option<PathBuf>,
    auto_show: bool,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            terminals: HashMap::new(),
            activated: HashMap::new(),
            selected_version: None,
            nvm_install_path: config.nvm_install_path.clone(),
            auto_show: config.terminal_auto_show,
        }
    }

    pub fn selected_version(&self) -> Option<&str> {
        self.selected_version.as_deref()
    }

    /// Choose the node version later runs activate. Every terminal gets the
    /// new activation on its next run.
    pub fn select_version(&mut self, version: impl Into<String>) {
        let version = version.into();
        tracing::info!("Selected node version {}", version);
        self.selected_version = Some(version);
        self.activated.clear();
    }

    /// Terminal identity for an entry: one per root directory.
    pub fn terminal_name(entry: &ScriptEntry) -> String {
        format!("{} Scripts.Run", entry.root_path.display())
    }

    /// Shell line for `entry`, prefixed with the activation command while
    /// `terminal` has not yet received it for the selected version.
    pub fn command_line(&self, terminal: &str, entry: &ScriptEntry) -> String {
        let line = entry.shell_line();
        match self.pending_activation(terminal) {
            Some(version) => {
                let activation = nvm::activation_command(self.nvm_install_path.as_deref(), version);
                format!("{activation} && {line}")
            }
            None => line,
        }
    }

    fn pending_activation(&self, terminal: &str) -> Option<&str> {
        let version = self.selected_version.as_deref()?;
        (!self.activated.get(terminal).copied().unwrap_or(false)).then_some(version)
    }

    /// Send `entry` to its root's terminal, creating the terminal on first use.
    ///
    /// The activation only counts as sent once the line reached the shell.
    pub fn run(&mut self, entry: &ScriptEntry) -> Result<()> {
        let name = Self::terminal_name(entry);
        let line = self.command_line(&name, entry);
        let activating = self.pending_activation(&name).is_some();

        let terminal = match self.terminals.entry(name.clone()) {
            Entry::Occupied(slot) => slot.into_mut(),
            Entry::Vacant(slot) => {
                let terminal = Terminal::spawn(&name, &entry.root_path, self.auto_show)
                    .map_err(|source| ScriptsError::Terminal { name: name.clone(), source })?;
                slot.insert(terminal)
            }
        };
        terminal
            .send_text(&line)
            .map_err(|source| ScriptsError::Terminal { name: name.clone(), source })?;

        if activating {
            self.activated.insert(name, true);
        }
        Ok(())
    }

    /// Close every terminal, waiting on each even when one fails.
    ///
    /// Returns the first non-zero exit code seen, or the first close error.
    pub fn close(self) -> Result<i32> {
        let mut code = 0;
        let mut first_error = None;
        for (name, terminal) in self.terminals {
            match terminal.close() {
                Ok(status) => {
                    let exit = status.code().unwrap_or(1);
                    tracing::debug!("Terminal '{}' exited with {}", name, exit);
                    if code == 0 && exit != 0 {
                        code = exit;
                    }
                }
                Err(source) => {
                    tracing::warn!("Failed to close terminal '{}': {}", name, source);
                    if first_error.is_none() {
                        first_error = Some(ScriptsError::Terminal { name, source });
                    }
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(code),
        }
    }
}
