//! scripts-run: discover and run package.json scripts
//!
//! Scans workspace folders for `package.json` scripts, merges them with
//! user-added overrides kept in a JSON cache, and runs them in per-root shells
//! with optional nvm version activation.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod input;
pub mod nvm;
pub mod scan;
pub mod store;
pub mod terminal;
pub mod tree;
pub mod utils;

pub use domain::{Config, Entry, FolderEntry, Origin, ScriptEntry};
pub use error::ScriptsError;
pub use store::OverrideStore;
pub use tree::ScriptTree;
