//! Shared helpers.

pub mod paths;

pub use paths::{data_root_dir, default_storage_path, dir_label, home_dir};
