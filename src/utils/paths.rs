//! Locations relative to the project checkout.

use std::path::{Path, PathBuf};

pub const DATA_DIR_NAME: &str = "data";

/// Root of the project, i.e. the directory holding `Cargo.toml`.
pub fn project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Returns `data_dir` when given, otherwise `<project_root>/data`.
pub fn data_dir(data_dir: Option<&Path>) -> PathBuf {
    match data_dir {
        Some(dir) => dir.to_path_buf(),
        None => project_root().join(DATA_DIR_NAME),
    }
}
