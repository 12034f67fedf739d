//! # TarRS Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Thin wrappers around `std::fs` for the directory-level side effects of the
//! archive engine:
//! - **`ensure_dir_exists`**: creates a directory and its parents (`mkdir -p`). It
//!   fails with `TarrsError::NotADirectory` if a non-directory is in the way.
//! - **`remove_dir_tree`**: recursively removes a directory. In-place creation
//!   uses it once the archive is written.
//! - **`remove_file`**: removes a single file. In-place extraction uses it once
//!   the tree is restored.
//!
//! Every error carries the offending path as context.
//!
use crate::core::error::{Result, TarrsError}; // Use standard Result and custom Error types
use anyhow::Context; // For adding context to errors
use std::fs; // Standard filesystem module
use std::path::Path; // Filesystem path type
use tracing::{debug, info}; // Logging utilities

/// Ensures that a directory exists at the specified path.
///
/// If the path does not exist, the directory is created together with any
/// missing parents. If the path exists but is not a directory (following a
/// symlink at `path` itself), `TarrsError::NotADirectory` is returned.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        debug!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        return Err(TarrsError::NotADirectory {
            path: path.to_path_buf(),
        }
        .into());
    }
    Ok(())
}

/// Recursively removes the directory at `path` and everything below it.
///
/// Symlinks inside the tree are removed as links; their targets are untouched.
pub fn remove_dir_tree(path: &Path) -> Result<()> {
    fs::remove_dir_all(path)
        .with_context(|| format!("Failed to remove directory {:?}", path))?;
    info!("Removed directory: {:?}", path);
    Ok(())
}

/// Removes the single file at `path`.
pub fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path).with_context(|| format!("Failed to remove file {:?}", path))?;
    info!("Removed file: {:?}", path);
    Ok(())
}
