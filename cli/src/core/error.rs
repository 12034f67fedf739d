//! # TarRS Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout TarRS. Every fallible
//! operation returns [`Result`], an alias for `anyhow::Result`, so each layer can
//! attach path context with `.with_context(...)` while the specific failure kinds
//! stay matchable through [`TarrsError`].
//!
//! ## Architecture
//!
//! - `TarrsError`: a `thiserror` enum with the kinds callers may want to branch on
//!   (validation failures, extension checks, unsafe entry paths, configuration).
//! - `Result<T>`: `anyhow::Result<T>`. Underlying I/O errors are never converted
//!   into a `TarrsError`; they propagate unchanged, wrapped only in context.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use tarrs::core::error::TarrsError;
//!
//! match tarrs::extract("out", "not-an-archive") {
//!     Err(e) if matches!(e.downcast_ref::<TarrsError>(), Some(TarrsError::IsADirectory { .. })) => {
//!         eprintln!("pass the archive file, not a directory");
//!     }
//!     other => other.expect("extraction failed"),
//! }
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for TarRS.
#[derive(Error, Debug)]
pub enum TarrsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Is a directory: {}", path.display())]
    IsADirectory { path: PathBuf },

    #[error("Not a regular file: {}", path.display())]
    NotAFile { path: PathBuf },

    #[error("Unexpected extension for '{}': {detail}", path.display())]
    UnexpectedExtension { path: PathBuf, detail: String },

    #[error("Archive entry '{}' resolves outside the destination directory", path.display())]
    InvalidEntryPath { path: PathBuf },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
/// Anyhow allows for easy context addition and flexible error handling.
pub type Result<T> = anyhow::Result<T>;
