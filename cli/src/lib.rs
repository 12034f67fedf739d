//! # TarRS Library
//!
//! File: cli/src/lib.rs
//!
//! ## Overview
//!
//! TarRS packs directory trees into tar archives and unpacks them, keeping
//! symbolic links exactly as they are on disk. The `tarrs` binary is a thin
//! CLI over this library.
//!
//! The free functions below use the default configuration. For staged
//! creation control or metadata toggles, build an `Archiver` or `Extractor`
//! from a `Config` (see `core::config`).
//!
//! ## Usage
//!
//! ```rust,no_run
//! # fn main() -> tarrs::core::error::Result<()> {
//! // `parent/` is the single top-level entry.
//! tarrs::create("parent.tar", "testdata/parent")?;
//! tarrs::extract("restored", "parent.tar")?;
//!
//! // Swap a directory for its archive and back again.
//! tarrs::create_in_place("testdata/parent")?;
//! tarrs::extract_in_place("testdata/parent.tar")?;
//! # Ok(())
//! # }
//! ```
//!

pub mod common;
pub mod core;

pub use crate::common::archive::{ArchiveEntry, Archiver, EntryCounts, EntryKind, Extractor};
pub use crate::core::config::Config;
pub use crate::core::error::{Result, TarrsError};

use crate::common::archive::in_place;
use std::path::Path;

/// Archives the directory `source` into `destination`.
///
/// A trailing separator on `source` archives the directory's contents at the
/// archive root; without one, the directory itself is the top-level entry.
pub fn create(destination: impl AsRef<Path>, source: impl AsRef<Path>) -> Result<()> {
    Archiver::default().create(destination, source)?;
    Ok(())
}

/// Extracts the archive `source` into the directory `destination`.
pub fn extract(destination: impl AsRef<Path>, source: impl AsRef<Path>) -> Result<()> {
    Extractor::default().extract(destination, source)?;
    Ok(())
}

/// Replaces the directory at `path` with `path.tar`.
pub fn create_in_place(path: impl AsRef<Path>) -> Result<()> {
    in_place::create_in_place_with(path.as_ref(), &Config::default())?;
    Ok(())
}

/// Replaces the archive at `path` (ending in `.tar`) with its extracted directory.
pub fn extract_in_place(path: impl AsRef<Path>) -> Result<()> {
    in_place::extract_in_place_with(path.as_ref(), &Config::default())?;
    Ok(())
}

/// Lists the entries of the archive at `archive`, in stream order.
pub fn list(archive: impl AsRef<Path>) -> Result<Vec<ArchiveEntry>> {
    common::archive::list(archive)
}
