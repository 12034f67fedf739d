//! # TarRS Path Resolution (`common::archive::resolve`)
//!
//! File: cli/src/common/archive/resolve.rs
//!
//! ## Overview
//!
//! Everything TarRS decides about a path before doing any I/O lives here. The
//! only side effects are `stat` calls.
//!
//! ## Root semantics
//!
//! The literal spelling of the source path decides what the archive root is:
//!
//! ```text
//! tarrs create a.tar parent    ->  parent/  parent/bar.txt  parent/foodir/ ...
//! tarrs create a.tar parent/   ->  bar.txt  foodir/ ...
//! ```
//!
//! Without a trailing separator the directory's base name becomes the single
//! top-level entry. With one, the directory's children sit at the archive
//! root and the directory itself is not an entry. `.` and `..` have no base
//! name of their own, so the canonical directory name is used. A filesystem
//! root has no name at all and always falls back to contents-at-root.
//!
//! ## Validation
//!
//! - `resolve_source`: the source of a create must be a directory
//!   (`NotADirectory`). A symlink to a directory is accepted at the top level.
//! - `validate_archive_source`: the source of an extract must be a regular file
//!   (`IsADirectory` / `NotAFile`).
//! - `in_place_archive_path` / `in_place_destination`: the in-place extension
//!   rules (`UnexpectedExtension`). They look only at the string.
//!
use crate::core::error::{Result, TarrsError};
use anyhow::{bail, Context};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use tracing::trace;

/// Extension of archives produced and consumed by the in-place operations.
pub const ARCHIVE_EXTENSION: &str = "tar";

/// A validated archive source: where to walk and what the archive root is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    /// The directory to walk, exactly as given.
    pub root: PathBuf,
    /// `Some(name)` when the directory itself becomes the top-level entry.
    pub root_name: Option<OsString>,
}

impl SourceSpec {
    /// True when the root directory is represented as an entry.
    pub fn keeps_root(&self) -> bool {
        self.root_name.is_some()
    }

    /// Maps a path relative to `root` onto its archive path.
    ///
    /// Returns `None` for the root itself when its contents sit at the archive
    /// root, since then it has no entry of its own.
    pub fn archive_path(&self, relative: &Path) -> Option<PathBuf> {
        let prefix = self.root_name.as_deref().map(Path::new);
        let joined = super::entry::join_normal(prefix, relative);
        if joined.as_os_str().is_empty() {
            None
        } else {
            Some(joined)
        }
    }
}

/// True when the literal path string ends in a path separator.
pub fn has_trailing_separator(path: &Path) -> bool {
    path.as_os_str()
        .as_encoded_bytes()
        .last()
        .is_some_and(|b| std::path::is_separator(*b as char))
}

/// Validates the source of an archive creation and decides its root semantics.
///
/// # Errors
///
/// - An I/O error (with context) if `source` cannot be stat'ed, e.g. it does
///   not exist.
/// - `TarrsError::NotADirectory` if `source` is not a directory.
pub fn resolve_source(source: &Path) -> Result<SourceSpec> {
    // Follows a top-level symlink on purpose.
    let metadata = fs::metadata(source)
        .with_context(|| format!("Failed to access archive source {:?}", source))?;
    if !metadata.is_dir() {
        return Err(TarrsError::NotADirectory {
            path: source.to_path_buf(),
        }
        .into());
    }

    let root_name = if has_trailing_separator(source) {
        None
    } else {
        match source.file_name() {
            Some(name) => Some(name.to_os_string()),
            None => source
                .canonicalize()
                .with_context(|| format!("Failed to canonicalize {:?}", source))?
                .file_name()
                .map(|n| n.to_os_string()),
        }
    };
    trace!(
        "Resolved source {:?}: root entry = {:?}",
        source,
        root_name
    );

    Ok(SourceSpec {
        root: source.to_path_buf(),
        root_name,
    })
}

/// Validates that `archive` is an existing regular file.
///
/// # Errors
///
/// - An I/O error (with context) if `archive` cannot be stat'ed.
/// - `TarrsError::IsADirectory` for a directory.
/// - `TarrsError::NotAFile` for anything else that is not a regular file.
pub fn validate_archive_source(archive: &Path) -> Result<()> {
    let metadata = fs::metadata(archive)
        .with_context(|| format!("Failed to access archive {:?}", archive))?;
    if metadata.is_dir() {
        return Err(TarrsError::IsADirectory {
            path: archive.to_path_buf(),
        }
        .into());
    }
    if !metadata.is_file() {
        return Err(TarrsError::NotAFile {
            path: archive.to_path_buf(),
        }
        .into());
    }
    Ok(())
}

/// Derives the archive path for an in-place creation: `dir` becomes `dir.tar`.
///
/// Only the string is inspected. A path with any extension is rejected, so
/// something that already looks like an archive is never packed again.
pub fn in_place_archive_path(dir: &Path) -> Result<PathBuf> {
    let trimmed: PathBuf = dir.components().collect();
    if let Some(ext) = trimmed.extension() {
        return Err(TarrsError::UnexpectedExtension {
            path: dir.to_path_buf(),
            detail: format!(
                "in-place creation expects a directory path without an extension, found '.{}'",
                ext.to_string_lossy()
            ),
        }
        .into());
    }
    if trimmed.file_name().is_none() {
        bail!("Cannot derive an archive name from {:?}", dir);
    }

    let mut archive = trimmed.into_os_string();
    archive.push(".");
    archive.push(ARCHIVE_EXTENSION);
    Ok(PathBuf::from(archive))
}

/// Derives the destination directory for an in-place extraction:
/// `name.tar` becomes `name`.
pub fn in_place_destination(archive: &Path) -> Result<PathBuf> {
    match archive.extension() {
        Some(ext) if ext == ARCHIVE_EXTENSION => Ok(archive.with_extension("")),
        Some(ext) => Err(TarrsError::UnexpectedExtension {
            path: archive.to_path_buf(),
            detail: format!(
                "in-place extraction expects '.{}', found '.{}'",
                ARCHIVE_EXTENSION,
                ext.to_string_lossy()
            ),
        }
        .into()),
        None => Err(TarrsError::UnexpectedExtension {
            path: archive.to_path_buf(),
            detail: format!(
                "in-place extraction expects '.{}', found no extension",
                ARCHIVE_EXTENSION
            ),
        }
        .into()),
    }
}

/// Spells `dir` with a trailing separator, selecting contents-at-root.
pub fn contents_of(dir: &Path) -> PathBuf {
    if has_trailing_separator(dir) {
        return dir.to_path_buf();
    }
    let mut raw = dir.as_os_str().to_os_string();
    raw.push(MAIN_SEPARATOR.to_string());
    PathBuf::from(raw)
}
