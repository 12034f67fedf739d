//! # TarRS Archive Inspection (`common::archive::inspect`)
//!
//! File: cli/src/common/archive/inspect.rs
//!
//! Reads an archive's headers back into `ArchiveEntry` values without writing
//! anything to disk. Paths are reported exactly as stored; symlink targets are
//! the literal strings from the archive.
//!
use super::entry::ArchiveEntry;
use super::resolve;
use crate::core::error::Result;
use anyhow::Context;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, warn};

/// Lists the supported entries of the archive at `archive`, in stream order.
///
/// # Errors
///
/// The same source validation as extraction (`IsADirectory`, `NotAFile`),
/// plus any I/O or tar format error.
pub fn list(archive: impl AsRef<Path>) -> Result<Vec<ArchiveEntry>> {
    let archive = archive.as_ref();
    resolve::validate_archive_source(archive)?;

    let file =
        File::open(archive).with_context(|| format!("Failed to open archive {:?}", archive))?;
    let mut tar = tar::Archive::new(BufReader::new(file));

    let mut listed = Vec::new();
    let entries = tar
        .entries()
        .with_context(|| format!("Failed to read entries of {:?}", archive))?;
    for item in entries {
        let item = item.with_context(|| format!("Failed to read entry from {:?}", archive))?;
        let path = item
            .path()
            .with_context(|| format!("Invalid entry path in {:?}", archive))?
            .into_owned();
        let link_target = item
            .link_name()
            .with_context(|| format!("Invalid link target for {:?}", path))?
            .map(|target| target.into_owned());

        match ArchiveEntry::from_header(item.header(), path.clone(), link_target)? {
            Some(entry) => listed.push(entry),
            None => warn!(
                "Not listing {:?}: unsupported entry type {:?}",
                path,
                item.header().entry_type()
            ),
        }
    }
    debug!("Listed {} entries from {:?}", listed.len(), archive);
    Ok(listed)
}
