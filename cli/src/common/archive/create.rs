//! # TarRS Archive Creation (`common::archive::create`)
//!
//! File: cli/src/common/archive/create.rs
//!
//! ## Overview
//!
//! The `Archiver` walks a directory tree and writes one tar entry per
//! filesystem object. It stores symbolic links as links, never as the files
//! they point to.
//!
//! ## Architecture
//!
//! 1. `resolve::resolve_source` validates the source and fixes the root
//!    semantics (trailing slash or not) before anything is written.
//! 2. `walkdir` visits the tree:
//!    - sorted by file name at every level, so the same tree always yields the
//!      same archive,
//!    - without following links (only a symlinked root is followed),
//!    - parents before children.
//! 3. Each object becomes an `ArchiveEntry` from its `lstat` data. Links carry
//!    the literal `readlink` string.
//! 4. Entries go to `tar::Builder`:
//!    - files are streamed from disk,
//!    - links go through `append_link` so long targets get GNU long-link
//!      records.
//!
//! With `CreateConfig::atomic` the archive is written to a temporary file in
//! the destination's directory and renamed over the destination only after
//! the builder has finished. A failed run leaves nothing at the destination.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tarrs::core::config::CreateConfig;
//! use tarrs::Archiver;
//!
//! # fn main() -> tarrs::core::error::Result<()> {
//! let archiver = Archiver::new(CreateConfig::default());
//! // `parent/` itself becomes the top-level entry.
//! archiver.create("parent.tar", "testdata/parent")?;
//! // Only the children of `parent` sit at the archive root.
//! archiver.create("contents.tar", "testdata/parent/")?;
//! # Ok(())
//! # }
//! ```
//!
use super::entry::{ArchiveEntry, EntryCounts, EntryKind};
use super::resolve::{self, SourceSpec};
use crate::common::fs::links;
use crate::core::config::CreateConfig;
use crate::core::error::Result;
use anyhow::Context;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Writes directory trees into tar archives.
#[derive(Debug, Default, Clone, Copy)]
pub struct Archiver {
    config: CreateConfig,
}

impl Archiver {
    pub fn new(config: CreateConfig) -> Self {
        Self { config }
    }

    /// Archives the directory at `source` into a tar file at `destination`.
    ///
    /// A trailing separator on `source` puts the directory's children at the
    /// archive root. Without one, the directory itself is the single
    /// top-level entry. An existing file at `destination` is overwritten.
    ///
    /// # Errors
    ///
    /// - `TarrsError::NotADirectory` if `source` is not a directory.
    /// - Any I/O error while walking, reading, or writing, with path context.
    pub fn create(
        &self,
        destination: impl AsRef<Path>,
        source: impl AsRef<Path>,
    ) -> Result<EntryCounts> {
        let destination = destination.as_ref();
        let source = source.as_ref();

        let spec = resolve::resolve_source(source)?;
        info!(
            "Creating archive {:?} from {:?} ({})",
            destination,
            source,
            if spec.keeps_root() {
                "directory as top-level entry"
            } else {
                "contents at archive root"
            }
        );

        let counts = if self.config.atomic {
            create_staged(destination, &spec)?
        } else {
            let file = File::create(destination)
                .with_context(|| format!("Failed to create archive {:?}", destination))?;
            let own = canonical_paths([destination]);
            write_archive(file, &spec, &own)
                .with_context(|| format!("Failed to write archive {:?}", destination))?
        };

        info!(
            "Archived {} entries ({} bytes of file content) into {:?}",
            counts.total(),
            counts.bytes,
            destination
        );
        Ok(counts)
    }
}

/// Builds the archive in a temporary sibling of `destination`, then renames it.
fn create_staged(destination: &Path, spec: &SourceSpec) -> Result<EntryCounts> {
    let parent = destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut staging = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create staging file in {:?}", parent))?;
    debug!("Staging archive at {:?}", staging.path());

    // The old archive at `destination` is about to be replaced, so it is not
    // part of the tree either.
    let own = canonical_paths([staging.path(), destination]);
    let counts = write_archive(staging.as_file_mut(), spec, &own)
        .with_context(|| format!("Failed to write archive {:?}", destination))?;

    // Temp files are created owner-only; give the archive ordinary file permissions.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        staging
            .as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .with_context(|| format!("Failed to set permissions on {:?}", staging.path()))?;
    }

    staging
        .persist(destination)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to move archive into place at {:?}", destination))?;
    Ok(counts)
}

/// Canonical forms of the given paths; paths that do not exist are dropped.
fn canonical_paths<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Vec<PathBuf> {
    paths
        .into_iter()
        .filter_map(|p| p.canonicalize().ok())
        .collect()
}

/// True when the walked item is one of the files the archive is written to.
fn is_own_archive(item: &walkdir::DirEntry, own: &[PathBuf]) -> bool {
    if !item.file_type().is_file() {
        return false;
    }
    own.iter()
        .filter(|p| p.file_name() == Some(item.file_name()))
        .any(|p| item.path().canonicalize().is_ok_and(|c| &c == p))
}

/// Walks `spec.root` and writes every supported entry to `writer`.
///
/// Regular files whose canonical path is in `own` are the archive itself and
/// are left out.
fn write_archive<W: Write>(
    writer: W,
    spec: &SourceSpec,
    own: &[PathBuf],
) -> Result<EntryCounts> {
    let mut builder = tar::Builder::new(BufWriter::new(writer));
    builder.follow_symlinks(false);
    let mut counts = EntryCounts::default();

    let walker = WalkDir::new(&spec.root)
        .follow_links(false)
        .sort_by_file_name();
    for item in walker {
        let item = item.with_context(|| format!("Failed to walk {:?}", spec.root))?;
        let relative = item
            .path()
            .strip_prefix(&spec.root)
            .with_context(|| format!("{:?} is not below {:?}", item.path(), spec.root))?;
        let Some(archive_path) = spec.archive_path(relative) else {
            // The root itself, when its contents sit at the archive root.
            continue;
        };
        if is_own_archive(&item, own) {
            warn!("Skipping {:?}: file is the archive; not dumped", item.path());
            continue;
        }

        let metadata = item
            .metadata()
            .with_context(|| format!("Failed to stat {:?}", item.path()))?;
        let link_target = if item.path_is_symlink() && item.depth() > 0 {
            Some(links::read_link_literal(item.path())?)
        } else {
            None
        };

        let Some(entry) = ArchiveEntry::from_metadata(archive_path, &metadata, link_target)
        else {
            warn!(
                "Skipping {:?}: unsupported file type {:?}",
                item.path(),
                metadata.file_type()
            );
            counts.skipped += 1;
            continue;
        };

        append_entry(&mut builder, &entry, item.path())?;
        counts.record(&entry);
    }

    let mut writer = builder
        .into_inner()
        .context("Failed to finalize tar archive structure")?;
    writer.flush().context("Failed to flush archive")?;
    Ok(counts)
}

/// Appends one entry, reading file content from `source` when needed.
fn append_entry<W: Write>(
    builder: &mut tar::Builder<W>,
    entry: &ArchiveEntry,
    source: &Path,
) -> Result<()> {
    let mut header = entry.header();
    match &entry.kind {
        EntryKind::Directory => {
            builder.append_data(&mut header, entry.header_path(), io::empty())
        }
        EntryKind::File => {
            let file = File::open(source)
                .with_context(|| format!("Failed to open {:?} for reading", source))?;
            // Bound the read to the size recorded in the header.
            builder.append_data(&mut header, &entry.path, file.take(entry.size))
        }
        EntryKind::Symlink { target } => builder.append_link(&mut header, &entry.path, target),
    }
    .with_context(|| format!("Failed to add {:?} to the archive", entry.path))?;
    debug!("Added {:?}", entry.path);
    Ok(())
}
