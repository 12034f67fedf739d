//! # TarRS Archive Extraction (`common::archive::extract`)
//!
//! File: cli/src/common/archive/extract.rs
//!
//! ## Overview
//!
//! The `Extractor` reads a tar stream and recreates every entry below a
//! destination root. Symlinks are written back with their stored target
//! string, whether or not that target exists.
//!
//! ## Architecture
//!
//! Each entry goes through the same steps:
//! 1. **Normalize** the stored path lexically (`normalize_entry_path`). `.` is
//!    dropped and `..` pops a component. Climbing above the root, or an
//!    absolute path, fails with `TarrsError::InvalidEntryPath`.
//! 2. **Create parents** one component at a time (`create_dirs_within`). An
//!    existing symlink component is allowed only when it resolves to a
//!    directory inside the canonical root, so a link restored earlier in the
//!    stream cannot redirect later writes elsewhere.
//! 3. **Write** the object:
//!    - directories are created and their metadata is queued,
//!    - files replace whatever file or link was at the path,
//!    - symlinks go through `links::create_symlink_literal`.
//!
//! Queued directory modes and mtimes are applied after the stream ends,
//! deepest first by path depth, whatever order the archive listed the
//! directories in. A read-only directory is therefore never closed before its
//! children are written, and writing children does not clobber the restored
//! directory mtime.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tarrs::core::config::ExtractConfig;
//! use tarrs::Extractor;
//!
//! # fn main() -> tarrs::core::error::Result<()> {
//! let counts = Extractor::new(ExtractConfig::default()).extract("restored", "parent.tar")?;
//! println!("{} entries restored", counts.total());
//! # Ok(())
//! # }
//! ```
//!
use super::entry::{ArchiveEntry, EntryCounts, EntryKind};
use super::resolve;
use crate::common::fs::{io as fs_io, links};
use crate::core::config::ExtractConfig;
use crate::core::error::{Result, TarrsError};
use anyhow::{bail, Context};
use filetime::FileTime;
use std::cmp::Reverse;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Read};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

/// Restores tar archives onto the filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct Extractor {
    config: ExtractConfig,
}

impl Extractor {
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    /// Extracts the archive at `source` into the directory `destination`.
    ///
    /// `destination` is created if missing. Existing files and links that
    /// collide with archive entries are replaced; existing directories are
    /// merged into.
    ///
    /// # Errors
    ///
    /// - `TarrsError::IsADirectory` / `TarrsError::NotAFile` if `source` is
    ///   not a regular file.
    /// - `TarrsError::InvalidEntryPath` for an entry that would land outside
    ///   `destination`.
    /// - Any I/O or tar format error, with context.
    pub fn extract(
        &self,
        destination: impl AsRef<Path>,
        source: impl AsRef<Path>,
    ) -> Result<EntryCounts> {
        let destination = destination.as_ref();
        let source = source.as_ref();

        resolve::validate_archive_source(source)?;
        fs_io::ensure_dir_exists(destination)?;
        let root = destination
            .canonicalize()
            .with_context(|| format!("Failed to canonicalize destination {:?}", destination))?;
        info!("Extracting archive {:?} into {:?}", source, destination);

        let file = File::open(source)
            .with_context(|| format!("Failed to open archive {:?}", source))?;
        let mut archive = tar::Archive::new(BufReader::new(file));

        let mut counts = EntryCounts::default();
        let mut directories: Vec<(PathBuf, ArchiveEntry)> = Vec::new();

        let entries = archive
            .entries()
            .with_context(|| format!("Failed to read entries of {:?}", source))?;
        for item in entries {
            let mut item = item.with_context(|| format!("Failed to read entry from {:?}", source))?;
            let stored = item
                .path()
                .with_context(|| format!("Invalid entry path in {:?}", source))?
                .into_owned();
            let Some(relative) = normalize_entry_path(&stored)? else {
                debug!("Skipping entry {:?}: resolves to the destination root", stored);
                continue;
            };
            let link_target = item
                .link_name()
                .with_context(|| format!("Invalid link target for {:?}", stored))?
                .map(|target| target.into_owned());

            let Some(entry) = ArchiveEntry::from_header(item.header(), relative, link_target)?
            else {
                warn!(
                    "Skipping {:?}: unsupported entry type {:?}",
                    stored,
                    item.header().entry_type()
                );
                counts.skipped += 1;
                continue;
            };

            match &entry.kind {
                EntryKind::Directory => {
                    let path = create_dirs_within(&root, &entry.path)?;
                    debug!("Created directory {:?}", path);
                    directories.push((path, entry.clone()));
                }
                EntryKind::File => {
                    let path = prepare_leaf(&root, &entry.path)?;
                    self.write_file(&mut item, &path, &entry)?;
                    debug!("Extracted file {:?} ({} bytes)", path, entry.size);
                }
                EntryKind::Symlink { target } => {
                    let path = prepare_leaf(&root, &entry.path)?;
                    links::create_symlink_literal(target, &path)?;
                    if self.config.preserve_mtime {
                        links::set_link_mtime(&path, entry.mtime)?;
                    }
                }
            }
            counts.record(&entry);
        }

        // Deepest first; equal depths in reverse stream order.
        directories.reverse();
        directories.sort_by_key(|(path, _)| Reverse(path.components().count()));
        for (path, entry) in &directories {
            self.apply_metadata(path, entry)?;
        }

        info!(
            "Extracted {} entries ({} skipped) into {:?}",
            counts.total(),
            counts.skipped,
            destination
        );
        Ok(counts)
    }

    fn write_file(&self, content: &mut impl Read, path: &Path, entry: &ArchiveEntry) -> Result<()> {
        if let Ok(existing) = path.symlink_metadata() {
            if existing.is_dir() {
                bail!("Refusing to replace directory {:?} with a file", path);
            }
            fs::remove_file(path)
                .with_context(|| format!("Failed to remove existing item at {:?}", path))?;
        }

        let mut out = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .with_context(|| format!("Failed to create file {:?}", path))?;
        io::copy(content, &mut out).with_context(|| format!("Failed to write file {:?}", path))?;
        drop(out);

        self.apply_metadata(path, entry)
    }

    /// Applies the stored mtime and mode bits, as far as configured.
    fn apply_metadata(&self, path: &Path, entry: &ArchiveEntry) -> Result<()> {
        if self.config.preserve_mtime {
            filetime::set_file_mtime(path, FileTime::from_unix_time(entry.mtime as i64, 0))
                .with_context(|| format!("Failed to set modification time of {:?}", path))?;
        }
        if self.config.preserve_permissions {
            set_mode(path, entry.mode)?;
        }
        Ok(())
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode & 0o7777))
        .with_context(|| format!("Failed to set permissions {:o} on {:?}", mode, path))
}

#[cfg(not(unix))]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    let mut permissions = fs::metadata(path)
        .with_context(|| format!("Failed to stat {:?}", path))?
        .permissions();
    permissions.set_readonly(mode & 0o222 == 0);
    fs::set_permissions(path, permissions)
        .with_context(|| format!("Failed to set permissions on {:?}", path))
}

/// Normalizes a stored entry path to a root-relative path.
///
/// Returns `Ok(None)` when nothing is left (`.`, `./`), meaning the entry
/// names the destination root itself.
pub fn normalize_entry_path(stored: &Path) -> Result<Option<PathBuf>> {
    let invalid = || TarrsError::InvalidEntryPath {
        path: stored.to_path_buf(),
    };
    let mut normalized = PathBuf::new();
    for component in stored.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    return Err(invalid().into());
                }
            }
            Component::RootDir | Component::Prefix(_) => return Err(invalid().into()),
        }
    }
    Ok(if normalized.as_os_str().is_empty() {
        None
    } else {
        Some(normalized)
    })
}

/// Creates `relative` below `root` one component at a time and returns the
/// full path.
///
/// `root` must be canonical. Existing directories are reused. An existing
/// symlink component is accepted only if it resolves to a directory inside
/// `root`; anything else fails with `TarrsError::InvalidEntryPath`.
fn create_dirs_within(root: &Path, relative: &Path) -> Result<PathBuf> {
    let mut current = root.to_path_buf();
    for component in relative.components() {
        current.push(component);
        match current.symlink_metadata() {
            Ok(meta) if meta.is_dir() => {}
            Ok(meta) if meta.file_type().is_symlink() => {
                let resolved = current.canonicalize().ok();
                let inside = resolved
                    .as_deref()
                    .is_some_and(|p| p.starts_with(root) && p.is_dir());
                if !inside {
                    return Err(TarrsError::InvalidEntryPath {
                        path: relative.to_path_buf(),
                    })
                    .with_context(|| {
                        format!("{:?} is a link leading outside the destination", current)
                    });
                }
            }
            Ok(_) => {
                return Err(TarrsError::NotADirectory { path: current }.into());
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                fs::create_dir(&current)
                    .with_context(|| format!("Failed to create directory {:?}", current))?;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to stat {:?}", current));
            }
        }
    }
    Ok(current)
}

/// Creates the parents of a file or link entry and returns its full path.
fn prepare_leaf(root: &Path, relative: &Path) -> Result<PathBuf> {
    let name = relative
        .file_name()
        .with_context(|| format!("Entry path {:?} has no file name", relative))?;
    let parent = match relative.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => create_dirs_within(root, parent)?,
        _ => root.to_path_buf(),
    };
    Ok(parent.join(name))
}
