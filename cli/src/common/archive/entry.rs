//! # TarRS Archive Entries (`common::archive::entry`)
//!
//! File: cli/src/common/archive/entry.rs
//!
//! ## Overview
//!
//! `ArchiveEntry` is the unit exchanged between the filesystem side of TarRS
//! and the `tar` codec. The archiver builds one from `lstat` data for every
//! object it visits. The inspector builds one from every header it reads.
//!
//! The entry kind decides which payload exists:
//!
//! | kind        | content                      | link target       |
//! |-------------|------------------------------|-------------------|
//! | `File`      | streamed from the source     | none              |
//! | `Directory` | none                         | none              |
//! | `Symlink`   | none                         | literal, verbatim |
//!
//! File content is never held in the entry. The archiver streams it from the
//! open source file straight into the builder, so large files are never
//! buffered whole.
//!
use crate::core::error::Result;
use anyhow::Context;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// What kind of filesystem object an entry describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// A symbolic link. `target` is the literal string stored in the link.
    Symlink { target: PathBuf },
}

/// One archive entry: metadata plus, for links, the literal target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Root-relative path. When built by the archiver it contains only normal
    /// components; the codec writes them `/`-separated on every platform.
    pub path: PathBuf,
    pub kind: EntryKind,
    /// Permission bits (`0o7777` mask).
    pub mode: u32,
    /// Modification time, seconds since the Unix epoch.
    pub mtime: u64,
    /// Content length in bytes. Always zero for directories and links.
    pub size: u64,
}

impl ArchiveEntry {
    /// Builds an entry from `lstat` metadata.
    ///
    /// `link_target` must be `Some` exactly when `metadata` describes a
    /// symlink. Returns `None` for objects the archive format does not carry
    /// here (sockets, fifos, devices).
    pub fn from_metadata(
        path: PathBuf,
        metadata: &Metadata,
        link_target: Option<PathBuf>,
    ) -> Option<ArchiveEntry> {
        let file_type = metadata.file_type();
        let (kind, size) = if file_type.is_symlink() {
            (EntryKind::Symlink { target: link_target? }, 0)
        } else if file_type.is_dir() {
            (EntryKind::Directory, 0)
        } else if file_type.is_file() {
            (EntryKind::File, metadata.len())
        } else {
            return None;
        };

        let mtime = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map_or(0, |d| d.as_secs());

        Some(ArchiveEntry {
            mode: mode_of(metadata, &kind),
            path,
            kind,
            mtime,
            size,
        })
    }

    /// Builds an entry from a header read back out of an archive.
    ///
    /// Returns `Ok(None)` for entry types other than regular files,
    /// directories, and symlinks.
    pub fn from_header(
        header: &tar::Header,
        path: PathBuf,
        link_target: Option<PathBuf>,
    ) -> Result<Option<ArchiveEntry>> {
        let entry_type = header.entry_type();
        let kind = if entry_type.is_dir() {
            EntryKind::Directory
        } else if entry_type.is_symlink() {
            let target = link_target
                .with_context(|| format!("Symlink entry {:?} has no link target", path))?;
            EntryKind::Symlink { target }
        } else if entry_type.is_file() {
            EntryKind::File
        } else {
            return Ok(None);
        };

        let size = match kind {
            EntryKind::File => header
                .size()
                .with_context(|| format!("Invalid size in header of {:?}", path))?,
            _ => 0,
        };
        let mode = header
            .mode()
            .with_context(|| format!("Invalid mode in header of {:?}", path))?
            & 0o7777;
        let mtime = header
            .mtime()
            .with_context(|| format!("Invalid mtime in header of {:?}", path))?;

        Ok(Some(ArchiveEntry {
            path,
            kind,
            mode,
            mtime,
            size,
        }))
    }

    /// A header carrying everything except the path and link name. The
    /// builder fills those in, since they may need GNU long-name records.
    pub fn header(&self) -> tar::Header {
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(match self.kind {
            EntryKind::File => tar::EntryType::Regular,
            EntryKind::Directory => tar::EntryType::Directory,
            EntryKind::Symlink { .. } => tar::EntryType::Symlink,
        });
        header.set_mode(self.mode);
        header.set_mtime(self.mtime);
        header.set_size(self.size);
        header
    }

    /// The path as it goes into the header: directories get a trailing `/`.
    pub fn header_path(&self) -> PathBuf {
        match self.kind {
            EntryKind::Directory => {
                let mut raw = self.path.clone().into_os_string();
                raw.push("/");
                PathBuf::from(raw)
            }
            _ => self.path.clone(),
        }
    }

    /// `ls -l` style type-and-permission string, e.g. `drwxr-xr-x`.
    pub fn mode_string(&self) -> String {
        let mut out = String::with_capacity(10);
        out.push(match self.kind {
            EntryKind::File => '-',
            EntryKind::Directory => 'd',
            EntryKind::Symlink { .. } => 'l',
        });
        for shift in [6u32, 3, 0] {
            let bits = (self.mode >> shift) & 0o7;
            out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
            out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
            out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
        }
        out
    }
}

#[cfg(unix)]
fn mode_of(metadata: &Metadata, _kind: &EntryKind) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn mode_of(metadata: &Metadata, kind: &EntryKind) -> u32 {
    match kind {
        EntryKind::Directory => 0o755,
        EntryKind::Symlink { .. } => 0o777,
        EntryKind::File if metadata.permissions().readonly() => 0o444,
        EntryKind::File => 0o644,
    }
}

/// Counts of what an archive pass wrote or restored.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EntryCounts {
    pub directories: usize,
    pub files: usize,
    pub symlinks: usize,
    /// Objects of an unsupported kind that were left out.
    pub skipped: usize,
    /// Total regular-file content, in bytes.
    pub bytes: u64,
}

impl EntryCounts {
    pub fn record(&mut self, entry: &ArchiveEntry) {
        match entry.kind {
            EntryKind::File => {
                self.files += 1;
                self.bytes += entry.size;
            }
            EntryKind::Directory => self.directories += 1,
            EntryKind::Symlink { .. } => self.symlinks += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.directories + self.files + self.symlinks
    }
}

/// Joins `relative` under `prefix`, keeping only normal components.
pub(crate) fn join_normal(prefix: Option<&Path>, relative: &Path) -> PathBuf {
    let mut out = prefix.map(Path::to_path_buf).unwrap_or_default();
    for component in relative.components() {
        if let std::path::Component::Normal(part) = component {
            out.push(part);
        }
    }
    out
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_from_metadata_file_and_dir() -> Result<()> {
        let dir = tempdir()?;
        let file = dir.path().join("bar.txt");
        fs::write(&file, "bar content\n")?;

        let entry = ArchiveEntry::from_metadata(
            PathBuf::from("parent/bar.txt"),
            &fs::symlink_metadata(&file)?,
            None,
        )
        .expect("regular file is supported");
        assert_eq!(entry.kind, EntryKind::File);
        assert_eq!(entry.size, 12);
        assert!(entry.mtime > 0);

        let dir_entry = ArchiveEntry::from_metadata(
            PathBuf::from("parent"),
            &fs::symlink_metadata(dir.path())?,
            None,
        )
        .expect("directory is supported");
        assert_eq!(dir_entry.kind, EntryKind::Directory);
        assert_eq!(dir_entry.size, 0);
        assert_eq!(dir_entry.header_path(), PathBuf::from("parent/"));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_from_metadata_symlink_requires_target() -> Result<()> {
        let dir = tempdir()?;
        let link = dir.path().join("broken-symlink");
        std::os::unix::fs::symlink("void", &link)?;
        let meta = fs::symlink_metadata(&link)?;

        assert!(ArchiveEntry::from_metadata(PathBuf::from("broken-symlink"), &meta, None).is_none());

        let entry = ArchiveEntry::from_metadata(
            PathBuf::from("broken-symlink"),
            &meta,
            Some(PathBuf::from("void")),
        )
        .expect("symlink with target is supported");
        assert_eq!(
            entry.kind,
            EntryKind::Symlink {
                target: PathBuf::from("void")
            }
        );
        assert_eq!(entry.size, 0);
        Ok(())
    }

    #[test]
    fn test_header_round_trip() -> Result<()> {
        let entry = ArchiveEntry {
            path: PathBuf::from("parent/foodir/bardir/baz.txt"),
            kind: EntryKind::Symlink {
                target: PathBuf::from("../../bar.txt"),
            },
            mode: 0o777,
            mtime: 1_426_000_000,
            size: 0,
        };
        let mut header = entry.header();
        header.set_path(&entry.path)?;
        header.set_link_name(Path::new("../../bar.txt"))?;

        let back = ArchiveEntry::from_header(
            &header,
            entry.path.clone(),
            header.link_name()?.map(|l| l.into_owned()),
        )?
        .expect("symlink header is supported");
        assert_eq!(back, entry);
        Ok(())
    }

    #[test]
    fn test_from_header_skips_unsupported() -> Result<()> {
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(tar::EntryType::Fifo);
        let entry = ArchiveEntry::from_header(&header, PathBuf::from("pipe"), None)?;
        assert!(entry.is_none());
        Ok(())
    }

    #[test]
    fn test_mode_string() {
        let entry = ArchiveEntry {
            path: PathBuf::from("foodir"),
            kind: EntryKind::Directory,
            mode: 0o755,
            mtime: 0,
            size: 0,
        };
        assert_eq!(entry.mode_string(), "drwxr-xr-x");
    }

    #[test]
    fn test_join_normal_drops_curdir() {
        assert_eq!(
            join_normal(Some(Path::new("parent")), Path::new("./foodir/bardir")),
            PathBuf::from("parent/foodir/bardir")
        );
        assert_eq!(join_normal(None, Path::new("")), PathBuf::new());
    }

    #[test]
    fn test_counts() {
        let mut counts = EntryCounts::default();
        counts.record(&ArchiveEntry {
            path: PathBuf::from("a"),
            kind: EntryKind::File,
            mode: 0o644,
            mtime: 0,
            size: 10,
        });
        counts.record(&ArchiveEntry {
            path: PathBuf::from("b"),
            kind: EntryKind::Directory,
            mode: 0o755,
            mtime: 0,
            size: 0,
        });
        assert_eq!(counts.files, 1);
        assert_eq!(counts.directories, 1);
        assert_eq!(counts.bytes, 10);
        assert_eq!(counts.total(), 2);
    }
}
