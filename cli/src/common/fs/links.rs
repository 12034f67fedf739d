//! # TarRS Filesystem Link Operations
//!
//! File: cli/src/common/fs/links.rs
//!
//! ## Overview
//!
//! This module is the only place where TarRS reads or writes symbolic links.
//! Links are treated as opaque strings: the archiver stores whatever
//! `readlink` returns and the extractor writes exactly that string back.
//! Nothing here resolves, canonicalizes, or checks that a link target exists,
//! so relative (`../../bar.txt`), broken (`void`), and absolute (`/void`)
//! targets all survive a round trip unchanged.
//!
//! ## Architecture
//!
//! - **`read_link_literal`**: `std::fs::read_link` with path context. It never
//!   follows the link.
//! - **`create_symlink_literal`**: replaces any file or link already at the
//!   location, then creates the link with platform-specific APIs. An existing
//!   real directory is never removed.
//! - **`set_link_mtime`**: sets the timestamp of the link itself, not its target.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tarrs::common::fs::links;
//! use std::path::Path;
//!
//! # fn run_example() -> tarrs::core::error::Result<()> {
//! let target = links::read_link_literal(Path::new("parent/foodir/bardir/baz.txt"))?;
//! links::create_symlink_literal(&target, Path::new("restored/baz.txt"))?;
//! # Ok(())
//! # }
//! ```
//!
use crate::core::error::Result; // Use standard Result type from core::error
use anyhow::{bail, Context}; // For context and concise error returns
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Reads the literal target string stored in the symbolic link at `link`.
///
/// The link is not followed. A broken link reads back just like a working one.
///
/// # Errors
///
/// Returns an `Err` if `link` does not exist or is not a symbolic link.
pub fn read_link_literal(link: &Path) -> Result<PathBuf> {
    let target = fs::read_link(link)
        .with_context(|| format!("Failed to read symlink target of {:?}", link))?;
    trace!("Read symlink {:?} -> {:?}", link, target);
    Ok(target)
}

/// Creates a symbolic link at `link` whose stored target is exactly `target`.
///
/// - `target` is written verbatim. It is never resolved, and it may point at
///   nothing.
/// - If a file or link already exists at `link`, it is removed first.
/// - If a real directory exists at `link`, the call fails rather than deleting
///   the directory's contents.
///
/// The parent directory of `link` must already exist.
///
/// # Errors
///
/// Returns an `Err` if:
/// - A directory occupies `link`.
/// - Removing the existing item fails.
/// - Creating the link fails (permissions, unsupported filesystem, platform).
pub fn create_symlink_literal(target: &Path, link: &Path) -> Result<()> {
    // Check the location itself, without following an existing link.
    if let Ok(existing) = link.symlink_metadata() {
        if existing.is_dir() {
            bail!(
                "Refusing to replace directory {:?} with a symlink to {:?}",
                link,
                target
            );
        }
        debug!("Replacing existing item at {:?} with a symlink", link);
        fs::remove_file(link)
            .with_context(|| format!("Failed to remove existing item at {:?}", link))?;
    }

    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link).with_context(|| {
            format!("Failed to create symlink {:?} -> {:?}", link, target)
        })?;
    }
    #[cfg(windows)]
    {
        // Windows needs to know the link flavor up front. A target that does
        // not resolve to a directory gets a file link.
        let resolved = link
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(target);
        if resolved.is_dir() {
            std::os::windows::fs::symlink_dir(target, link).with_context(|| {
                format!("Failed to create directory symlink {:?} -> {:?}", link, target)
            })?;
        } else {
            std::os::windows::fs::symlink_file(target, link).with_context(|| {
                format!("Failed to create file symlink {:?} -> {:?}", link, target)
            })?;
        }
    }
    #[cfg(not(any(unix, windows)))]
    {
        bail!("Symlink creation is not supported on this platform.");
    }

    debug!("Created symlink: {:?} -> {:?}", link, target);
    Ok(())
}

/// Sets the modification time of the link at `link` without touching its target.
pub fn set_link_mtime(link: &Path, mtime: u64) -> Result<()> {
    let time = filetime::FileTime::from_unix_time(mtime as i64, 0);
    filetime::set_symlink_file_times(link, time, time)
        .with_context(|| format!("Failed to set modification time of symlink {:?}", link))
}

// --- Unit Tests ---
#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_relative_target_round_trips_literally() -> Result<()> {
        let dir = tempdir()?;
        let link = dir.path().join("baz.txt");
        create_symlink_literal(Path::new("../../bar.txt"), &link)?;
        assert!(link.is_symlink());
        assert_eq!(read_link_literal(&link)?, PathBuf::from("../../bar.txt"));
        Ok(())
    }

    #[test]
    fn test_broken_and_absolute_targets() -> Result<()> {
        let dir = tempdir()?;
        let broken = dir.path().join("broken-symlink");
        let absolute = dir.path().join("void");

        create_symlink_literal(Path::new("void"), &broken)?;
        create_symlink_literal(Path::new("/void"), &absolute)?;

        assert!(!broken.exists(), "broken link must stay broken");
        assert_eq!(read_link_literal(&broken)?, PathBuf::from("void"));
        assert_eq!(read_link_literal(&absolute)?, PathBuf::from("/void"));
        Ok(())
    }

    #[test]
    fn test_replaces_existing_file_and_link() -> Result<()> {
        let dir = tempdir()?;
        let link = dir.path().join("entry");

        fs::write(&link, "stale")?;
        create_symlink_literal(Path::new("first"), &link)?;
        assert_eq!(read_link_literal(&link)?, PathBuf::from("first"));

        create_symlink_literal(Path::new("second"), &link)?;
        assert_eq!(read_link_literal(&link)?, PathBuf::from("second"));
        Ok(())
    }

    #[test]
    fn test_refuses_to_replace_directory() -> Result<()> {
        let dir = tempdir()?;
        let occupied = dir.path().join("occupied");
        fs::create_dir(&occupied)?;
        fs::write(occupied.join("keep.txt"), "keep")?;

        let result = create_symlink_literal(Path::new("elsewhere"), &occupied);
        assert!(result.is_err());
        assert!(occupied.join("keep.txt").exists());
        Ok(())
    }

    #[test]
    fn test_read_link_on_regular_file_fails() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "x").unwrap();
        assert!(read_link_literal(&file).is_err());
    }

    #[test]
    fn test_set_link_mtime_leaves_target_alone() -> Result<()> {
        let dir = tempdir()?;
        let target = dir.path().join("target.txt");
        let link = dir.path().join("link");
        fs::write(&target, "t")?;
        create_symlink_literal(Path::new("target.txt"), &link)?;

        let target_mtime_before = fs::metadata(&target)?.modified()?;
        set_link_mtime(&link, 1_000_000)?;

        let link_meta = fs::symlink_metadata(&link)?;
        let link_mtime = filetime::FileTime::from_last_modification_time(&link_meta);
        assert_eq!(link_mtime.unix_seconds(), 1_000_000);
        assert_eq!(fs::metadata(&target)?.modified()?, target_mtime_before);
        Ok(())
    }
}
