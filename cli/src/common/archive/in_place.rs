//! # TarRS In-Place Operations (`common::archive::in_place`)
//!
//! File: cli/src/common/archive/in_place.rs
//!
//! ## Overview
//!
//! In-place mode swaps one form for the other:
//!
//! ```text
//! create_in_place("parent")       parent/      ->  parent.tar   (parent/ removed)
//! extract_in_place("parent.tar")  parent.tar   ->  parent/      (parent.tar removed)
//! ```
//!
//! The direction is implied by the `.tar` extension alone. The archive holds
//! the directory's contents at its root, so unpacking `parent.tar` recreates
//! `parent/` with the same children.
//!
//! The source is removed only after the archive or extract step has
//! succeeded. A failure at any point leaves the source untouched.
//!
use super::create::Archiver;
use super::extract::Extractor;
use super::resolve;
use crate::common::fs::io as fs_io;
use crate::core::config::Config;
use crate::core::error::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Packs the directory at `path` into `path.tar` and removes the directory.
///
/// Returns the path of the new archive.
///
/// # Errors
///
/// - `TarrsError::UnexpectedExtension` if `path` has any extension. Nothing on
///   disk is touched in that case.
/// - `TarrsError::NotADirectory` if `path` is not a directory.
/// - Any error from archive creation or from removing the directory.
pub fn create_in_place_with(path: &Path, config: &Config) -> Result<PathBuf> {
    let archive = resolve::in_place_archive_path(path)?;
    info!("Packing {:?} in place into {:?}", path, archive);

    Archiver::new(config.create).create(&archive, resolve::contents_of(path))?;
    fs_io::remove_dir_tree(path)?;
    Ok(archive)
}

/// Unpacks `path` (which must end in `.tar`) into the same path without the
/// extension, then removes the archive.
///
/// Returns the path of the restored directory.
///
/// # Errors
///
/// - `TarrsError::UnexpectedExtension` unless `path` ends in `.tar`.
/// - `TarrsError::IsADirectory` / `TarrsError::NotAFile` if `path` is not a
///   regular file.
/// - Any error from extraction or from removing the archive.
pub fn extract_in_place_with(path: &Path, config: &Config) -> Result<PathBuf> {
    let destination = resolve::in_place_destination(path)?;
    info!("Unpacking {:?} in place into {:?}", path, destination);

    Extractor::new(config.extract).extract(&destination, path)?;
    fs_io::remove_file(path)?;
    Ok(destination)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::TarrsError;
    use std::fs;
    use tempfile::tempdir;

    fn is_unexpected_extension(err: &anyhow::Error) -> bool {
        matches!(
            err.downcast_ref::<TarrsError>(),
            Some(TarrsError::UnexpectedExtension { .. })
        )
    }

    #[test]
    fn test_in_place_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let parent = dir.path().join("parent");
        fs::create_dir_all(parent.join("foodir"))?;
        fs::write(parent.join("bar.txt"), "bar\n")?;
        fs::write(parent.join("foodir/some-content.txt"), "some content\n")?;

        let archive = create_in_place_with(&parent, &Config::default())?;
        assert_eq!(archive, dir.path().join("parent.tar"));
        assert!(archive.is_file());
        assert!(!parent.exists());

        let restored = extract_in_place_with(&archive, &Config::default())?;
        assert_eq!(restored, parent);
        assert!(!archive.exists());
        assert_eq!(fs::read_to_string(parent.join("bar.txt"))?, "bar\n");
        assert_eq!(
            fs::read_to_string(parent.join("foodir/some-content.txt"))?,
            "some content\n"
        );
        Ok(())
    }

    #[test]
    fn test_create_in_place_rejects_extension_without_side_effects() -> Result<()> {
        let dir = tempdir()?;
        let archive = dir.path().join("parent.tar");
        fs::write(&archive, "not a directory")?;

        let err = create_in_place_with(&archive, &Config::default()).unwrap_err();
        assert!(is_unexpected_extension(&err));
        assert_eq!(fs::read_to_string(&archive)?, "not a directory");
        assert!(!dir.path().join("parent.tar.tar").exists());
        Ok(())
    }

    #[test]
    fn test_create_in_place_rejects_file() -> Result<()> {
        let dir = tempdir()?;
        let file = dir.path().join("notes");
        fs::write(&file, "plain file")?;

        let err = create_in_place_with(&file, &Config::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TarrsError>(),
            Some(TarrsError::NotADirectory { .. })
        ));
        assert!(file.is_file());
        assert!(!dir.path().join("notes.tar").exists());
        Ok(())
    }

    #[test]
    fn test_extract_in_place_requires_tar_extension() -> Result<()> {
        let dir = tempdir()?;
        let archive = dir.path().join("tar-archive");
        fs::write(&archive, "whatever")?;

        let err = extract_in_place_with(&archive, &Config::default()).unwrap_err();
        assert!(is_unexpected_extension(&err));
        assert!(archive.exists());
        Ok(())
    }

    #[test]
    fn test_failed_extract_keeps_archive() -> Result<()> {
        let dir = tempdir()?;
        let archive = dir.path().join("broken.tar");
        // A header block whose checksum cannot match.
        fs::write(&archive, vec![0x41u8; 1024])?;

        let result = extract_in_place_with(&archive, &Config::default());
        assert!(result.is_err());
        assert!(archive.exists(), "archive must survive a failed extraction");
        Ok(())
    }
}
