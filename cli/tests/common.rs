//! # TarRS Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`:
//! - `tarrs_cmd()` runs the compiled binary through `assert_cmd`.
//! - `build_parent_tree()` creates the reference fixture tree.
//! - `snapshot()` reduces a tree to comparable values (file hashes and literal
//!   link targets).
//!
//! Each test file that needs them declares `mod common;`.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Creates an `assert_cmd::Command` for the compiled `tarrs` binary.
///
/// `TARRS_CONFIG` is cleared so a developer's environment cannot change the
/// behavior under test.
pub fn tarrs_cmd() -> Command {
    let mut cmd = Command::cargo_bin("tarrs").expect("Failed to find tarrs binary for testing");
    cmd.env_remove("TARRS_CONFIG");
    cmd
}

/// One filesystem object, reduced to what a round trip must preserve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Dir,
    /// SHA-256 of the file content, hex encoded.
    File(String),
    /// Literal link target.
    Link(PathBuf),
}

/// Hex SHA-256 of the file at `path`.
pub fn sha256_of(path: &Path) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut file = fs::File::open(path)?;
    io::copy(&mut file, &mut hasher)?;
    Ok(hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect())
}

/// Maps every object below `root` (relative path) to its `Node`. The root
/// itself is not included. Links are never followed.
pub fn snapshot(root: &Path) -> io::Result<BTreeMap<PathBuf, Node>> {
    let mut nodes = BTreeMap::new();
    for item in WalkDir::new(root).follow_links(false).min_depth(1) {
        let item = item.map_err(io::Error::other)?;
        let relative = item
            .path()
            .strip_prefix(root)
            .map_err(io::Error::other)?
            .to_path_buf();
        let file_type = item.file_type();
        let node = if file_type.is_symlink() {
            Node::Link(fs::read_link(item.path())?)
        } else if file_type.is_dir() {
            Node::Dir
        } else {
            Node::File(sha256_of(item.path())?)
        };
        nodes.insert(relative, node);
    }
    Ok(nodes)
}

/// Builds the reference tree at `base/parent` and returns its path:
///
/// ```text
/// parent/
/// ├── bar.txt
/// ├── broken-symlink -> void
/// ├── foodir/
/// │   ├── bardir/
/// │   │   └── baz.txt -> ../../bar.txt
/// │   └── some-content.txt
/// ├── symlink-dir -> foodir
/// ├── symlink-file -> bar.txt
/// └── void -> /void
/// ```
#[cfg(unix)]
pub fn build_parent_tree(base: &Path) -> io::Result<PathBuf> {
    use std::os::unix::fs::symlink;

    let parent = base.join("parent");
    fs::create_dir_all(parent.join("foodir/bardir"))?;
    fs::write(parent.join("bar.txt"), "bar\n")?;
    fs::write(
        parent.join("foodir/some-content.txt"),
        "some content\nacross two lines\n",
    )?;
    symlink("../../bar.txt", parent.join("foodir/bardir/baz.txt"))?;
    symlink("foodir", parent.join("symlink-dir"))?;
    symlink("bar.txt", parent.join("symlink-file"))?;
    symlink("void", parent.join("broken-symlink"))?;
    symlink("/void", parent.join("void"))?;
    Ok(parent)
}
