//! # TarRS Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! This module groups the filesystem primitives the archive engine is built on.
//! Functionality is delegated to the following submodules:
//!
//! - **`io`**: directory creation (`ensure_dir_exists`) and the removal helpers
//!   used by the in-place wrappers.
//! - **`links`**: no-follow symlink handling. It reads and writes literal link
//!   targets and sets link timestamps.
//!
//! Callers import the specific submodule they need, e.g.
//! `crate::common::fs::links::read_link_literal`.
//!

/// Directory creation and removal helpers.
pub mod io;
/// Literal (no-follow) symbolic link reading and writing.
pub mod links;
