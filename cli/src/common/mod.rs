//! # TarRS Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared building blocks beneath the command handlers:
//!
//! - **`archive`**: the tar pack/unpack engine, including in-place mode and
//!   listing.
//! - **`fs`**: filesystem primitives the engine relies on. It covers directory
//!   creation and removal and literal symlink handling.
//!
//! Command handlers (`commands::`) stay thin and call into these modules;
//! configuration and error types live in `core::`.
//!

/// Tar archive creation, extraction, in-place mode, and listing.
pub mod archive;
/// Filesystem primitives (directory I/O, literal symlinks).
pub mod fs;
