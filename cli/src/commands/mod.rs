//! # TarRS Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! One module per top-level command of the `tarrs` binary. Each defines an
//! `Args` struct for Clap and a `handle_*` function that `main.rs` routes to.
//!
//! ## Commands
//!
//! - `create`: archive a directory (`tarrs create <ARCHIVE> <SOURCE>`)
//! - `extract`: restore an archive (`tarrs extract <ARCHIVE> [DEST]`)
//! - `pack`: in-place creation (`tarrs pack <DIR>`)
//! - `unpack`: in-place extraction (`tarrs unpack <ARCHIVE>`)
//! - `list`: show archive entries (`tarrs list <ARCHIVE> [--long]`)
//!
//! Handlers print a short summary to stdout; logging goes to stderr.
//!

pub mod create;
pub mod extract;
pub mod list;
pub mod pack;
pub mod unpack;
