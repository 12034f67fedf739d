//! # TarRS Pack Command
//!
//! File: cli/src/commands/pack.rs
//!
//! Implements `tarrs pack <DIR>`: archives the contents of `DIR` into
//! `DIR.tar`, then removes `DIR`. A path with any extension is refused before
//! anything is touched.
//!
use clap::Parser;
use std::path::PathBuf;
use tarrs::common::archive::in_place;
use tarrs::core::config::Config;
use tarrs::core::error::Result;
use tracing::info;

/// Arguments for `tarrs pack`.
#[derive(Parser, Debug)]
pub struct PackArgs {
    /// Directory to replace with its archive.
    pub directory: PathBuf,
}

pub fn handle_pack(args: PackArgs, config: &Config) -> Result<()> {
    info!("Handling pack command with args: {:?}", args);

    let archive = in_place::create_in_place_with(&args.directory, config)?;
    println!(
        "Packed {} into {}",
        args.directory.display(),
        archive.display()
    );
    Ok(())
}
