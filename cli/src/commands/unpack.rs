//! # TarRS Unpack Command
//!
//! File: cli/src/commands/unpack.rs
//!
//! Implements `tarrs unpack <ARCHIVE>`: extracts `name.tar` into `name`, then
//! removes the archive. Only the literal `.tar` extension is accepted.
//!
use clap::Parser;
use std::path::PathBuf;
use tarrs::common::archive::in_place;
use tarrs::core::config::Config;
use tarrs::core::error::Result;
use tracing::info;

/// Arguments for `tarrs unpack`.
#[derive(Parser, Debug)]
pub struct UnpackArgs {
    /// Archive to replace with its contents. Must end in `.tar`.
    pub archive: PathBuf,
}

pub fn handle_unpack(args: UnpackArgs, config: &Config) -> Result<()> {
    info!("Handling unpack command with args: {:?}", args);

    let directory = in_place::extract_in_place_with(&args.archive, config)?;
    println!(
        "Unpacked {} into {}",
        args.archive.display(),
        directory.display()
    );
    Ok(())
}
