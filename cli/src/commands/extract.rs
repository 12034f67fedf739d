//! # TarRS Extract Command
//!
//! File: cli/src/commands/extract.rs
//!
//! Implements `tarrs extract <ARCHIVE> [DEST]`. `DEST` defaults to the
//! current directory and is created if missing. Metadata restoration follows
//! the `[extract]` configuration section.
//!
use clap::Parser;
use std::path::PathBuf;
use tarrs::core::config::Config;
use tarrs::core::error::Result;
use tarrs::Extractor;
use tracing::info;

/// Arguments for `tarrs extract`.
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// Archive to read.
    pub archive: PathBuf,
    /// Directory to extract into.
    #[arg(default_value = ".")]
    pub destination: PathBuf,
}

pub fn handle_extract(args: ExtractArgs, config: &Config) -> Result<()> {
    info!("Handling extract command with args: {:?}", args);

    let counts = Extractor::new(config.extract).extract(&args.destination, &args.archive)?;
    println!(
        "Extracted {} into {} ({} directories, {} files, {} symlinks)",
        args.archive.display(),
        args.destination.display(),
        counts.directories,
        counts.files,
        counts.symlinks
    );
    if counts.skipped > 0 {
        println!("Skipped {} unsupported entries.", counts.skipped);
    }
    Ok(())
}
