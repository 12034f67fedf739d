//! # TarRS Create Command
//!
//! File: cli/src/commands/create.rs
//!
//! ## Overview
//!
//! Implements `tarrs create <ARCHIVE> <SOURCE>`. The spelling of `SOURCE`
//! decides the archive root:
//!
//! ```bash
//! tarrs create parent.tar testdata/parent    # entries start with parent/
//! tarrs create parent.tar testdata/parent/   # entries are parent's children
//! ```
//!
//! `--no-atomic` writes straight to the destination instead of staging in a
//! temporary file, overriding `create.atomic` from the configuration.
//!
use clap::Parser;
use std::path::PathBuf;
use tarrs::core::config::Config;
use tarrs::core::error::Result;
use tarrs::Archiver;
use tracing::info;

/// Arguments for `tarrs create`.
#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Path of the archive to write. An existing file is overwritten.
    pub archive: PathBuf,
    /// Directory to archive. A trailing slash archives only its contents.
    pub source: PathBuf,
    /// Write directly to ARCHIVE instead of renaming a finished temporary file.
    #[arg(long)]
    pub no_atomic: bool,
}

pub fn handle_create(args: CreateArgs, config: &Config) -> Result<()> {
    info!("Handling create command with args: {:?}", args);

    let mut create_config = config.create;
    if args.no_atomic {
        create_config.atomic = false;
    }

    let counts = Archiver::new(create_config).create(&args.archive, &args.source)?;
    println!(
        "Created {} ({} directories, {} files, {} symlinks)",
        args.archive.display(),
        counts.directories,
        counts.files,
        counts.symlinks
    );
    if counts.skipped > 0 {
        println!("Skipped {} unsupported entries.", counts.skipped);
    }
    Ok(())
}
