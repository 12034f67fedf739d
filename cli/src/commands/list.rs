//! # TarRS List Command
//!
//! File: cli/src/commands/list.rs
//!
//! ## Overview
//!
//! Implements `tarrs list <ARCHIVE>`, printing every entry path in stream
//! order. Nothing is extracted.
//!
//! With `--long`, each line follows `ls -l`:
//!
//! ```text
//! drwxr-xr-x        0 2024-03-10 14:02 parent/
//! -rw-r--r--        4 2024-03-10 14:02 parent/bar.txt
//! lrwxrwxrwx        0 2024-03-10 14:02 parent/void -> /void
//! ```
//!
//! Times are shown in UTC.
//!
use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::PathBuf;
use tarrs::core::error::Result;
use tarrs::{ArchiveEntry, EntryKind};
use tracing::info;

/// Arguments for `tarrs list`.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Archive to list.
    pub archive: PathBuf,
    /// Show mode, size, modification time, and link targets.
    #[arg(short, long)]
    pub long: bool,
}

pub fn handle_list(args: ListArgs) -> Result<()> {
    info!("Handling list command with args: {:?}", args);

    let entries = tarrs::list(&args.archive)?;
    for entry in &entries {
        if args.long {
            println!("{}", format_long(entry));
        } else {
            println!("{}", display_path(entry));
        }
    }
    Ok(())
}

/// Entry path as shown to the user; directories end in `/`.
fn display_path(entry: &ArchiveEntry) -> String {
    let path = entry.path.to_string_lossy().replace('\\', "/");
    match entry.kind {
        EntryKind::Directory if !path.ends_with('/') => format!("{}/", path),
        _ => path,
    }
}

fn format_long(entry: &ArchiveEntry) -> String {
    let mtime = DateTime::<Utc>::from_timestamp(entry.mtime as i64, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "????-??-?? ??:??".to_string());
    let mut line = format!(
        "{} {:>8} {} {}",
        entry.mode_string(),
        entry.size,
        mtime,
        display_path(entry)
    );
    if let EntryKind::Symlink { target } = &entry.kind {
        line.push_str(" -> ");
        line.push_str(&target.to_string_lossy());
    }
    line
}
