//! # TarRS Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file is the entry point of the `tarrs` binary. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading the layered configuration (`--config` / `TARRS_CONFIG`)
//! - Routing execution to the command handlers
//!
//! ## Architecture
//!
//! Every subcommand is a variant of the `Commands` enum and maps to one
//! `handle_*` function in `commands::`. Handlers are thin: they translate
//! arguments into calls on the `tarrs` library and print a summary. All errors
//! propagate up to here, where they are logged and printed uniformly.
//!
//! ## Examples
//!
//! ```bash
//! # Archive a directory (the directory itself is the top-level entry)
//! tarrs create parent.tar testdata/parent
//!
//! # Archive only its contents
//! tarrs create contents.tar testdata/parent/
//!
//! # Swap a directory for its archive, and back
//! tarrs -v pack testdata/parent
//! tarrs -v unpack testdata/parent.tar
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "tarrs",
    about = "TarRS: tar archives that keep symlinks as symlinks",
    long_about = "Pack directory trees into plain tar archives and unpack them again.\n\
                  Symbolic links are stored with their literal target and never followed.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Configuration file layered over the user configuration.
    #[arg(long, global = true, env = "TARRS_CONFIG", value_name = "FILE")]
    config: Option<String>,
}

/// All available commands.
#[derive(Parser, Debug)]
enum Commands {
    /// Create an archive from a directory.
    #[command(alias = "c")]
    Create(commands::create::CreateArgs),
    /// Extract an archive into a directory.
    #[command(alias = "x")]
    Extract(commands::extract::ExtractArgs),
    /// Replace a directory with `<dir>.tar`.
    #[command(alias = "p")]
    Pack(commands::pack::PackArgs),
    /// Replace `<name>.tar` with the directory `<name>`.
    #[command(alias = "u")]
    Unpack(commands::unpack::UnpackArgs),
    /// List the entries of an archive.
    #[command(visible_alias = "t", alias = "l")]
    List(commands::list::ListArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = tarrs::core::config::load_config(cli.config.as_deref()).and_then(
        |config| match cli.command {
            Commands::Create(args) => commands::create::handle_create(args, &config),
            Commands::Extract(args) => commands::extract::handle_extract(args, &config),
            Commands::Pack(args) => commands::pack::handle_pack(args, &config),
            Commands::Unpack(args) => commands::unpack::handle_unpack(args, &config),
            Commands::List(args) => commands::list::handle_list(args),
        },
    );

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_cmd::Command;
    use clap::CommandFactory;
    use predicates::prelude::*;

    fn tarrs_cmd() -> Command {
        Command::cargo_bin("tarrs").expect("Failed to find tarrs binary for testing")
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_main_help_flag() {
        tarrs_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("unpack"));
    }

    #[test]
    fn test_main_version_flag() {
        tarrs_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_aliases_parse() {
        let cli = Cli::try_parse_from(["tarrs", "x", "a.tar"]).expect("alias x parses");
        assert!(matches!(cli.command, Commands::Extract(_)));
        let cli = Cli::try_parse_from(["tarrs", "t", "a.tar"]).expect("alias t parses");
        assert!(matches!(cli.command, Commands::List(_)));
    }
}
