//! # TarRS Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads the small set of behavior toggles the archive engine
//! honors: whether archive creation is staged through a temporary file, and
//! which stored metadata extraction restores. Nothing here changes *what* ends
//! up in an archive; the entry format is fixed.
//!
//! ## Architecture
//!
//! Configuration sources (later sources override earlier ones, key by key):
//! 1. Default values defined in the code (`Config::default()`)
//! 2. User-specific `config.toml` in the platform config dir
//!    (e.g. `~/.config/tarrs/config.toml` on Linux)
//! 3. An explicit file given via `--config` or `TARRS_CONFIG` (`~` is expanded)
//!
//! Each file is parsed into an all-optional `ConfigFile` layer so a file that
//! only sets `extract.preserve_mtime` leaves every other value untouched.
//! Unknown keys are rejected.
//!
//! ## Examples
//!
//! ```toml
//! [create]
//! atomic = true
//!
//! [extract]
//! preserve_permissions = true
//! preserve_mtime = false
//! ```
//!
//! ```rust,no_run
//! let cfg = tarrs::core::config::load_config(None)?;
//! let archiver = tarrs::Archiver::new(cfg.create);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
use crate::core::error::{Result, TarrsError};
use anyhow::Context;
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Effective configuration after all layers have been applied.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub create: CreateConfig,
    pub extract: ExtractConfig,
}

/// Settings for archive creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateConfig {
    /// Write into a temporary file next to the destination and rename it into
    /// place only once the archive is complete.
    pub atomic: bool,
}

impl Default for CreateConfig {
    fn default() -> Self {
        Self { atomic: true }
    }
}

/// Settings for archive extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Apply the mode bits stored in each entry header.
    pub preserve_permissions: bool,
    /// Apply the modification time stored in each entry header.
    pub preserve_mtime: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            preserve_permissions: true,
            preserve_mtime: true,
        }
    }
}

/// One configuration file, as written on disk. Every key is optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    create: CreateSection,
    #[serde(default)]
    extract: ExtractSection,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct CreateSection {
    atomic: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct ExtractSection {
    preserve_permissions: Option<bool>,
    preserve_mtime: Option<bool>,
}

impl Config {
    /// Overlays the keys present in `layer` onto `self`.
    fn apply(&mut self, layer: ConfigFile) {
        if let Some(atomic) = layer.create.atomic {
            self.create.atomic = atomic;
        }
        if let Some(perms) = layer.extract.preserve_permissions {
            self.extract.preserve_permissions = perms;
        }
        if let Some(mtime) = layer.extract.preserve_mtime {
            self.extract.preserve_mtime = mtime;
        }
    }
}

const USER_CONFIG_FILENAME: &str = "config.toml";

/// Loads the effective configuration.
///
/// `explicit` is the raw `--config` / `TARRS_CONFIG` value, if any. Unlike the
/// optional user file, an explicit file that does not exist is an error.
pub fn load_config(explicit: Option<&str>) -> Result<Config> {
    let user_path = user_config_path();
    let explicit_path = explicit.map(expand_path);
    let config = load_config_layers(user_path.as_deref(), explicit_path.as_deref())?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_config_layers(user: Option<&Path>, explicit: Option<&Path>) -> Result<Config> {
    let mut config = Config::default();

    if let Some(user_path) = user {
        if user_path.is_file() {
            info!("Loading user configuration from: {}", user_path.display());
            config.apply(load_config_from_path(user_path)?);
        } else {
            debug!(
                "User configuration file not found at {}",
                user_path.display()
            );
        }
    }

    if let Some(explicit_path) = explicit {
        if !explicit_path.is_file() {
            return Err(TarrsError::Config(format!(
                "Configuration file '{}' does not exist or is not a file.",
                explicit_path.display()
            ))
            .into());
        }
        info!("Loading configuration from: {}", explicit_path.display());
        config.apply(load_config_from_path(explicit_path)?);
    }

    Ok(config)
}

fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "TarRS", "tarrs")
        .map(|dirs| dirs.config_dir().join(USER_CONFIG_FILENAME))
}

fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .map_err(|e| TarrsError::Config(format!("{}: {}", path.display(), e)))
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.create.atomic);
        assert!(config.extract.preserve_permissions);
        assert!(config.extract.preserve_mtime);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "[extract]\npreserve_mtime = false\n")?;

        let config = load_config_layers(None, Some(&path))?;
        assert!(config.create.atomic);
        assert!(config.extract.preserve_permissions);
        assert!(!config.extract.preserve_mtime);
        Ok(())
    }

    #[test]
    fn test_explicit_overrides_user() -> Result<()> {
        let dir = tempdir()?;
        let user = dir.path().join("user.toml");
        let explicit = dir.path().join("explicit.toml");
        fs::write(
            &user,
            "[create]\natomic = false\n[extract]\npreserve_permissions = false\n",
        )?;
        fs::write(&explicit, "[create]\natomic = true\n")?;

        let config = load_config_layers(Some(&user), Some(&explicit))?;
        assert!(config.create.atomic, "explicit file wins for create.atomic");
        assert!(
            !config.extract.preserve_permissions,
            "user value survives where the explicit file is silent"
        );
        Ok(())
    }

    #[test]
    fn test_missing_user_file_is_ignored() -> Result<()> {
        let dir = tempdir()?;
        let config = load_config_layers(Some(&dir.path().join("nope.toml")), None)?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempdir().unwrap();
        let err = load_config_layers(None, Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TarrsError>(),
            Some(TarrsError::Config(_))
        ));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[create]\ncompression = \"gzip\"\n").unwrap();

        let err = load_config_layers(None, Some(&path)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TarrsError>(),
            Some(TarrsError::Config(_))
        ));
    }

    #[test]
    fn test_expand_path_tilde() {
        let expanded = expand_path("~/tarrs.toml");
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.ends_with("tarrs.toml"));
    }
}
