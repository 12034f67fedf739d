//! # TarRS Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the infrastructure shared by the archive engine and
//! the command handlers:
//! - `config`: layered configuration loading (defaults, user file, explicit file)
//! - `error`: the `TarrsError` kinds and the crate-wide `Result` alias
//!
//! ## Usage
//!
//! ```rust
//! use tarrs::core::config::Config;
//! use tarrs::core::error::{Result, TarrsError};
//! ```
//!
pub mod config;
pub mod error;
