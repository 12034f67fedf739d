//! # TarRS Archive Engine (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//!
//! ## Overview
//!
//! This module packs directory trees into plain tar archives and unpacks them
//! again. Symbolic links are stored and restored as links with their literal
//! target, so relative, broken, and absolute links all survive unchanged.
//!
//! ## Architecture
//!
//! - **`resolve`**: pre-flight validation and the trailing-slash root rule.
//!   Pure path logic plus `stat`.
//! - **`entry`**: `ArchiveEntry`, the unit passed between the filesystem and
//!   the `tar` codec, and `EntryCounts`.
//! - **`create`**: the `Archiver` (walk and serialize).
//! - **`extract`**: the `Extractor` (deserialize and restore, with the
//!   traversal guard).
//! - **`in_place`**: the `dir <-> dir.tar` swap built on the two above.
//! - **`inspect`**: read-only listing of an archive's entries.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tarrs::common::archive::{self, Archiver, Extractor};
//!
//! # fn main() -> tarrs::core::error::Result<()> {
//! Archiver::default().create("parent.tar", "testdata/parent")?;
//! for entry in archive::list("parent.tar")? {
//!     println!("{}", entry.path.display());
//! }
//! Extractor::default().extract("restored", "parent.tar")?;
//! # Ok(())
//! # }
//! ```
//!

pub mod create;
pub mod entry;
pub mod extract;
pub mod in_place;
pub mod inspect;
pub mod resolve;

pub use create::Archiver;
pub use entry::{ArchiveEntry, EntryCounts, EntryKind};
pub use extract::Extractor;
pub use inspect::list;
pub use resolve::ARCHIVE_EXTENSION;
