//! confsplice: rewrite one section of an indentation-structured config file.
//!
//! The document is scanned line by line rather than parsed, so every byte outside the
//! targeted section survives a rewrite untouched, comments and blank lines included.
#![allow(clippy::multiple_crate_versions)]

pub mod apply;
pub mod config;
pub mod directory;
pub mod error;
pub mod flow;
pub mod formats;
pub mod payload;
pub mod registry;
pub mod rewrite;
pub mod section;

pub use apply::{apply_to_file, backup_path, Applied};
pub use error::{FlowError, RegistryError, RewriteError};
pub use rewrite::{rewrite, Rewrite, RewriteOptions};
