//! Library core for the `dad-import` CLI.
//!
//! Copies video files from an external drop folder into a dated batch
//! directory under the repo's content inbox, and records a JSON manifest
//! of what was copied or skipped.

pub mod cli;
pub mod config;
pub mod error;
pub mod import;
pub mod utils;

pub use error::{ImportError, Result};
