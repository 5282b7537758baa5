//! Error types for dad-import.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImportError>;

#[derive(Debug, Error)]
pub enum ImportError {
    /// Bad or missing user-supplied configuration (source folder, repo root).
    #[error("{0}")]
    Config(String),

    /// I/O failure during scan, copy, or manifest write. Not caught anywhere;
    /// the first one aborts the run and completed copies stay on disk.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error("serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),
}
