//! Core types for one import run.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// File extensions (lowercase, no dot) eligible for import.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["mp4", "mov", "m4v", "webm"];

/// One import run's configuration.
///
/// Built once from the parsed CLI arguments plus resolved defaults, and
/// immutable afterwards.
#[derive(Debug, Clone)]
pub struct ImportRequest {
    /// Resolved external source folder.
    pub source: PathBuf,
    /// Batch folder name under the inbox.
    pub batch: String,
    /// Resolved repo root the inbox lives under.
    pub repo_root: PathBuf,
    /// Scan the source folder recursively.
    pub recursive: bool,
    /// Plan and report without touching the filesystem.
    pub dry_run: bool,
    /// Replace destination files that already exist.
    pub overwrite: bool,
}

/// A discovered file whose extension is in [`SUPPORTED_EXTENSIONS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    /// Full path to the source file.
    pub path: PathBuf,
    /// Filename only; used for ordering and as the target filename.
    pub file_name: String,
}

impl FileCandidate {
    /// Case-insensitive ordering key. Filename only, never the full path.
    #[must_use]
    pub fn sort_key(&self) -> String {
        self.file_name.to_lowercase()
    }
}

/// Why a candidate was not copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Target already present and overwrite not requested.
    Exists,
}

impl SkipReason {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exists => "exists",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of processing a single candidate.
///
/// Serializes to the manifest entry shapes: `{source, target, bytes}` for a
/// real copy, `{source, target, dry_run: true}` for a planned one, and
/// `{source, target, reason}` for a skip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CopyRecord {
    Copied {
        source: PathBuf,
        target: PathBuf,
        /// Byte size read back from the target after the copy.
        bytes: u64,
    },
    CopiedDryRun {
        source: PathBuf,
        target: PathBuf,
        dry_run: bool,
    },
    Skipped {
        source: PathBuf,
        target: PathBuf,
        reason: SkipReason,
    },
}

impl CopyRecord {
    #[must_use]
    pub fn copied(source: PathBuf, target: PathBuf, bytes: u64) -> Self {
        Self::Copied {
            source,
            target,
            bytes,
        }
    }

    #[must_use]
    pub fn copied_dry_run(source: PathBuf, target: PathBuf) -> Self {
        Self::CopiedDryRun {
            source,
            target,
            dry_run: true,
        }
    }

    #[must_use]
    pub fn skipped(source: PathBuf, target: PathBuf, reason: SkipReason) -> Self {
        Self::Skipped {
            source,
            target,
            reason,
        }
    }

    /// True for both real and dry-run copies.
    #[must_use]
    pub const fn is_copy(&self) -> bool {
        matches!(self, Self::Copied { .. } | Self::CopiedDryRun { .. })
    }
}

/// Counts and flags for one run; printed to stdout and embedded in the
/// manifest.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub found: usize,
    pub copied: usize,
    pub skipped: usize,
    pub recursive: bool,
    pub dry_run: bool,
    pub overwrite: bool,
    pub timestamp_utc: DateTime<Utc>,
}

/// Aggregate record of one run; serialized verbatim as the manifest.
///
/// `copied` and `skipped` each preserve discovery order after the
/// case-insensitive filename sort. Built once, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct ImportResult {
    pub batch: String,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub copied: Vec<CopyRecord>,
    pub skipped: Vec<CopyRecord>,
    pub summary: Summary,
}
