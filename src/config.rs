//! Inbox layout and repo-root resolution.
//!
//! The destination layout (`content/dad-inbox/<batch>/videos/`) is a fixed
//! convention of the repo, expressed here as an explicit value so tests can
//! redirect it to a temporary root.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::Result;

/// Relative layout of the content inbox inside a repo checkout.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Inbox directory, relative to the repo root.
    pub inbox_dir: PathBuf,
    /// Subfolder holding the copied videos inside a batch.
    pub videos_subdir: String,
    /// Manifest filename, written next to the videos subfolder.
    pub manifest_name: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            inbox_dir: PathBuf::from("content/dad-inbox"),
            videos_subdir: "videos".to_string(),
            manifest_name: "video-import-manifest.json".to_string(),
        }
    }
}

impl Layout {
    /// Default layout, with the inbox path overridable via `DAD_IMPORT_INBOX`.
    #[must_use]
    pub fn from_env() -> Self {
        let mut layout = Self::default();
        if let Ok(dir) = std::env::var("DAD_IMPORT_INBOX") {
            if !dir.is_empty() {
                layout.inbox_dir = PathBuf::from(dir);
            }
        }
        layout
    }

    /// Directory a batch's videos are copied into.
    #[must_use]
    pub fn batch_videos_dir(&self, repo_root: &Path, batch: &str) -> PathBuf {
        repo_root
            .join(&self.inbox_dir)
            .join(batch)
            .join(&self.videos_subdir)
    }

    /// Manifest path for a batch.
    #[must_use]
    pub fn manifest_path(&self, repo_root: &Path, batch: &str) -> PathBuf {
        repo_root
            .join(&self.inbox_dir)
            .join(batch)
            .join(&self.manifest_name)
    }
}

/// Default batch name for an import started at `now`.
#[must_use]
pub fn default_batch_name(now: DateTime<Utc>) -> String {
    format!("{}-dad-drop-auto", now.format("%Y-%m-%d"))
}

/// Resolve the repo root: explicit flag, then `DAD_IMPORT_ROOT`, then the
/// nearest ancestor of the current directory containing the inbox, then the
/// current directory itself. Always returns an absolute path so manifest
/// entries stay absolute.
pub fn resolve_repo_root(explicit: Option<&Path>, layout: &Layout) -> Result<PathBuf> {
    if let Some(root) = explicit {
        return absolutize(root);
    }
    if let Ok(root) = std::env::var("DAD_IMPORT_ROOT") {
        if !root.is_empty() {
            return absolutize(Path::new(&root));
        }
    }
    let cwd = std::env::current_dir()?;
    Ok(find_upwards(&cwd, &layout.inbox_dir).unwrap_or(cwd))
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

fn find_upwards(start: &Path, marker: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(marker).is_dir() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}
