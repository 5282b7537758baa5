//! Importer core.
//!
//! The pipeline is linear: discover candidates, ensure the destination
//! exists, decide copy-vs-skip per file in sorted order, then emit the
//! manifest. There are no retries and no partial-failure semantics; the
//! first I/O error aborts the run and whatever was copied stays on disk.

mod types;

pub use types::{
    CopyRecord, FileCandidate, ImportRequest, ImportResult, SkipReason, Summary,
    SUPPORTED_EXTENSIONS,
};

use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{ImportError, Result};
use crate::utils::fs::{copy_with_mtime, ensure_dir};

/// Discover importable files under `source`.
///
/// Returns regular files whose extension (case-insensitive) is supported,
/// sorted case-insensitively by filename with ties kept in enumeration
/// order. Read-only; fails if `source` is not an existing directory.
pub fn discover(source: &Path, recursive: bool) -> Result<Vec<FileCandidate>> {
    if !source.is_dir() {
        return Err(ImportError::Config(format!(
            "Source folder does not exist or is not a directory: {}",
            source.display()
        )));
    }

    let mut walker = WalkDir::new(source).min_depth(1);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut candidates = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() || !has_supported_extension(entry.path()) {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().into_owned();
        candidates.push(FileCandidate {
            path: entry.into_path(),
            file_name,
        });
    }

    // Stable sort: equal filenames keep their enumeration order.
    candidates.sort_by_key(FileCandidate::sort_key);
    debug!(count = candidates.len(), "discovered candidates");
    Ok(candidates)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Process `candidates` into `dest`, copying or skipping each one.
///
/// Creates the destination tree once up front unless dry-run, in which case
/// nothing on the filesystem is touched at all.
pub fn execute(
    request: &ImportRequest,
    candidates: &[FileCandidate],
    dest: &Path,
    now: DateTime<Utc>,
) -> Result<ImportResult> {
    if !request.dry_run {
        ensure_dir(dest)?;
    }

    let mut copied = Vec::new();
    let mut skipped = Vec::new();

    for candidate in candidates {
        let target = dest.join(&candidate.file_name);

        if target.exists() && !request.overwrite {
            debug!(target = %target.display(), "skipping, target exists");
            skipped.push(CopyRecord::skipped(
                candidate.path.clone(),
                target,
                SkipReason::Exists,
            ));
            continue;
        }

        if request.dry_run {
            copied.push(CopyRecord::copied_dry_run(candidate.path.clone(), target));
            continue;
        }

        let bytes = copy_with_mtime(&candidate.path, &target)?;
        debug!(source = %candidate.path.display(), target = %target.display(), bytes, "copied");
        copied.push(CopyRecord::copied(candidate.path.clone(), target, bytes));
    }

    let summary = Summary {
        found: candidates.len(),
        copied: copied.len(),
        skipped: skipped.len(),
        recursive: request.recursive,
        dry_run: request.dry_run,
        overwrite: request.overwrite,
        timestamp_utc: now,
    };

    Ok(ImportResult {
        batch: request.batch.clone(),
        source: request.source.clone(),
        destination: dest.to_path_buf(),
        copied,
        skipped,
        summary,
    })
}

/// Serialize `result` as indented JSON at `path`, replacing any prior
/// manifest there.
pub fn write_manifest(result: &ImportResult, path: &Path) -> Result<()> {
    let payload = serde_json::to_string_pretty(result)?;
    std::fs::write(path, payload)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use chrono::Utc;
    use tempfile::tempdir;

    use super::*;

    fn touch(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn request(source: &Path, root: &Path) -> ImportRequest {
        ImportRequest {
            source: source.to_path_buf(),
            batch: "test-batch".to_string(),
            repo_root: root.to_path_buf(),
            recursive: false,
            dry_run: false,
            overwrite: false,
        }
    }

    #[test]
    fn discover_filters_and_sorts_case_insensitively() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "B.MP4", "bb");
        touch(dir.path(), "a.mov", "aa");
        touch(dir.path(), "c.txt", "cc");
        touch(dir.path(), "d.WEBM", "dd");
        touch(dir.path(), "E.M4v", "ee");

        let names: Vec<String> = discover(dir.path(), false)
            .unwrap()
            .into_iter()
            .map(|c| c.file_name)
            .collect();
        assert_eq!(names, ["a.mov", "B.MP4", "d.WEBM", "E.M4v"]);
    }

    #[test]
    fn discover_ignores_subdirectories_unless_recursive() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "top.mp4", "t");
        let sub = dir.path().join("nested");
        fs::create_dir(&sub).unwrap();
        touch(&sub, "deep.mov", "d");

        let flat = discover(dir.path(), false).unwrap();
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].file_name, "top.mp4");

        let names: Vec<String> = discover(dir.path(), true)
            .unwrap()
            .into_iter()
            .map(|c| c.file_name)
            .collect();
        assert_eq!(names, ["deep.mov", "top.mp4"]);
    }

    #[test]
    fn discover_rejects_missing_or_non_directory_source() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            discover(&missing, false),
            Err(ImportError::Config(_))
        ));

        let file = touch(dir.path(), "a.mp4", "a");
        assert!(matches!(discover(&file, false), Err(ImportError::Config(_))));
    }

    #[test]
    fn execute_copies_in_order_and_reads_back_sizes() {
        let source_dir = tempdir().unwrap();
        let root = tempdir().unwrap();
        touch(source_dir.path(), "B.MP4", "bytes-of-b");
        touch(source_dir.path(), "a.mov", "a");

        let req = request(source_dir.path(), root.path());
        let dest = root.path().join("videos");
        let candidates = discover(source_dir.path(), false).unwrap();
        let result = execute(&req, &candidates, &dest, Utc::now()).unwrap();

        assert_eq!(result.summary.found, 2);
        assert_eq!(result.summary.copied, 2);
        assert_eq!(result.summary.skipped, 0);
        match &result.copied[0] {
            CopyRecord::Copied { target, bytes, .. } => {
                assert!(target.ends_with("a.mov"));
                assert_eq!(*bytes, 1);
            }
            other => panic!("expected Copied, got {other:?}"),
        }
        match &result.copied[1] {
            CopyRecord::Copied { target, bytes, .. } => {
                assert!(target.ends_with("B.MP4"));
                assert_eq!(*bytes, "bytes-of-b".len() as u64);
            }
            other => panic!("expected Copied, got {other:?}"),
        }
        assert!(dest.join("a.mov").is_file());
        assert!(dest.join("B.MP4").is_file());
    }

    #[test]
    fn execute_dry_run_touches_nothing() {
        let source_dir = tempdir().unwrap();
        let root = tempdir().unwrap();
        touch(source_dir.path(), "a.mov", "a");

        let mut req = request(source_dir.path(), root.path());
        req.dry_run = true;
        let dest = root.path().join("videos");
        let candidates = discover(source_dir.path(), false).unwrap();
        let result = execute(&req, &candidates, &dest, Utc::now()).unwrap();

        assert!(!dest.exists());
        assert_eq!(result.summary.copied, 1);
        assert!(matches!(
            result.copied[0],
            CopyRecord::CopiedDryRun { dry_run: true, .. }
        ));
    }

    #[test]
    fn execute_skips_existing_targets_without_overwrite() {
        let source_dir = tempdir().unwrap();
        let root = tempdir().unwrap();
        touch(source_dir.path(), "a.mov", "new-bytes");

        let req = request(source_dir.path(), root.path());
        let dest = root.path().join("videos");
        fs::create_dir_all(&dest).unwrap();
        touch(&dest, "a.mov", "old");

        let candidates = discover(source_dir.path(), false).unwrap();
        let result = execute(&req, &candidates, &dest, Utc::now()).unwrap();

        assert_eq!(result.summary.skipped, 1);
        assert_eq!(result.summary.copied, 0);
        assert!(matches!(
            result.skipped[0],
            CopyRecord::Skipped {
                reason: SkipReason::Exists,
                ..
            }
        ));
        // Untouched.
        assert_eq!(fs::read_to_string(dest.join("a.mov")).unwrap(), "old");
    }

    #[test]
    fn execute_overwrite_replaces_existing_bytes() {
        let source_dir = tempdir().unwrap();
        let root = tempdir().unwrap();
        touch(source_dir.path(), "a.mov", "new-bytes");

        let mut req = request(source_dir.path(), root.path());
        req.overwrite = true;
        let dest = root.path().join("videos");
        fs::create_dir_all(&dest).unwrap();
        touch(&dest, "a.mov", "old");

        let candidates = discover(source_dir.path(), false).unwrap();
        let result = execute(&req, &candidates, &dest, Utc::now()).unwrap();

        assert_eq!(result.summary.copied, 1);
        assert_eq!(result.summary.skipped, 0);
        assert_eq!(
            fs::read_to_string(dest.join("a.mov")).unwrap(),
            "new-bytes"
        );
    }

    #[test]
    fn manifest_round_trips_through_disk() {
        let source_dir = tempdir().unwrap();
        let root = tempdir().unwrap();
        touch(source_dir.path(), "a.mov", "aa");

        let req = request(source_dir.path(), root.path());
        let dest = root.path().join("videos");
        let candidates = discover(source_dir.path(), false).unwrap();
        let result = execute(&req, &candidates, &dest, Utc::now()).unwrap();

        let manifest_path = root.path().join("video-import-manifest.json");
        write_manifest(&result, &manifest_path).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&manifest_path).unwrap()).unwrap();
        assert_eq!(parsed["batch"], "test-batch");
        assert_eq!(parsed["summary"]["found"], 1);
        assert_eq!(parsed["copied"][0]["bytes"], 2);
        assert!(parsed["summary"]["timestamp_utc"].is_string());
    }
}
