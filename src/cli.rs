//! Command-line surface.
//!
//! One operation, so the arguments live directly on [`Cli`] with no
//! subcommands. `run` is the whole pipeline: resolve, discover, copy, emit.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::Parser;
use console::style;
use tracing::info;

use crate::config::{self, Layout};
use crate::error::{ImportError, Result};
use crate::import::{self, ImportRequest};

#[derive(Parser, Debug)]
#[command(
    name = "dad-import",
    version,
    about = "Import Dad videos from an external folder into a dated inbox batch"
)]
pub struct Cli {
    /// External source folder containing videos
    #[arg(long, value_name = "PATH")]
    pub source: PathBuf,

    /// Batch folder name under the inbox (default: today's UTC auto batch)
    #[arg(long, value_name = "NAME")]
    pub batch: Option<String>,

    /// Repo root containing the content inbox (default: auto-detected)
    #[arg(long, value_name = "PATH")]
    pub repo_root: Option<PathBuf>,

    /// Scan the source folder recursively
    #[arg(long)]
    pub recursive: bool,

    /// Show planned copies without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Overwrite existing files in the destination
    #[arg(long)]
    pub overwrite: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Execute one import run from parsed arguments.
pub fn run(cli: &Cli) -> Result<()> {
    let now = Utc::now();
    let layout = Layout::from_env();
    let request = build_request(cli, &layout, now)?;

    info!(batch = %request.batch, source = %request.source.display(), "starting import");

    let candidates = import::discover(&request.source, request.recursive)?;
    if candidates.is_empty() {
        println!("No supported video files found. Nothing to import.");
        return Ok(());
    }

    let dest = layout.batch_videos_dir(&request.repo_root, &request.batch);
    let result = import::execute(&request, &candidates, &dest, now)?;

    if !request.dry_run {
        let manifest_path = layout.manifest_path(&request.repo_root, &request.batch);
        import::write_manifest(&result, &manifest_path)?;
        println!("Wrote manifest: {}", style(manifest_path.display()).dim());
    }

    println!("{}", serde_json::to_string_pretty(&result.summary)?);
    Ok(())
}

/// Resolve CLI arguments into an immutable [`ImportRequest`].
///
/// The batch default derives from the injected `now` rather than a
/// parse-time default, so tests control the clock.
pub fn build_request(cli: &Cli, layout: &Layout, now: DateTime<Utc>) -> Result<ImportRequest> {
    let source = resolve_source(&cli.source)?;
    let repo_root = config::resolve_repo_root(cli.repo_root.as_deref(), layout)?;
    let batch = cli
        .batch
        .clone()
        .unwrap_or_else(|| config::default_batch_name(now));

    Ok(ImportRequest {
        source,
        batch,
        repo_root,
        recursive: cli.recursive,
        dry_run: cli.dry_run,
        overwrite: cli.overwrite,
    })
}

fn resolve_source(raw: &Path) -> Result<PathBuf> {
    if !raw.is_dir() {
        return Err(ImportError::Config(format!(
            "Source folder does not exist or is not a directory: {}",
            raw.display()
        )));
    }
    Ok(std::fs::canonicalize(raw)?)
}
