//! Docs tree traversal and batch runs
//!
//! Collects every Markdown page under the docs root, then processes them one
//! at a time. The file list is gathered before anything is written, so
//! deletions never disturb the walk.

use crate::errors::{docs_dir_not_a_directory, docs_dir_not_found};
use crate::processor::{remove_index_file, FileOutcome, FileProcessor, ProcessOptions, PrunePolicy};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Aggregate result of one run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub docs_dir: PathBuf,
    pub dry_run: bool,
    pub files: Vec<FileOutcome>,
    pub totals: RunTotals,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunTotals {
    pub processed: usize,
    pub changed: usize,
    pub source_links: usize,
    pub inherits_paths: usize,
    pub deleted: usize,
}

impl RunReport {
    fn new(docs_dir: &Path, dry_run: bool) -> Self {
        Self {
            docs_dir: docs_dir.to_path_buf(),
            dry_run,
            ..Default::default()
        }
    }

    fn record(&mut self, outcome: FileOutcome) {
        self.totals.processed += 1;
        if outcome.changed {
            self.totals.changed += 1;
        }
        if outcome.deleted {
            self.totals.deleted += 1;
        }
        self.totals.source_links += outcome.source_links;
        self.totals.inherits_paths += outcome.inherits_paths;
        self.files.push(outcome);
    }
}

/// Check that `root` is an existing directory.
pub fn ensure_docs_dir(root: &Path) -> Result<()> {
    if !root.exists() {
        return Err(docs_dir_not_found(root).into());
    }
    if !root.is_dir() {
        return Err(docs_dir_not_a_directory(root).into());
    }
    Ok(())
}

/// Collect every `.md` file under `root`, sorted by name within each
/// directory. The extension is matched case-insensitively; symlinks are not
/// followed.
pub fn collect_markdown_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let is_markdown = entry
            .path()
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("md"))
            .unwrap_or(false);
        if is_markdown {
            files.push(entry.into_path());
        }
    }

    debug!(root = %root.display(), count = files.len(), "Collected markdown files");
    Ok(files)
}

/// Process every Markdown file under the processor's docs root.
///
/// Stops at the first failure; files already processed stay modified.
pub fn process_tree(processor: &FileProcessor, options: ProcessOptions) -> Result<RunReport> {
    let root = processor.docs_root();
    ensure_docs_dir(root)?;

    let mut report = RunReport::new(root, options.dry_run);
    for path in collect_markdown_files(root)? {
        let outcome = processor.process_file(&path, options)?;
        report.record(outcome);
    }

    Ok(report)
}

/// Delete (or, in a dry run, list) every index file under `root`.
pub fn prune_tree(root: &Path, policy: &PrunePolicy, dry_run: bool) -> Result<RunReport> {
    ensure_docs_dir(root)?;

    let mut report = RunReport::new(root, dry_run);
    for path in collect_markdown_files(root)? {
        if !policy.is_index_file(&path) {
            continue;
        }
        if !dry_run {
            remove_index_file(&path)?;
        }
        report.record(FileOutcome {
            path,
            deleted: true,
            ..Default::default()
        });
    }

    Ok(report)
}
