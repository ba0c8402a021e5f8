//! Per-file processing
//!
//! Reads one generated page, normalizes its Inherits line, rewrites its
//! source links, writes it back in place and deletes it if it is an index
//! file Docusaurus doesn't need.

use crate::config::ForgedocConfig;
use crate::document::{DocumentLocation, InheritsNormalizer, SourceLinkRewriter};
use crate::errors::ConfigError;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Decides which generated files are index files
#[derive(Debug, Clone)]
pub struct PrunePolicy {
    file_names: Vec<String>,
}

impl PrunePolicy {
    /// Names are matched against the whole base name, ignoring case.
    pub fn new(file_names: Vec<String>) -> Self {
        Self {
            file_names: file_names.into_iter().map(|n| n.to_lowercase()).collect(),
        }
    }

    pub fn is_index_file(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        let name = name.to_string_lossy().to_lowercase();
        self.file_names.iter().any(|candidate| *candidate == name)
    }
}

impl Default for PrunePolicy {
    fn default() -> Self {
        Self::new(vec!["readme.md".to_string(), "summary.md".to_string()])
    }
}

/// Switches for a single run
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessOptions {
    /// Report what would change without writing or deleting anything
    pub dry_run: bool,
    /// Delete index files after processing them
    pub prune: bool,
}

/// What happened to one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// Content differs from what was on disk
    pub changed: bool,
    pub source_links: usize,
    pub inherits_paths: usize,
    /// Deleted, or would be deleted in a dry run
    pub deleted: bool,
}

/// Transformed document text with the counts of what changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    pub content: String,
    pub source_links: usize,
    pub inherits_paths: usize,
}

/// Applies the document transformations to files in one docs tree
#[derive(Debug, Clone)]
pub struct FileProcessor {
    docs_root: PathBuf,
    links: SourceLinkRewriter,
    inherits: InheritsNormalizer,
    prune: PrunePolicy,
}

impl FileProcessor {
    pub fn new(
        docs_root: impl Into<PathBuf>,
        links: SourceLinkRewriter,
        inherits: InheritsNormalizer,
        prune: PrunePolicy,
    ) -> Self {
        Self {
            docs_root: docs_root.into(),
            links,
            inherits,
            prune,
        }
    }

    /// Build a processor from configuration, validating it up front.
    pub fn from_config(
        docs_root: impl Into<PathBuf>,
        config: &ForgedocConfig,
    ) -> Result<Self, ConfigError> {
        let sources = config.sources();
        let links = SourceLinkRewriter::new(sources.branch(), sources.host.as_deref())?;
        let inherits = InheritsNormalizer::new(config.inherits().anchor_strategy()?)?;
        let prune = PrunePolicy::new(config.prune().file_names()?);

        Ok(Self::new(docs_root, links, inherits, prune))
    }

    pub fn docs_root(&self) -> &Path {
        &self.docs_root
    }

    /// Transform a document's text: Inherits line first, then source links.
    pub fn transform(&self, content: &str, location: &DocumentLocation) -> Transformed {
        let (content, inherits_paths) = match self.inherits.apply(content, location) {
            Some(normalized) => (normalized.text, normalized.rewritten),
            None => (content.to_string(), 0),
        };

        let links = self.links.rewrite(&content);

        Transformed {
            content: links.content,
            source_links: links.rewritten,
            inherits_paths,
        }
    }

    /// Process one file in place.
    ///
    /// Any read, write or delete failure is returned immediately; files
    /// handled earlier in the run stay modified.
    pub fn process_file(&self, path: &Path, options: ProcessOptions) -> Result<FileOutcome> {
        let location = DocumentLocation::new(&self.docs_root, path)?;

        let original = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let transformed = self.transform(&original, &location);
        let changed = transformed.content != original;

        if changed && !options.dry_run {
            fs::write(path, &transformed.content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(
                path = %path.display(),
                source_links = transformed.source_links,
                inherits_paths = transformed.inherits_paths,
                "File modified"
            );
        }

        let deleted = options.prune && self.prune.is_index_file(path);
        if deleted && !options.dry_run {
            remove_index_file(path)?;
        }

        Ok(FileOutcome {
            path: path.to_path_buf(),
            changed,
            source_links: transformed.source_links,
            inherits_paths: transformed.inherits_paths,
            deleted,
        })
    }
}

/// Delete one index file.
pub(crate) fn remove_index_file(path: &Path) -> Result<()> {
    fs::remove_file(path).with_context(|| format!("Failed to delete {}", path.display()))?;
    info!(path = %path.display(), "Deleted index file");
    Ok(())
}
