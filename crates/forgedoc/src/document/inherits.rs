//! `**Inherits:**` line normalization
//!
//! The generator writes inherited contracts as root-relative links, e.g.
//! `**Inherits:** [Ownable](/src/access/Ownable.sol/abstract.Ownable.md)`.
//! Docusaurus resolves Markdown links relative to the page, so each path in
//! parentheses is recomputed relative to an anchor directory.

use super::paths::{normalize_path, relative_path, to_slash};
use crate::errors::DocumentError;
use regex::{Captures, Regex};
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Base directory of the fixed anchor layout
pub const DEFAULT_BASE_DIR: &str = "docs/docs/src";
/// Reference directory of the fixed anchor layout
pub const DEFAULT_REFERENCE_DIR: &str = "docs/docs/src/src/X/X/";
/// Path fragment of documents that sit one level deeper in the fixed layout
pub const DEFAULT_MARKER: &str = "/src/gateway/strategy/";

/// How recomputed paths are anchored
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorStrategy {
    /// Resolve root-relative links against the docs tree root and make them
    /// relative to the directory of the document being processed.
    ///
    /// Relative links, URLs and anchors are left untouched, so running the
    /// normalizer twice gives the same result as running it once.
    FileDirectory,
    /// Concatenate each path onto `base_dir` and make it relative to the
    /// fixed `reference_dir`. Documents whose path contains `marker` get an
    /// extra `../` prefix.
    ///
    /// This is the default. It is only correct for trees whose depth matches
    /// `reference_dir`, and not idempotent: re-running rewrites
    /// already-relative paths again.
    Fixed {
        base_dir: String,
        reference_dir: PathBuf,
        marker: String,
    },
}

impl AnchorStrategy {
    /// Fixed anchoring with the generator's stock layout
    pub fn fixed_default() -> Self {
        AnchorStrategy::Fixed {
            base_dir: DEFAULT_BASE_DIR.to_string(),
            reference_dir: PathBuf::from(DEFAULT_REFERENCE_DIR),
            marker: DEFAULT_MARKER.to_string(),
        }
    }
}

/// Where a document lives, as seen by the normalizer
#[derive(Debug, Clone)]
pub struct DocumentLocation {
    /// Path of the document as it was found on disk
    pub path: PathBuf,
    /// Directory of the document relative to the docs tree root
    pub tree_dir: PathBuf,
}

impl DocumentLocation {
    /// Locate `path` inside the docs tree rooted at `docs_root`.
    pub fn new(docs_root: &Path, path: &Path) -> Result<Self, DocumentError> {
        let relative = path
            .strip_prefix(docs_root)
            .map_err(|_| DocumentError::OutsideTree {
                path: path.to_path_buf(),
                root: docs_root.to_path_buf(),
            })?;
        let tree_dir = relative
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            tree_dir,
        })
    }
}

/// The captured text of an Inherits line and its byte span in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InheritsLine<'a> {
    pub text: &'a str,
    pub span: Range<usize>,
}

/// Result of normalizing one Inherits line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedInherits {
    pub text: String,
    pub rewritten: usize,
}

/// Rewrites the parenthesized paths of an Inherits line
#[derive(Debug, Clone)]
pub struct InheritsNormalizer {
    anchor: AnchorStrategy,
    line_pattern: Regex,
    path_pattern: Regex,
}

impl InheritsNormalizer {
    pub fn new(anchor: AnchorStrategy) -> Result<Self, regex::Error> {
        Ok(Self {
            anchor,
            line_pattern: Regex::new(
                r"(?m)^\*\*Inherits:\*\*[ \t]*(?:\r?\n)?[ \t]*([^\n]*)",
            )?,
            path_pattern: Regex::new(r"\(([^)]+)\)")?,
        })
    }

    /// Find the first Inherits line in `content`.
    ///
    /// The generator usually puts the marker on a line of its own and the
    /// list on the next one, so a single line break after the marker is
    /// skipped. The captured text is trimmed; an empty capture counts as
    /// absent.
    pub fn find<'a>(&self, content: &'a str) -> Option<InheritsLine<'a>> {
        let captured = self.line_pattern.captures(content)?.get(1)?;
        let raw = captured.as_str();
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }

        let start = captured.start() + (raw.len() - raw.trim_start().len());
        Some(InheritsLine {
            text,
            span: start..start + text.len(),
        })
    }

    /// Recompute every `(path)` in an Inherits line for the given document.
    pub fn normalize(&self, line: &str, location: &DocumentLocation) -> NormalizedInherits {
        let mut rewritten = 0;
        let text = self
            .path_pattern
            .replace_all(line, |caps: &Captures| {
                let original = &caps[1];
                match self.recompute(original, location) {
                    Some(path) => {
                        debug!(
                            document = %location.path.display(),
                            original,
                            computed = %path,
                            "Recomputed inherits path"
                        );
                        rewritten += 1;
                        format!("({})", path)
                    }
                    None => caps[0].to_string(),
                }
            })
            .into_owned();

        NormalizedInherits { text, rewritten }
    }

    /// Find and normalize the Inherits line of a whole document.
    ///
    /// Only the captured span is replaced, so an identical run of text
    /// elsewhere in the document is never touched. Returns `None` when the
    /// document has no Inherits line.
    pub fn apply(&self, content: &str, location: &DocumentLocation) -> Option<NormalizedInherits> {
        let line = self.find(content)?;
        let normalized = self.normalize(line.text, location);

        let mut text = String::with_capacity(content.len() + normalized.text.len());
        text.push_str(&content[..line.span.start]);
        text.push_str(&normalized.text);
        text.push_str(&content[line.span.end..]);

        Some(NormalizedInherits {
            text,
            rewritten: normalized.rewritten,
        })
    }

    fn recompute(&self, original: &str, location: &DocumentLocation) -> Option<String> {
        match &self.anchor {
            AnchorStrategy::FileDirectory => {
                if original.contains("://") || original.starts_with('#') {
                    return None;
                }
                let tree_relative = original.strip_prefix('/')?;
                let target = normalize_path(Path::new(tree_relative));
                Some(to_slash(&relative_path(&target, &location.tree_dir)))
            }
            AnchorStrategy::Fixed {
                base_dir,
                reference_dir,
                marker,
            } => {
                let joined = format!("{}{}", base_dir, original);
                let relative = to_slash(&relative_path(Path::new(&joined), reference_dir));
                if to_slash(&location.path).contains(marker.as_str()) {
                    Some(format!("../{}", relative))
                } else {
                    Some(relative)
                }
            }
        }
    }
}
