//! Source link rewriting
//!
//! `forge doc` emits "Git Source" links pinned to the commit the docs were
//! generated from. Those links rot as soon as the commit is squashed away, so
//! they are repointed at a branch.

use crate::errors::ConfigError;
use regex::{Captures, Regex};

/// Branch substituted for commit hashes when none is configured.
pub const DEFAULT_BRANCH: &str = "master";

/// Rewrites `https://<host>/.../blob/<hash>/...` links to a fixed branch.
///
/// A match starts at the first URL on a line and runs to the end of that
/// line, which is how the generator lays out its source links. Within the
/// match every `/blob/<hash>/` segment pinned to the matched hash is
/// repointed, so two links to the same commit on one line are both fixed.
/// A later link on the line pinned to a different commit is left as is.
/// Only the hash segments change; the rest of the text is kept byte for byte.
///
/// # Example
///
/// ```
/// use forgedoc::document::SourceLinkRewriter;
///
/// let rewriter = SourceLinkRewriter::new("master", None).unwrap();
/// let out = rewriter.rewrite("[Git Source](https://github.com/o/r/blob/5ac6e1f/src/A.sol)");
/// assert_eq!(out.content, "[Git Source](https://github.com/o/r/blob/master/src/A.sol)");
/// assert_eq!(out.rewritten, 1);
/// ```
#[derive(Debug, Clone)]
pub struct SourceLinkRewriter {
    branch: String,
    pattern: Regex,
}

/// Result of rewriting one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenLinks {
    pub content: String,
    pub rewritten: usize,
}

impl SourceLinkRewriter {
    /// Build a rewriter targeting `branch`.
    ///
    /// `host` restricts matching to a single source host (e.g. `github.com`);
    /// `None` accepts any host.
    pub fn new(branch: impl Into<String>, host: Option<&str>) -> Result<Self, ConfigError> {
        let host_pattern = match host {
            Some(host) => regex::escape(host),
            None => r"[^/\s]+".to_string(),
        };
        let pattern = Regex::new(&format!(
            r"(?m)https://{host_pattern}/\S+?/blob/([0-9a-f]+)/.+?$"
        ))?;

        Ok(Self {
            branch: branch.into(),
            pattern,
        })
    }

    /// Rewrite every matching link in `content`.
    ///
    /// `rewritten` counts repointed hash segments.
    pub fn rewrite(&self, content: &str) -> RewrittenLinks {
        let mut rewritten = 0;
        let content = self
            .pattern
            .replace_all(content, |caps: &Captures| {
                let pinned = format!("/blob/{}/", &caps[1]);
                let target = format!("/blob/{}/", self.branch);

                let matched = &caps[0];
                rewritten += matched.matches(pinned.as_str()).count();
                matched.replace(&pinned, &target)
            })
            .into_owned();

        RewrittenLinks { content, rewritten }
    }
}
