//! Document transformations
//!
//! Pure text operations applied to each generated Markdown page: source link
//! rewriting and `**Inherits:**` path normalization. Nothing in this module
//! touches the filesystem.

mod inherits;
pub mod paths;
mod source_links;

pub use inherits::{
    AnchorStrategy, DocumentLocation, InheritsLine, InheritsNormalizer, NormalizedInherits,
    DEFAULT_BASE_DIR, DEFAULT_MARKER, DEFAULT_REFERENCE_DIR,
};
pub use source_links::{RewrittenLinks, SourceLinkRewriter, DEFAULT_BRANCH};
