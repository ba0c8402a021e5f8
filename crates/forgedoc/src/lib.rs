//! forgedoc: post-processing for `forge doc` Markdown output
//!
//! Makes generated contract documentation render on Docusaurus by rewriting
//! commit-pinned source links, normalizing `**Inherits:**` paths and pruning
//! index files the static site does not need.

pub mod cli;
pub mod config;
pub mod document;
pub mod errors;
pub mod output;
pub mod processor;
pub mod walker;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use config::ForgedocConfig;
pub use output::{ExitCode, JsonOutput, OutputContext};
pub use processor::{FileOutcome, FileProcessor, ProcessOptions, PrunePolicy};
pub use walker::{collect_markdown_files, process_tree, prune_tree, RunReport};
