//! Command-line interface definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Prepare `forge doc` Markdown output for Docusaurus
///
/// Repoints "Git Source" links from commit hashes to a branch, makes the
/// paths in `**Inherits:**` lines relative to each page, and deletes the
/// README.md/SUMMARY.md index files the generator emits.
///
/// Exit Codes:
///   0  - Command succeeded
///   1  - Generic error occurred
///   2  - Invalid arguments or configuration
///   3  - Docs directory, config file or document not found
///   5  - Permission denied
///  10  - File system operation failed
#[derive(Parser, Debug)]
#[command(name = "forgedoc")]
#[command(about = "Prepare forge doc output for Docusaurus", version)]
pub struct Cli {
    /// Suppress per-file output (for scripting)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print a JSON report instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    /// Log every path computation to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: ./forgedoc.toml if present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // Defaults to `run` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Rewrite links and Inherits paths, then delete index files
    Run {
        #[command(flatten)]
        target: TargetArgs,

        /// Show what would change without writing or deleting anything
        #[arg(long)]
        dry_run: bool,

        /// Keep README.md/SUMMARY.md instead of deleting them
        #[arg(long)]
        keep_index: bool,
    },

    /// Rewrite links and Inherits paths without deleting anything
    Rewrite {
        #[command(flatten)]
        target: TargetArgs,

        /// Show what would change without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Delete index files only
    Prune {
        #[command(flatten)]
        target: TargetArgs,

        /// List the files that would be deleted
        #[arg(long)]
        dry_run: bool,
    },
}

impl Commands {
    /// Name used in JSON metadata
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Run { .. } => "run",
            Commands::Rewrite { .. } => "rewrite",
            Commands::Prune { .. } => "prune",
        }
    }

    pub fn target(&self) -> &TargetArgs {
        match self {
            Commands::Run { target, .. }
            | Commands::Rewrite { target, .. }
            | Commands::Prune { target, .. } => target,
        }
    }
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Run {
            target: TargetArgs::default(),
            dry_run: false,
            keep_index: false,
        }
    }
}

#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct TargetArgs {
    /// Generated docs tree (default: docs/contracts/src)
    #[arg(value_name = "DOCS_DIR", env = "FORGEDOC_DOCS_DIR")]
    pub docs_dir: Option<PathBuf>,
}
