//! Shared test utilities
//!
//! Builds small docs trees shaped like `forge doc` output.

#![cfg(test)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Commit hash used in generated source links
pub const GIT_HASH: &str = "4f2c1d9e8b7a6f5e4d3c2b1a09f8e7d6c5b4a392";

/// Write a document under `root`, creating parent directories.
pub fn write_doc(root: &Path, relative: &str, content: &str) -> Result<PathBuf> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, content)?;
    Ok(path)
}

/// Standard docs tree with contract pages and index files
///
/// ```text
/// README.md
/// src/SUMMARY.md
/// src/gateway/Foo.sol/contract.Foo.md
/// src/gateway/Foo.sol/notes.txt
/// src/gateway/IStrategy.sol/interface.IStrategy.md
/// src/gateway/strategy/Avalon.sol/contract.AvalonStrategy.md
/// ```
pub fn setup_docs_tree() -> Result<TempDir> {
    let temp = TempDir::new()?;
    let root = temp.path();

    write_doc(root, "README.md", "# Contracts\n")?;
    write_doc(
        root,
        "src/SUMMARY.md",
        "# Summary\n- [Foo](src/gateway/Foo.sol/contract.Foo.md)\n",
    )?;
    write_doc(
        root,
        "src/gateway/Foo.sol/contract.Foo.md",
        &format!(
            "# Foo\n[Git Source](https://github.com/bob-collective/bob/blob/{GIT_HASH}/src/gateway/Foo.sol)\n\n\
             **Inherits:** [IStrategy](/src/gateway/IStrategy.sol/interface.IStrategy.md), Ownable\n\n\
             ## Functions\n"
        ),
    )?;
    write_doc(root, "src/gateway/Foo.sol/notes.txt", "not markdown\n")?;
    write_doc(
        root,
        "src/gateway/IStrategy.sol/interface.IStrategy.md",
        &format!(
            "# IStrategy\n[Git Source](https://github.com/bob-collective/bob/blob/{GIT_HASH}/src/gateway/IStrategy.sol)\n"
        ),
    )?;
    write_doc(
        root,
        "src/gateway/strategy/Avalon.sol/contract.AvalonStrategy.md",
        "# AvalonStrategy\n\n**Inherits:**\n[IStrategy](/src/gateway/IStrategy.sol/interface.IStrategy.md)\n",
    )?;

    Ok(temp)
}
