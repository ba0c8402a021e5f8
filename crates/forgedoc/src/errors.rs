//! Error types and actionable error formatting.
//!
//! Domain failures are `thiserror` enums. Failures the user has to act on
//! (a missing docs tree, a missing config file) are reported as
//! [`ActionableError`]s carrying possible causes and remediation steps.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Invalid configuration, detected before any file is touched
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("Invalid inherits anchor '{0}' (expected 'file' or 'fixed')")]
    UnknownAnchor(String),
    #[error("Invalid prune file name '{0}': must be a bare file name")]
    PruneName(String),
}

/// A document that cannot be processed as part of the docs tree
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(
        "Document {} is outside the documentation tree {}",
        .path.display(),
        .root.display()
    )]
    OutsideTree { path: PathBuf, root: PathBuf },
}

/// An error with diagnostic context and remediation steps.
///
/// # Example
///
/// ```
/// use forgedoc::errors::ActionableError;
///
/// let error = ActionableError::new("Docs directory docs/contracts/src not found")
///     .with_cause("forge doc has not been run yet")
///     .with_remedy("Generate the docs: forge doc --out docs/docs/contracts");
///
/// assert!(error.to_string().contains("To fix:"));
/// ```
#[derive(Debug, Clone)]
pub struct ActionableError {
    error: String,
    causes: Vec<String>,
    remediation: Vec<String>,
}

impl ActionableError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            causes: Vec::new(),
            remediation: Vec::new(),
        }
    }

    /// Add a possible cause (diagnostic hint).
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.causes.push(cause.into());
        self
    }

    /// Add a remediation step (actionable fix).
    pub fn with_remedy(mut self, remedy: impl Into<String>) -> Self {
        self.remediation.push(remedy.into());
        self
    }

    /// Convert to a formatted error message suitable for display.
    pub fn to_error_message(&self) -> String {
        let mut msg = format!("Error: {}\n", self.error);

        if !self.causes.is_empty() {
            msg.push_str("\nPossible causes:\n");
            for cause in &self.causes {
                msg.push_str(&format!("  • {}\n", cause));
            }
        }

        if !self.remediation.is_empty() {
            msg.push_str("\nTo fix:\n");
            for remedy in &self.remediation {
                msg.push_str(&format!("  • {}\n", remedy));
            }
        }

        msg
    }
}

impl fmt::Display for ActionableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_error_message())
    }
}

impl std::error::Error for ActionableError {}

/// The docs tree to process does not exist.
pub fn docs_dir_not_found(path: &std::path::Path) -> ActionableError {
    ActionableError::new(format!("Docs directory {} not found", path.display()))
        .with_cause("forge doc has not been run yet")
        .with_cause("The path is resolved relative to the current directory")
        .with_remedy("Generate the docs: forge doc --out docs/docs/contracts")
        .with_remedy("Pass the directory explicitly: forgedoc run <DOCS_DIR>")
        .with_remedy("Or set FORGEDOC_DOCS_DIR to the generated src directory")
}

/// The docs path exists but is a file.
pub fn docs_dir_not_a_directory(path: &std::path::Path) -> ActionableError {
    ActionableError::new(format!("Invalid docs directory {}: not a directory", path.display()))
        .with_cause("The path points at a single generated page")
        .with_remedy("Pass the directory containing the generated pages instead")
}

/// An explicitly requested config file is missing.
pub fn config_not_found(path: &std::path::Path) -> ActionableError {
    ActionableError::new(format!("Config file {} not found", path.display()))
        .with_cause("The --config path is resolved relative to the current directory")
        .with_remedy("Check the path passed to --config")
        .with_remedy("Omit --config to use forgedoc.toml or the built-in defaults")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_actionable_error_formatting() {
        let error = ActionableError::new("Test error")
            .with_cause("First cause")
            .with_cause("Second cause")
            .with_remedy("First remedy");

        let msg = error.to_error_message();

        assert!(msg.contains("Error: Test error"));
        assert!(msg.contains("Possible causes:"));
        assert!(msg.contains("• First cause"));
        assert!(msg.contains("• Second cause"));
        assert!(msg.contains("To fix:"));
        assert!(msg.contains("• First remedy"));
    }

    #[test]
    fn test_error_without_causes() {
        let msg = ActionableError::new("Simple error")
            .with_remedy("Just fix it")
            .to_error_message();

        assert!(!msg.contains("Possible causes:"));
        assert!(msg.contains("• Just fix it"));
    }

    #[test]
    fn test_docs_dir_not_found_helper() {
        let error = docs_dir_not_found(Path::new("docs/contracts/src"));

        let msg = error.to_error_message();
        assert!(msg.starts_with("Error: Docs directory docs/contracts/src not found\n"));
        assert!(msg.contains("forge doc --out"));
        assert!(msg.contains("FORGEDOC_DOCS_DIR"));
    }

    #[test]
    fn test_config_not_found_helper() {
        let msg = config_not_found(Path::new("custom.toml")).to_error_message();
        assert!(msg.contains("Config file custom.toml not found"));
        assert!(msg.contains("--config"));
    }

    #[test]
    fn test_config_error_messages() {
        assert_eq!(
            ConfigError::UnknownAnchor("page".into()).to_string(),
            "Invalid inherits anchor 'page' (expected 'file' or 'fixed')"
        );
    }
}
