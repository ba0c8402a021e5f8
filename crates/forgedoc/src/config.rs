//! Configuration file loading and parsing.
//!
//! forgedoc reads optional settings from `forgedoc.toml` in the working
//! directory (or the file given with `--config`). Every field is optional and
//! falls back to the layout `forge doc` produces by default.

use crate::document::{
    AnchorStrategy, DEFAULT_BASE_DIR, DEFAULT_BRANCH, DEFAULT_MARKER, DEFAULT_REFERENCE_DIR,
};
use crate::errors::{config_not_found, ConfigError};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "forgedoc.toml";

/// Docs tree processed when nothing else is configured
pub const DEFAULT_DOCS_DIR: &str = "docs/contracts/src";

/// Root configuration structure loaded from `forgedoc.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForgedocConfig {
    /// Generated docs tree (optional, default: `docs/contracts/src`).
    pub docs_dir: Option<String>,
    /// Source link rewriting (optional).
    pub sources: Option<SourcesConfig>,
    /// Inherits line normalization (optional).
    pub inherits: Option<InheritsConfig>,
    /// Index file pruning (optional).
    pub prune: Option<PruneConfig>,
}

/// Source link rewriting configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourcesConfig {
    /// Branch substituted for commit hashes (default: "master").
    pub branch: Option<String>,
    /// Restrict rewriting to one host, e.g. "github.com" (default: any host).
    pub host: Option<String>,
}

impl SourcesConfig {
    pub fn branch(&self) -> String {
        self.branch
            .clone()
            .unwrap_or_else(|| DEFAULT_BRANCH.to_string())
    }
}

/// Inherits line normalization configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InheritsConfig {
    /// Anchor strategy: "fixed" or "file" (default: "fixed").
    pub anchor: Option<String>,
    /// Base directory prepended to paths in fixed mode.
    pub base_dir: Option<String>,
    /// Directory paths are made relative to in fixed mode.
    pub reference_dir: Option<String>,
    /// Path fragment that adds an extra `../` in fixed mode.
    pub marker: Option<String>,
}

impl InheritsConfig {
    /// Build the anchor strategy, validating the mode name.
    pub fn anchor_strategy(&self) -> Result<AnchorStrategy, ConfigError> {
        match self.anchor.as_deref().unwrap_or("fixed") {
            "file" => Ok(AnchorStrategy::FileDirectory),
            "fixed" => Ok(AnchorStrategy::Fixed {
                base_dir: self
                    .base_dir
                    .clone()
                    .unwrap_or_else(|| DEFAULT_BASE_DIR.to_string()),
                reference_dir: PathBuf::from(
                    self.reference_dir
                        .as_deref()
                        .unwrap_or(DEFAULT_REFERENCE_DIR),
                ),
                marker: self
                    .marker
                    .clone()
                    .unwrap_or_else(|| DEFAULT_MARKER.to_string()),
            }),
            other => Err(ConfigError::UnknownAnchor(other.to_string())),
        }
    }
}

/// Index file pruning configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PruneConfig {
    /// File names deleted after processing, compared case-insensitively
    /// (default: ["readme.md", "summary.md"]).
    pub file_names: Option<Vec<String>>,
}

impl PruneConfig {
    pub fn file_names(&self) -> Result<Vec<String>, ConfigError> {
        let names = self.file_names.clone().unwrap_or_else(|| {
            vec!["readme.md".to_string(), "summary.md".to_string()]
        });

        for name in &names {
            if name.is_empty() || name.contains('/') || name.contains('\\') {
                return Err(ConfigError::PruneName(name.clone()));
            }
        }

        Ok(names)
    }
}

impl ForgedocConfig {
    /// Load `forgedoc.toml` from `dir` if it exists.
    ///
    /// Returns the default config if the file doesn't exist.
    /// Returns an error if the file exists but is malformed.
    pub fn load_default(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::parse_file(&config_path)
    }

    /// Load an explicitly requested config file, which must exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(config_not_found(path).into());
        }

        Self::parse_file(path)
    }

    fn parse_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: ForgedocConfig = toml::from_str(&content)
            .with_context(|| format!("Invalid config in {}", path.display()))?;

        Ok(config)
    }

    pub fn sources(&self) -> SourcesConfig {
        self.sources.clone().unwrap_or_default()
    }

    pub fn inherits(&self) -> InheritsConfig {
        self.inherits.clone().unwrap_or_default()
    }

    pub fn prune(&self) -> PruneConfig {
        self.prune.clone().unwrap_or_default()
    }

    /// Docs tree configured in the file, or the default
    pub fn docs_dir(&self) -> PathBuf {
        PathBuf::from(self.docs_dir.as_deref().unwrap_or(DEFAULT_DOCS_DIR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: ForgedocConfig = toml::from_str("").unwrap();

        assert_eq!(config.docs_dir(), PathBuf::from("docs/contracts/src"));
        assert_eq!(config.sources().branch(), "master");
        assert!(config.sources().host.is_none());
        assert_eq!(
            config.inherits().anchor_strategy().unwrap(),
            AnchorStrategy::fixed_default()
        );
        assert_eq!(
            config.prune().file_names().unwrap(),
            vec!["readme.md", "summary.md"]
        );
    }

    #[test]
    fn test_parse_full_config() {
        let config_toml = r#"
docs_dir = "build/docs"

[sources]
branch = "main"
host = "github.com"

[inherits]
anchor = "fixed"
reference_dir = "docs/docs/src/src/X/"
marker = "/deep/"

[prune]
file_names = ["README.md"]
"#;
        let config: ForgedocConfig = toml::from_str(config_toml).unwrap();

        assert_eq!(config.docs_dir(), PathBuf::from("build/docs"));
        assert_eq!(config.sources().branch(), "main");
        assert_eq!(config.sources().host.as_deref(), Some("github.com"));
        assert_eq!(
            config.inherits().anchor_strategy().unwrap(),
            AnchorStrategy::Fixed {
                base_dir: "docs/docs/src".to_string(),
                reference_dir: PathBuf::from("docs/docs/src/src/X/"),
                marker: "/deep/".to_string(),
            }
        );
        assert_eq!(config.prune().file_names().unwrap(), vec!["README.md"]);
    }

    #[test]
    fn test_file_anchor_is_opt_in() {
        let config: ForgedocConfig = toml::from_str("[inherits]\nanchor = \"file\"\n").unwrap();
        assert_eq!(
            config.inherits().anchor_strategy().unwrap(),
            AnchorStrategy::FileDirectory
        );
    }

    #[test]
    fn test_unknown_anchor_rejected() {
        let config: ForgedocConfig = toml::from_str("[inherits]\nanchor = \"page\"\n").unwrap();
        let err = config.inherits().anchor_strategy().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownAnchor(ref name) if name == "page"));
    }

    #[test]
    fn test_prune_name_with_separator_rejected() {
        let prune = PruneConfig {
            file_names: Some(vec!["docs/README.md".to_string()]),
        };
        assert!(matches!(
            prune.file_names(),
            Err(ConfigError::PruneName(_))
        ));
    }

    #[test]
    fn test_load_default_missing_file() {
        let temp = TempDir::new().unwrap();
        let config = ForgedocConfig::load_default(temp.path()).unwrap();
        assert!(config.sources.is_none());
    }

    #[test]
    fn test_load_default_reads_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[sources]\nbranch = \"develop\"\n",
        )
        .unwrap();

        let config = ForgedocConfig::load_default(temp.path()).unwrap();
        assert_eq!(config.sources().branch(), "develop");
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = ForgedocConfig::load(&temp.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_malformed_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.toml");
        std::fs::write(&path, "[sources\nbranch = 1").unwrap();

        let err = ForgedocConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid config"));
    }
}
