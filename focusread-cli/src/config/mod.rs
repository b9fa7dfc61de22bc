//! Configuration module
//!
//! A TOML file with `[features]`, `[scan]` and `[output]` tables. Every
//! field has a default, so an empty file is a valid configuration.

use crate::error::CliError;
use anyhow::{Context, Result};
use focusread_core::{Feature, FeatureFlags};
use focusread_engine::ScanConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,

    /// Block scanning configuration
    #[serde(default)]
    pub scan: ScanConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Default output format (`html`, `json` or `text`)
    pub default_format: String,

    /// Wrap HTML output in a full document with the stylesheet
    pub standalone: bool,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "html".to_string(),
            standalone: false,
            pretty_json: true,
        }
    }
}

impl CliConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse and validate configuration text
    pub fn parse(content: &str) -> Result<Self> {
        let raw: toml::Table = toml::from_str(content)
            .map_err(|e| CliError::ConfigError(e.message().to_string()))?;

        // Keys are matched exactly; `Bionic` or ` bionic` would deserialize to nothing
        if let Some(features) = raw.get("features").and_then(|v| v.as_table()) {
            for name in features.keys() {
                if !Feature::ALL.iter().any(|feature| feature.name() == name.as_str()) {
                    return Err(CliError::UnknownFeature(name.clone()).into());
                }
            }
        }

        let config: CliConfig = toml::from_str(content)
            .map_err(|e| CliError::ConfigError(e.message().to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.scan.block_tags.is_empty() {
            return Err(CliError::ConfigError("scan.block_tags must not be empty".to_string()).into());
        }
        if !["html", "json", "text"].contains(&self.output.default_format.as_str()) {
            return Err(CliError::ConfigError(format!(
                "output.default_format must be html, json or text (got '{}')",
                self.output.default_format
            ))
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CliConfig::parse("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert!(config.features.bionic);
        assert_eq!(config.output.default_format, "html");
    }

    #[test]
    fn test_partial_tables() {
        let config = CliConfig::parse(
            r#"
[features]
beeline = true
bionic = false

[scan]
content_root = "content"

[output]
standalone = true
"#,
        )
        .unwrap();
        assert!(config.features.beeline);
        assert!(!config.features.bionic);
        assert!(config.features.highlight);
        assert_eq!(config.scan.content_root.as_deref(), Some("content"));
        assert!(!config.scan.block_tags.is_empty());
        assert!(config.output.standalone);
        assert!(config.output.pretty_json);
    }

    #[test]
    fn test_unknown_feature_rejected() {
        let err = CliConfig::parse("[features]\nbionc = true\n").unwrap_err();
        assert!(err.to_string().contains("Unknown feature: bionc"));
    }

    #[test]
    fn test_feature_keys_are_case_sensitive() {
        let err = CliConfig::parse("[features]\nBionic = false\n").unwrap_err();
        assert!(err.to_string().contains("Unknown feature: Bionic"));
        assert!(CliConfig::parse("[features]\n\"bionic \" = false\n").is_err());
    }

    #[test]
    fn test_unknown_table_rejected() {
        assert!(CliConfig::parse("[performance]\nthreads = 4\n").is_err());
    }

    #[test]
    fn test_bad_format_rejected() {
        let err = CliConfig::parse("[output]\ndefault_format = \"pdf\"\n").unwrap_err();
        assert!(err.to_string().contains("default_format"));
    }

    #[test]
    fn test_empty_block_tags_rejected() {
        assert!(CliConfig::parse("[scan]\nblock_tags = []\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[features]\nspacing = true\n").unwrap();
        let config = CliConfig::load(file.path()).unwrap();
        assert!(config.features.spacing);
    }

    #[test]
    fn test_load_missing_file() {
        let err = CliConfig::load(Path::new("/nonexistent/focusread.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
