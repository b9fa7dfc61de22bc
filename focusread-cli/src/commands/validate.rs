//! Validate command implementation

use crate::config::CliConfig;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the configuration file to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating configuration: {}", self.config.display());

        match CliConfig::load(&self.config) {
            Ok(config) => {
                println!("✓ Configuration is valid!");
                println!(
                    "  Enabled features: {}",
                    config.features.enabled_names().join(", ")
                );
                println!("  Block tags: {}", config.scan.block_tags.join(", "));
                println!(
                    "  Content root: {}",
                    config.scan.content_root.as_deref().unwrap_or("(whole document)")
                );
                println!("  Output format: {}", config.output.default_format);
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e:#}");
                Err(e.context("Validation failed"))
            }
        }
    }
}
