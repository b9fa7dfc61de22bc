//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Commented configuration template. Every value shown is the default.
pub const TEMPLATE: &str = r#"# focusread configuration
#
# Every key is optional; anything left out keeps the default shown here.

[features]
# Master switch. When off, nothing is transformed and everything is reset.
global = true
# Bold the leading ~40% of every word
bionic = true
# Cycle a background colour across sentences (fr-highlight-0..2)
highlight = true
# Cycle a text gradient across blocks (fr-beeline-0..2)
beeline = false
# Show the reading ruler overlay
ruler = false
# Add the fr-extra-spacing class to sentences
spacing = false
# Dim images, video and other media
focus = false

[scan]
# Elements treated as readable blocks
block_tags = ["p", "li", "h1", "h2", "h3", "h4", "h5", "h6", "dd", "dt", "blockquote"]
# Blocks containing any of these are left untouched
excluded_tags = ["pre", "code", "textarea", "input", "a"]
# Elements dimmed in focus mode
media_tags = ["img", "video", "iframe", "svg", "canvas"]
# id of the reading ruler overlay
ruler_id = "fr-ruler"
# id of the element to scan; omit to scan the whole document
# content_root = "content"

[output]
# html, json or text
default_format = "html"
# Wrap HTML output in a full page with the stylesheet
standalone = false
# Indent JSON output
pretty_json = true
"#;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        if self.output.exists() && !self.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }

        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, TEMPLATE)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the configuration file to choose features");
        println!("2. Validate your configuration:");
        println!("   focusread validate --config {}", self.output.display());
        println!("3. Use it for rendering:");
        println!(
            "   focusread render -i input.txt --config {}",
            self.output.display()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use tempfile::TempDir;

    #[test]
    fn test_template_matches_defaults() {
        let config = CliConfig::parse(TEMPLATE).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_execute_success() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("focusread.toml");

        let args = GenerateConfigArgs {
            output: output_path.clone(),
            force: false,
        };

        assert!(args.execute().is_ok());
        let content = fs::read_to_string(&output_path).unwrap();
        assert!(content.contains("[features]"));
        assert!(content.contains("[scan]"));
        assert!(content.contains("[output]"));
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("focusread.toml");
        fs::write(&output_path, "# mine").unwrap();

        let args = GenerateConfigArgs {
            output: output_path.clone(),
            force: false,
        };
        assert!(args.execute().is_err());
        assert_eq!(fs::read_to_string(&output_path).unwrap(), "# mine");

        let forced = GenerateConfigArgs {
            output: output_path.clone(),
            force: true,
        };
        assert!(forced.execute().is_ok());
        assert!(fs::read_to_string(&output_path).unwrap().contains("[features]"));
    }
}
