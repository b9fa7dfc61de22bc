//! CLI command implementations

use crate::error::CliError;
use anyhow::Result;
use clap::Subcommand;
use focusread_core::{Feature, FeatureFlags};

pub mod generate_config;
pub mod render;
pub mod segment;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render text files with bionic emphasis and sentence highlighting
    Render(render::RenderArgs),

    /// Split text files into sentences
    Segment(segment::SegmentArgs),

    /// Write a commented configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// Check a configuration file
    Validate(validate::ValidateArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List feature names accepted by --enable, --disable and [features]
    Features,

    /// List available output formats
    Formats,
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Render(args) => args.execute(),
            Commands::Segment(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::List { subcommand } => {
                subcommand.execute();
                Ok(())
            }
        }
    }
}

impl ListCommands {
    fn execute(&self) {
        match self {
            ListCommands::Features => {
                let defaults = FeatureFlags::default();
                for feature in Feature::ALL {
                    let state = if defaults.get(feature) { "on" } else { "off" };
                    println!("{:<10} (default: {})", feature.name(), state);
                }
            }
            ListCommands::Formats => {
                println!("html  transformed markup (--standalone for a full page)");
                println!("json  blocks, sentences and classes");
                println!("text  one emphasised sentence per line");
            }
        }
    }
}

/// Initialize logging based on verbosity level
pub(crate) fn init_logging(verbose: u8, quiet: bool) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    if !quiet {
        // Fails only when a logger is already installed
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .try_init();
    }
}

/// Apply `--enable` / `--disable` feature lists on top of `flags`
///
/// Disabling wins when a feature is named in both lists.
pub(crate) fn apply_overrides(
    mut flags: FeatureFlags,
    enable: &[String],
    disable: &[String],
) -> Result<FeatureFlags> {
    for (names, value) in [(enable, true), (disable, false)] {
        for name in names {
            let feature: Feature = name
                .parse()
                .map_err(|_| CliError::UnknownFeature(name.trim().to_string()))?;
            flags.set(feature, value);
        }
    }
    Ok(flags)
}
