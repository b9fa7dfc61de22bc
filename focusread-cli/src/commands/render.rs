//! Render command implementation

use super::{apply_overrides, init_logging};
use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{build_document, resolve_patterns, FileReader, CONTENT_ROOT_ID};
use crate::output::{
    HtmlFormatter, JsonFormatter, OutputFormatter, RenderedDocument, TextFormatter,
};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use focusread_core::{Feature, FeatureFlags};
use focusread_engine::{FocusReader, ScanConfig};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Arguments for the render command
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: from config, else html)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "FOCUSREAD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Features to switch on, comma separated
    #[arg(long, value_name = "FEATURES", value_delimiter = ',')]
    pub enable: Vec<String>,

    /// Features to switch off, comma separated
    #[arg(long, value_name = "FEATURES", value_delimiter = ',')]
    pub disable: Vec<String>,

    /// Emit a complete HTML page with the stylesheet embedded
    #[arg(long)]
    pub standalone: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Transformed HTML markup
    Html,
    /// JSON array of documents with blocks and sentences
    Json,
    /// Plain text with one emphasised sentence per line
    Text,
}

/// Settings resolved from the config file and command-line flags
#[derive(Debug, Clone)]
struct RenderSettings {
    flags: FeatureFlags,
    scan: ScanConfig,
    format: OutputFormat,
    standalone: bool,
    pretty_json: bool,
}

impl RenderArgs {
    /// Execute the render command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);

        log::info!("Starting render");
        log::debug!("Arguments: {:?}", self);

        let settings = self.resolve_settings()?;
        log::debug!("Enabled features: {:?}", settings.flags.enabled_names());

        let files = resolve_patterns(&self.input)?;
        log::info!("Found {} file(s) to render", files.len());

        let writer: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(io::stdout().lock()),
        };
        let mut formatter = make_formatter(writer, &settings, files.len() > 1);

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(files.len() as u64);

        for path in &files {
            let rendered = render_file(path, &settings)?;
            log::info!(
                "{}: {} block(s) transformed, {} skipped, {} failed",
                rendered.source,
                rendered.summary.applied,
                rendered.summary.skipped,
                rendered.summary.failed
            );
            formatter.format_document(&rendered)?;
            progress.file_completed(&rendered.source);
        }

        formatter.finish()?;
        progress.finish();

        Ok(())
    }

    fn resolve_settings(&self) -> Result<RenderSettings> {
        let config = match &self.config {
            Some(path) => {
                log::info!("Loading configuration from {}", path.display());
                CliConfig::load(path)?
            }
            None => CliConfig::default(),
        };

        let flags = apply_overrides(config.features, &self.enable, &self.disable)?;

        let format = match self.format {
            Some(format) => format,
            None => OutputFormat::from_str(&config.output.default_format, true)
                .map_err(CliError::ConfigError)?,
        };

        // Blocks always land under the generated content root
        if let Some(root) = &config.scan.content_root {
            if root != CONTENT_ROOT_ID {
                log::debug!("scan.content_root '{root}' replaced by '{CONTENT_ROOT_ID}' for text input");
            }
        }
        let scan = ScanConfig {
            content_root: Some(CONTENT_ROOT_ID.to_string()),
            ..config.scan
        };

        Ok(RenderSettings {
            flags,
            scan,
            format,
            standalone: self.standalone || config.output.standalone,
            pretty_json: config.output.pretty_json,
        })
    }
}

fn make_formatter<'w>(
    writer: Box<dyn Write + 'w>,
    settings: &RenderSettings,
    many_files: bool,
) -> Box<dyn OutputFormatter + 'w> {
    match settings.format {
        OutputFormat::Html => Box::new(HtmlFormatter::new(writer, settings.standalone)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer, settings.pretty_json)),
        OutputFormat::Text => Box::new(TextFormatter::new(writer).with_sources(many_files)),
    }
}

/// Run one transformation pass over a text file
fn render_file(path: &Path, settings: &RenderSettings) -> Result<RenderedDocument> {
    let text = FileReader::read_text(path)?;
    let source = FileReader::display_name(path);

    let ruler_id = settings
        .flags
        .effective(Feature::Ruler)
        .then_some(settings.scan.ruler_id.as_str());
    let mut doc = build_document(&text, ruler_id)
        .with_context(|| format!("Failed to build document for {}", path.display()))?;

    let mut reader = FocusReader::new(&doc, settings.flags, settings.scan.clone());
    let report = reader.apply_transformations(&mut doc);

    RenderedDocument::collect(source, &doc, &reader, CONTENT_ROOT_ID, report)
}
