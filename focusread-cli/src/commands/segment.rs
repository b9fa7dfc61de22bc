//! Segment command implementation

use super::init_logging;
use crate::input::{build_document, resolve_patterns, FileReader, CONTENT_ROOT_ID};
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use focusread_core::sentences;
use focusread_engine::ScanConfig;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Arguments for the segment command
#[derive(Debug, Args)]
pub struct SegmentArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: SegmentFormat,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Output formats for segmentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SegmentFormat {
    /// One sentence per line, blocks separated by a blank line
    Text,
    /// JSON array of files with their blocks and sentences
    Json,
}

/// Segmentation of one file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentedFile {
    /// Input name
    pub source: String,
    /// Blocks in document order
    pub blocks: Vec<SegmentedBlock>,
}

/// Segmentation of one block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentedBlock {
    /// Element tag the block became
    pub tag: String,
    /// Sentences of the block
    pub sentences: Vec<SentenceData>,
}

/// One sentence in JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceData {
    /// Zero-based index within the block
    pub index: usize,
    /// Sentence body
    pub text: String,
    /// Terminating punctuation and following whitespace
    pub delimiter: String,
    /// Byte offset of the body within the block text
    pub offset: usize,
}

impl SegmentArgs {
    /// Execute the segment command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);
        log::debug!("Arguments: {:?}", self);

        let files = resolve_patterns(&self.input)?;
        let segmented = files
            .iter()
            .map(|path| segment_file(path))
            .collect::<Result<Vec<_>>>()?;

        let mut writer: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(io::stdout().lock()),
        };

        match self.format {
            SegmentFormat::Text => write_text(&mut writer, &segmented)?,
            SegmentFormat::Json => {
                serde_json::to_writer_pretty(&mut writer, &segmented)?;
                writeln!(writer)?;
            }
        }
        writer.flush()?;
        Ok(())
    }
}

/// Split a text file into blocks, then each block into sentences
pub fn segment_file(path: &Path) -> Result<SegmentedFile> {
    let text = FileReader::read_text(path)?;
    let doc = build_document(&text, None)?;
    let content = doc.element_by_id(CONTENT_ROOT_ID).unwrap_or(doc.root());

    let mut blocks = Vec::new();
    for node in doc.elements_by_tag(content, &ScanConfig::default().block_tags)? {
        let block_text = doc.text_content(node)?;
        let sentences: Vec<SentenceData> = sentences(&block_text)
            .map(|sentence| SentenceData {
                index: sentence.index,
                text: sentence.text.to_string(),
                delimiter: sentence.delimiter.to_string(),
                offset: sentence.offset,
            })
            .collect();
        if sentences.is_empty() {
            continue;
        }
        blocks.push(SegmentedBlock {
            tag: doc.tag(node).unwrap_or_default().to_string(),
            sentences,
        });
    }

    log::info!("{}: {} block(s) segmented", path.display(), blocks.len());
    Ok(SegmentedFile {
        source: FileReader::display_name(path),
        blocks,
    })
}

fn write_text(writer: &mut dyn Write, files: &[SegmentedFile]) -> Result<()> {
    for (f, file) in files.iter().enumerate() {
        if f > 0 {
            writeln!(writer)?;
        }
        if files.len() > 1 {
            writeln!(writer, "==> {} <==", file.source)?;
        }
        for (b, block) in file.blocks.iter().enumerate() {
            if b > 0 {
                writeln!(writer)?;
            }
            for sentence in &block.sentences {
                writeln!(
                    writer,
                    "{}{}",
                    sentence.text.trim(),
                    sentence.delimiter.trim_end()
                )?;
            }
        }
    }
    Ok(())
}
