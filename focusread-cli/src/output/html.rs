//! HTML output formatter

use super::{OutputFormatter, RenderedDocument};
use anyhow::Result;
use focusread_core::{escape_html, STYLESHEET};
use std::io::Write;

/// HTML formatter
///
/// Fragment mode writes each document's transformed content as-is.
/// Standalone mode wraps everything in one page that embeds the stylesheet,
/// with one `<article>` per input.
pub struct HtmlFormatter<W: Write> {
    writer: W,
    standalone: bool,
    started: bool,
}

impl<W: Write> HtmlFormatter<W> {
    /// Create a new HTML formatter
    pub fn new(writer: W, standalone: bool) -> Self {
        Self {
            writer,
            standalone,
            started: false,
        }
    }

    fn write_head(&mut self) -> Result<()> {
        writeln!(self.writer, "<!DOCTYPE html>")?;
        writeln!(self.writer, "<html>")?;
        writeln!(self.writer, "<head>")?;
        writeln!(self.writer, "<meta charset=\"utf-8\">")?;
        writeln!(self.writer, "<title>focusread</title>")?;
        writeln!(self.writer, "<style>\n{}</style>", STYLESHEET)?;
        writeln!(self.writer, "</head>")?;
        writeln!(self.writer, "<body>")?;
        Ok(())
    }
}

impl<W: Write> OutputFormatter for HtmlFormatter<W> {
    fn format_document(&mut self, document: &RenderedDocument) -> Result<()> {
        if self.standalone {
            if !self.started {
                self.write_head()?;
                self.started = true;
            }
            writeln!(
                self.writer,
                "<article data-source=\"{}\">{}</article>",
                escape_html(&document.source),
                document.html
            )?;
        } else {
            writeln!(self.writer, "{}", document.html)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.standalone {
            if !self.started {
                self.write_head()?;
            }
            writeln!(self.writer, "</body>")?;
            writeln!(self.writer, "</html>")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
