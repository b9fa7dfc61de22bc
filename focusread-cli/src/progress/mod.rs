//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TEMPLATE: &str = "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} files {msg}";

/// Progress reporter for file rendering
///
/// Draws to stderr, so it never mixes with rendered output on stdout.
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
        }
    }

    /// Initialize progress bar for file rendering
    ///
    /// A single file finishes too quickly for a bar to be useful.
    pub fn init_files(&mut self, total_files: u64) {
        if self.quiet || total_files < 2 {
            return;
        }

        let pb = ProgressBar::new(total_files);
        match ProgressStyle::default_bar().template(TEMPLATE) {
            Ok(style) => pb.set_style(style.progress_chars("##-")),
            Err(e) => log::debug!("progress template rejected: {e}"),
        }
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
    }

    /// Whether a bar is being drawn
    pub fn is_active(&self) -> bool {
        self.progress_bar.is_some()
    }

    /// Update progress for a completed file
    pub fn file_completed(&self, filename: &str) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("Rendered: {}", filename));
            pb.inc(1);
        }
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message("Complete");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_reporter_has_no_bar() {
        let mut reporter = ProgressReporter::new(true);
        reporter.init_files(10);
        assert!(!reporter.is_active());
        reporter.file_completed("a.txt");
        reporter.finish();
    }

    #[test]
    fn test_single_file_has_no_bar() {
        let mut reporter = ProgressReporter::new(false);
        reporter.init_files(1);
        assert!(!reporter.is_active());
    }

    #[test]
    fn test_multiple_files_get_a_bar() {
        let mut reporter = ProgressReporter::new(false);
        reporter.init_files(3);
        assert!(reporter.is_active());
        reporter.file_completed("a.txt");
        reporter.finish();
    }

    #[test]
    fn test_template_is_valid() {
        assert!(ProgressStyle::default_bar().template(TEMPLATE).is_ok());
    }
}
