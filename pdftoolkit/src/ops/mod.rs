//! Toolkit operations.
//!
//! [`Toolkit`] ties the pieces together: paths are validated, documents are
//! opened through a [`PdfBackend`], page plans are computed, every output
//! target is checked, and only then are documents assembled and written.
//!
//! # Examples
//!
//! ```no_run
//! use pdftoolkit::config::{BookmarkMode, MergeConfig};
//! use pdftoolkit::io::LopdfBackend;
//! use pdftoolkit::ops::Toolkit;
//! use pdftoolkit::output::OutputFormatter;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let toolkit = Toolkit::new(LopdfBackend::new(), OutputFormatter::default());
//! let report = toolkit
//!     .merge(&MergeConfig {
//!         inputs: vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")],
//!         output: PathBuf::from("merged.pdf"),
//!         overwrite: false,
//!         bookmarks: BookmarkMode::FileNames,
//!         dry_run: false,
//!     })
//!     .await?;
//! println!("{} pages", report.total_pages);
//! # Ok(())
//! # }
//! ```

mod inspect;
mod merge;
mod split;

pub use inspect::DocumentReport;
pub use merge::{ExtractReport, InputSummary, MergeReport};
pub use split::{SplitOutput, SplitReport};

use crate::error::Result;
use crate::io::{OutputWriter, PdfBackend};
use crate::output::{OutputFormatter, ProgressBar};
use crate::validation::PathValidator;

/// Entry point for all operations, generic over the PDF backend.
#[derive(Debug)]
pub struct Toolkit<B: PdfBackend> {
    backend: B,
    validator: PathValidator,
    writer: OutputWriter,
    formatter: OutputFormatter,
    show_progress: bool,
}

impl<B: PdfBackend> Toolkit<B> {
    /// Create a toolkit reporting through `formatter`.
    pub fn new(backend: B, formatter: OutputFormatter) -> Self {
        Self {
            backend,
            validator: PathValidator::new(),
            writer: OutputWriter::new(),
            formatter,
            show_progress: true,
        }
    }

    /// Enable or disable progress bars.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// The backend in use.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The formatter operations report through.
    pub fn formatter(&self) -> &OutputFormatter {
        &self.formatter
    }

    fn progress(&self, total: usize, message: &str) -> ProgressBar {
        let mut progress =
            ProgressBar::optional(total, self.show_progress && !self.formatter.is_quiet());
        progress.set_message(message);
        progress
    }

    /// Copy `pages` of `document` into a new document and serialize it.
    fn assemble_pages(
        &self,
        document: &B::Document,
        pages: impl ExactSizeIterator<Item = usize>,
        message: &str,
    ) -> Result<Vec<u8>> {
        let mut progress = self.progress(pages.len(), message);
        let mut writer = self.backend.new_writer();

        for index in pages {
            let page = self.backend.get_page(document, index)?;
            self.backend.add_page(&mut writer, page)?;
            progress.increment();
        }

        progress.finish();
        self.backend.serialize(writer)
    }
}
