//! Document input and output.
//!
//! [`PdfBackend`] is the narrow seam between the toolkit and a PDF library.
//! Operations only ever open documents, ask for page counts and metadata,
//! copy pages into a writer, attach bookmarks and serialize; everything else
//! about the file format stays behind the trait.
//!
//! - [`lopdf`]: the production backend
//! - [`memory`]: an in-memory backend for tests
//! - [`writer`]: atomic output file writes

pub mod lopdf;
pub mod memory;
pub mod writer;

pub use self::lopdf::LopdfBackend;
pub use memory::MemoryBackend;
pub use writer::{OutputWriter, WriteStatistics};

use serde::Serialize;
use std::path::Path;

use crate::error::Result;

/// Document information fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentMetadata {
    /// Document title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Document author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Document subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Keywords.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    /// Application that created the original document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    /// Application that produced the PDF.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer: Option<String>,
}

impl DocumentMetadata {
    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.fields().next().is_none()
    }

    /// Populated fields as `(label, value)` pairs, in display order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        [
            ("Title", &self.title),
            ("Author", &self.author),
            ("Subject", &self.subject),
            ("Keywords", &self.keywords),
            ("Creator", &self.creator),
            ("Producer", &self.producer),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|v| (label, v)))
    }
}

/// Capabilities the toolkit needs from a PDF library.
///
/// A backend opens documents, hands out borrowed page handles and assembles
/// new documents page by page. Page handles borrow from their document, so a
/// document must outlive every writer it contributes pages to.
pub trait PdfBackend {
    /// An opened document.
    type Document;

    /// A page of an opened document.
    type Page<'a>
    where
        Self: 'a;

    /// A document under construction.
    type Writer;

    /// Open the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns `FailedToLoadPdf` if the library cannot parse the file.
    fn open(&self, path: &Path) -> Result<Self::Document>;

    /// Number of pages in `document`.
    fn page_count(&self, document: &Self::Document) -> usize;

    /// Document information fields.
    fn metadata(&self, document: &Self::Document) -> DocumentMetadata;

    /// Page at the zero-based `index`.
    ///
    /// # Errors
    ///
    /// Returns `PageOutOfBounds` if `index >= page_count`.
    fn get_page<'a>(&'a self, document: &'a Self::Document, index: usize)
    -> Result<Self::Page<'a>>;

    /// Start an empty output document.
    fn new_writer(&self) -> Self::Writer;

    /// Append a page to `writer`.
    fn add_page(&self, writer: &mut Self::Writer, page: Self::Page<'_>) -> Result<()>;

    /// Add an outline entry pointing at the zero-based output page
    /// `page_index`. The page may be appended after the bookmark is added;
    /// it only has to exist when the writer is serialized.
    fn add_bookmark(&self, writer: &mut Self::Writer, title: &str, page_index: usize)
    -> Result<()>;

    /// Finish the document and return its bytes.
    ///
    /// # Errors
    ///
    /// Returns `BookmarkFailed` if a bookmark points past the last page.
    fn serialize(&self, writer: Self::Writer) -> Result<Vec<u8>>;
}
