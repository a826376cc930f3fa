//! In-memory [`PdfBackend`] for tests.
//!
//! Documents are registered under a path with a list of page labels. A
//! writer records the labels of the pages it receives together with its
//! bookmarks and serializes them as JSON, which makes it easy to assert on
//! what an operation would have written without parsing PDF.
//!
//! ```
//! use pdftoolkit::io::{MemoryBackend, PdfBackend};
//! use pdftoolkit::io::memory::Transcript;
//! use std::path::Path;
//!
//! let backend = MemoryBackend::new();
//! backend.register_pages("a.pdf", 2);
//!
//! let doc = backend.open(Path::new("a.pdf")).unwrap();
//! let mut writer = backend.new_writer();
//! backend.add_page(&mut writer, backend.get_page(&doc, 1).unwrap()).unwrap();
//!
//! let transcript = Transcript::from_bytes(&backend.serialize(writer).unwrap()).unwrap();
//! assert_eq!(transcript.pages, vec!["a.pdf#2"]);
//! ```

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{DocumentMetadata, PdfBackend};
use crate::error::{Result, ToolkitError};

/// A registered document.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    /// Page labels, in page order.
    pub pages: Vec<String>,
    /// Document information fields.
    pub metadata: DocumentMetadata,
}

/// What a [`MemoryBackend`] writer produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    /// Labels of the written pages, in output order.
    pub pages: Vec<String>,
    /// `(title, zero-based output page)` pairs.
    pub bookmarks: Vec<(String, usize)>,
}

impl Transcript {
    /// Decode bytes produced by [`MemoryBackend::serialize`].
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a transcript.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Backend that keeps documents in memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    documents: RefCell<HashMap<PathBuf, MemoryDocument>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document under `path`.
    pub fn register(&self, path: impl Into<PathBuf>, document: MemoryDocument) {
        self.documents.borrow_mut().insert(path.into(), document);
    }

    /// Register a document with `count` pages labelled `<path>#<page>`.
    pub fn register_pages(&self, path: impl Into<PathBuf>, count: usize) {
        let path = path.into();
        let pages = (1..=count)
            .map(|page| format!("{}#{page}", path.display()))
            .collect();
        self.register(
            path,
            MemoryDocument {
                pages,
                metadata: DocumentMetadata::default(),
            },
        );
    }
}

impl PdfBackend for MemoryBackend {
    type Document = MemoryDocument;
    type Page<'a>
        = &'a str
    where
        Self: 'a;
    type Writer = Transcript;

    fn open(&self, path: &Path) -> Result<MemoryDocument> {
        self.documents
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| ToolkitError::failed_to_load_pdf(path, "document not registered"))
    }

    fn page_count(&self, document: &MemoryDocument) -> usize {
        document.pages.len()
    }

    fn metadata(&self, document: &MemoryDocument) -> DocumentMetadata {
        document.metadata.clone()
    }

    fn get_page<'a>(&'a self, document: &'a MemoryDocument, index: usize) -> Result<&'a str> {
        document
            .pages
            .get(index)
            .map(String::as_str)
            .ok_or(ToolkitError::PageOutOfBounds {
                index,
                page_count: document.pages.len(),
            })
    }

    fn new_writer(&self) -> Transcript {
        Transcript::default()
    }

    fn add_page(&self, writer: &mut Transcript, page: &str) -> Result<()> {
        writer.pages.push(page.to_string());
        Ok(())
    }

    fn add_bookmark(&self, writer: &mut Transcript, title: &str, page_index: usize) -> Result<()> {
        writer.bookmarks.push((title.to_string(), page_index));
        Ok(())
    }

    fn serialize(&self, writer: Transcript) -> Result<Vec<u8>> {
        if let Some((title, index)) = writer
            .bookmarks
            .iter()
            .find(|(_, index)| *index >= writer.pages.len())
        {
            return Err(ToolkitError::BookmarkFailed {
                title: title.clone(),
                reason: format!("page {} does not exist", index + 1),
            });
        }
        Ok(serde_json::to_vec(&writer)?)
    }
}
