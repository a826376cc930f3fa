//! Read-only document queries.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::Toolkit;
use crate::error::Result;
use crate::io::{DocumentMetadata, PdfBackend};

/// Summary of a single document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    /// Document path.
    pub path: PathBuf,
    /// File size in bytes.
    pub file_size: u64,
    /// Page count.
    pub pages: usize,
    /// Information dictionary fields.
    pub metadata: DocumentMetadata,
}

impl DocumentReport {
    /// Pretty-printed JSON form, for scripting.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<B: PdfBackend> Toolkit<B> {
    /// Describe the document at `path`.
    ///
    /// # Errors
    ///
    /// Path errors from validation, or `FailedToLoadPdf`.
    pub async fn info(&self, path: &Path) -> Result<DocumentReport> {
        let input = self.validator.validate_input(path).await?;
        let file_size = tokio::fs::metadata(input.path()).await?.len();
        let document = self.backend.open(input.path())?;
        let pages = self.backend.page_count(&document);

        debug!(path = %input.path().display(), pages, file_size, "Inspected PDF file");
        Ok(DocumentReport {
            metadata: self.backend.metadata(&document),
            path: input.into_path(),
            file_size,
            pages,
        })
    }

    /// Page count of the document at `path`.
    ///
    /// # Errors
    ///
    /// Path errors from validation, or `FailedToLoadPdf`.
    pub async fn count(&self, path: &Path) -> Result<usize> {
        let input = self.validator.validate_input(path).await?;
        let document = self.backend.open(input.path())?;
        Ok(self.backend.page_count(&document))
    }
}
