//! Error types for pdftoolkit.
//!
//! Every failure surfaces as a [`ToolkitError`]. Validation errors are raised
//! before any output file is touched, so a failed command never leaves a
//! half-written single-file output behind.
//!
//! # Error Categories
//!
//! - **Path errors**: missing inputs, wrong extensions, output collisions
//! - **Argument errors**: malformed page ranges, split points, titles
//! - **PDF errors**: documents the PDF library cannot load or serialize
//! - **I/O errors**: everything the filesystem can throw at us

use std::io;
use std::path::PathBuf;

/// Result type alias for pdftoolkit operations.
pub type Result<T> = std::result::Result<T, ToolkitError>;

/// Main error type for pdftoolkit operations.
#[derive(Debug, thiserror::Error)]
pub enum ToolkitError {
    /// Input path does not exist.
    #[error("File not found: {}", path.display())]
    NotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Input path exists but is a directory.
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// Path that is not a regular file.
        path: PathBuf,
    },

    /// Path exists but is not a directory.
    #[error("Not a directory: {}", path.display())]
    NotADirectory {
        /// Path that is not a directory.
        path: PathBuf,
    },

    /// Input file does not carry the `.pdf` extension.
    #[error("Not a PDF file: {}", path.display())]
    InvalidFormat {
        /// Offending path.
        path: PathBuf,
    },

    /// Output already exists and overwriting was not requested.
    #[error("Output file already exists: {} (use --overwrite to replace it)", path.display())]
    AlreadyExists {
        /// Existing output path.
        path: PathBuf,
    },

    /// A numeric or textual argument is out of its allowed domain.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// What is wrong with the argument.
        message: String,
    },

    /// A page number or range falls outside the document.
    #[error("Invalid page range '{range}': must be between 1 and {total_pages}")]
    InvalidRange {
        /// The token or split point that was rejected.
        range: String,
        /// Page count of the document it was checked against.
        total_pages: usize,
    },

    /// A page-range token is neither a number nor an `N-M` range.
    #[error("Invalid page token '{token}': expected a page number or a range like '3-7'")]
    InvalidToken {
        /// The token as written by the user.
        token: String,
    },

    /// Split-at was requested without any split points.
    #[error("No split points provided")]
    NoSplitPoints,

    /// Too few documents for the requested operation.
    #[error("At least {required} PDF files are required, got {found}")]
    InsufficientInputs {
        /// Minimum number of documents.
        required: usize,
        /// Number of documents supplied.
        found: usize,
    },

    /// Explicit bookmark titles do not line up with the inputs.
    #[error("Number of bookmark titles ({titles}) doesn't match number of files ({documents})")]
    MismatchedTitles {
        /// Number of titles supplied.
        titles: usize,
        /// Number of documents being merged.
        documents: usize,
    },

    /// A directory scan found no PDF files.
    #[error("No PDF files found in directory: {}", path.display())]
    EmptyDirectory {
        /// Directory that was scanned.
        path: PathBuf,
    },

    /// The PDF library could not open a document.
    #[error("Failed to load PDF: {} ({reason})", path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason reported by the PDF library.
        reason: String,
    },

    /// A page index does not exist in the opened document.
    #[error("Page index {index} is out of bounds for a document with {page_count} page(s)")]
    PageOutOfBounds {
        /// Zero-based index that was requested.
        index: usize,
        /// Number of pages in the document.
        page_count: usize,
    },

    /// Building the outline tree failed.
    #[error("Failed to add bookmark '{title}': {reason}")]
    BookmarkFailed {
        /// Title of the bookmark.
        title: String,
        /// Details about the failure.
        reason: String,
    },

    /// Writing an output file failed.
    #[error("Failed to write output file: {} ({source})", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Error raised by the PDF library.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed glob pattern.
    #[error("Invalid glob pattern: {0}")]
    GlobPattern(#[from] glob::PatternError),

    /// Failure while walking glob matches.
    #[error("Failed to process glob entry: {0}")]
    GlobEntry(#[from] glob::GlobError),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ToolkitError {
    /// Create a NotFound error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create an AlreadyExists error.
    pub fn already_exists(path: impl Into<PathBuf>) -> Self {
        Self::AlreadyExists { path: path.into() }
    }

    /// Create an InvalidArgument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an InvalidRange error.
    pub fn invalid_range(range: impl Into<String>, total_pages: usize) -> Self {
        Self::InvalidRange {
            range: range.into(),
            total_pages,
        }
    }

    /// Create an InvalidToken error.
    pub fn invalid_token(token: impl Into<String>) -> Self {
        Self::InvalidToken {
            token: token.into(),
        }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error was caused by user input rather than the environment.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument { .. }
                | Self::InvalidRange { .. }
                | Self::InvalidToken { .. }
                | Self::NoSplitPoints
                | Self::InsufficientInputs { .. }
                | Self::MismatchedTitles { .. }
                | Self::GlobPattern(_)
        )
    }

    /// Get the process exit code for this error.
    ///
    /// Usage errors exit with 1; environment failures get a code per
    /// category.
    pub fn exit_code(&self) -> i32 {
        if self.is_usage_error() {
            return 1;
        }
        match self {
            Self::NotFound { .. } | Self::NotAFile { .. } | Self::NotADirectory { .. } => 2,
            Self::EmptyDirectory { .. } => 2,
            Self::InvalidFormat { .. } | Self::FailedToLoadPdf { .. } | Self::Pdf(_) => 3,
            Self::AlreadyExists { .. } => 4,
            Self::FailedToWrite { .. } | Self::Io(_) | Self::GlobEntry(_) => 5,
            Self::PageOutOfBounds { .. } | Self::BookmarkFailed { .. } => 6,
            _ => 1,
        }
    }
}
