//! pdftoolkit - Merge and split PDF files.
//!
//! This library validates paths, plans page layouts and assembles new
//! documents page by page. It supports:
//!
//! - Merging files, optionally with one bookmark per input
//! - Merging every PDF file of a directory
//! - Splitting into fixed-size chunks, at chosen pages, or into single pages
//! - Extracting pages selected by a range expression such as `1,3-5,10`
//! - Reporting page counts and document metadata
//!
//! Planning is pure: [`plan`] turns page counts and user choices into page
//! assignments without touching any file. [`ops::Toolkit`] runs an operation
//! end to end and reports through an explicit
//! [`output::OutputFormatter`].
//!
//! # Examples
//!
//! ## Splitting a document
//!
//! ```no_run
//! use pdftoolkit::config::SplitConfig;
//! use pdftoolkit::io::LopdfBackend;
//! use pdftoolkit::ops::Toolkit;
//! use pdftoolkit::output::OutputFormatter;
//! use pdftoolkit::plan::SplitMode;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let toolkit = Toolkit::new(LopdfBackend::new(), OutputFormatter::default());
//! let report = toolkit
//!     .split(&SplitConfig::new("report.pdf", SplitMode::FixedSize(10)))
//!     .await?;
//! for output in &report.outputs {
//!     println!("{} ({})", output.path.display(), output.part.describe());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Planning only
//!
//! ```
//! use pdftoolkit::plan::{PageIndexSet, SplitMode, SplitPlan};
//!
//! let plan = SplitPlan::build(&SplitMode::AtPoints(vec![5, 10]), 12).unwrap();
//! assert_eq!(plan.len(), 3);
//!
//! let pages = PageIndexSet::parse("1,3-5", 10).unwrap();
//! assert_eq!(pages.as_slice(), &[0, 2, 3, 4]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod io;
pub mod ops;
pub mod output;
pub mod plan;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use error::{Result, ToolkitError};
pub use ops::Toolkit;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
