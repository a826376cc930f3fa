//! Output formatting and display.
//!
//! This module handles all user-facing output:
//! - Formatted status messages with quiet and verbose modes
//! - Progress indicators
//! - Reports for completed operations
//!
//! # Examples
//!
//! ```
//! use pdftoolkit::output::OutputFormatter;
//!
//! let formatter = OutputFormatter::new(false, false);
//! formatter.info("Starting merge operation");
//! formatter.success("Merge completed successfully");
//! ```

pub mod formatter;
pub mod progress;

pub use formatter::{CapturedOutput, MessageLevel, OutputFormatter};
pub use progress::{ProgressBar, ProgressStyle};

use crate::ops::{DocumentReport, ExtractReport, MergeReport, SplitReport};
use crate::utils::format_file_size;

/// Display the outcome of a merge.
pub fn display_merge_report(formatter: &OutputFormatter, report: &MergeReport) {
    if report.dry_run {
        formatter.info(&format!(
            "Dry run: would write {} page(s) from {} file(s) to {}",
            report.total_pages,
            report.inputs.len(),
            report.output.display()
        ));
        for (i, input) in report.inputs.iter().enumerate() {
            formatter.list_item(
                i + 1,
                &format!("{} ({} page(s))", input.path.display(), input.pages),
            );
        }
        for bookmark in &report.bookmarks {
            formatter.detail(
                "Bookmark",
                &format!("{} -> page {}", bookmark.title, bookmark.output_index + 1),
            );
        }
        return;
    }

    formatter.success(&format!(
        "Created {} with {} page(s)",
        report.output.display(),
        report.total_pages
    ));
    if let Some(bytes) = report.bytes_written {
        formatter.detail("Size", &format_file_size(bytes));
    }
    if !report.bookmarks.is_empty() {
        formatter.detail("Bookmarks", &report.bookmarks.len().to_string());
    }
}

/// Display the outcome of a split.
pub fn display_split_report(formatter: &OutputFormatter, report: &SplitReport) {
    let verb = if report.dry_run { "Would create" } else { "Created" };
    formatter.info(&format!(
        "{verb} {} file(s) from {}",
        report.outputs.len(),
        report.input.display()
    ));
    for (i, output) in report.outputs.iter().enumerate() {
        formatter.list_item(
            i + 1,
            &format!("{} ({})", output.path.display(), output.part.describe()),
        );
    }
    for part in &report.skipped {
        formatter.warning(&format!(
            "Skipped part {}: it contains no pages (other parts keep their numbers)",
            part.number
        ));
    }
}

/// Display the outcome of a page extraction.
pub fn display_extract_report(formatter: &OutputFormatter, report: &ExtractReport) {
    formatter.success(&format!(
        "Extracted {} page(s) from {} to {}",
        report.pages,
        report.input.display(),
        report.output.display()
    ));
    formatter.detail("Pages", &report.selection);
    formatter.detail("Size", &format_file_size(report.bytes_written));
}

/// Display information about a single document.
pub fn display_document_report(formatter: &OutputFormatter, report: &DocumentReport) {
    formatter.plain(&format!("File: {}", report.path.display()));
    formatter.plain(&format!("Size: {}", format_file_size(report.file_size)));
    formatter.plain(&format!("Pages: {}", report.pages));

    if !report.metadata.is_empty() {
        formatter.plain("Metadata:");
        for (label, value) in report.metadata.fields() {
            formatter.plain(&format!("  {label}: {value}"));
        }
    }
}
