//! Merge and extract operations.

use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

use super::Toolkit;
use crate::config::{BookmarkMode, ExtractConfig, MergeConfig, MergeDirConfig};
use crate::error::{Result, ToolkitError};
use crate::io::PdfBackend;
use crate::plan::{MergePlan, PageIndexSet, PlannedBookmark};
use crate::utils::base_name;

/// A merged input and the pages it contributed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputSummary {
    /// Input path.
    pub path: PathBuf,
    /// Pages contributed.
    pub pages: usize,
}

/// Result of a merge.
#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    /// Output path.
    pub output: PathBuf,
    /// Inputs in merge order.
    pub inputs: Vec<InputSummary>,
    /// Page count of the output.
    pub total_pages: usize,
    /// Bookmarks placed in the output.
    pub bookmarks: Vec<PlannedBookmark>,
    /// Bytes written, `None` for a dry run.
    pub bytes_written: Option<u64>,
    /// Whether nothing was written.
    pub dry_run: bool,
}

/// Result of an extract.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractReport {
    /// Source document.
    pub input: PathBuf,
    /// Output path.
    pub output: PathBuf,
    /// Selected pages as a 1-based range expression.
    pub selection: String,
    /// Number of pages written.
    pub pages: usize,
    /// Bytes written.
    pub bytes_written: u64,
}

impl<B: PdfBackend> Toolkit<B> {
    /// Merge the configured inputs into one document.
    ///
    /// All inputs are validated and opened, the plan is computed and the
    /// output path is checked before anything is written.
    ///
    /// # Errors
    ///
    /// - Path errors from validation (`NotFound`, `InvalidFormat`,
    ///   `AlreadyExists`, ...)
    /// - `InsufficientInputs` for fewer than two inputs
    /// - `MismatchedTitles` if explicit titles do not match the inputs
    /// - `InvalidArgument` if the inputs contain no pages at all
    /// - Backend and write errors
    pub async fn merge(&self, config: &MergeConfig) -> Result<MergeReport> {
        config.validate()?;

        let inputs = self.validator.validate_inputs(&config.inputs).await?;
        let documents = inputs
            .iter()
            .map(|input| self.backend.open(input.path()))
            .collect::<Result<Vec<_>>>()?;
        let page_counts: Vec<usize> = documents
            .iter()
            .map(|document| self.backend.page_count(document))
            .collect();

        let titles: Option<Vec<String>> = match &config.bookmarks {
            BookmarkMode::None => None,
            BookmarkMode::FileNames => {
                Some(inputs.iter().map(|input| base_name(input.path())).collect())
            }
            BookmarkMode::Titles(titles) => Some(titles.clone()),
        };
        let plan = MergePlan::build(&page_counts, titles.as_deref())?;

        if plan.total_pages() == 0 {
            return Err(ToolkitError::invalid_argument(
                "Nothing to merge: the input files contain no pages",
            ));
        }

        let mut report = MergeReport {
            output: config.output.clone(),
            inputs: inputs
                .iter()
                .zip(&page_counts)
                .map(|(input, &pages)| InputSummary {
                    path: input.path().to_path_buf(),
                    pages,
                })
                .collect(),
            total_pages: plan.total_pages(),
            bookmarks: plan.bookmarks(),
            bytes_written: None,
            dry_run: config.dry_run,
        };

        if config.dry_run {
            self.validator
                .check_output(&config.output, config.overwrite)
                .await?;
            debug!(output = %config.output.display(), pages = plan.total_pages(), "Dry run merge");
            return Ok(report);
        }

        let target = self
            .validator
            .validate_output(&config.output, config.overwrite)
            .await?;

        let mut progress = self.progress(plan.total_pages(), "Merging");
        let mut writer = self.backend.new_writer();
        for page in plan.pages() {
            if let Some(title) = &page.bookmark {
                self.backend.add_bookmark(&mut writer, title, page.output_index)?;
            }
            let handle = self.backend.get_page(&documents[page.source], page.page_index)?;
            self.backend.add_page(&mut writer, handle)?;
            progress.increment();
        }
        progress.finish();

        let bytes = self.backend.serialize(writer)?;
        let stats = self.writer.write(&bytes, target.path()).await?;
        report.bytes_written = Some(stats.file_size);

        info!(
            output = %target.path().display(),
            inputs = report.inputs.len(),
            pages = report.total_pages,
            bookmarks = report.bookmarks.len(),
            "Merged PDF files"
        );
        Ok(report)
    }

    /// Merge every PDF file of a directory, in path order.
    ///
    /// The output file itself is skipped if it lives inside the directory.
    ///
    /// # Errors
    ///
    /// - `NotFound` / `NotADirectory` for a bad directory
    /// - `EmptyDirectory` if no PDF file is found
    /// - Anything [`merge`](Self::merge) returns
    pub async fn merge_directory(&self, config: &MergeDirConfig) -> Result<MergeReport> {
        let files: Vec<PathBuf> = self
            .validator
            .collect_pdf_files(&config.directory, config.recursive)
            .await?
            .into_iter()
            .filter(|file| file != &config.output)
            .collect();

        if files.is_empty() {
            return Err(ToolkitError::EmptyDirectory {
                path: config.directory.clone(),
            });
        }

        info!(
            dir = %config.directory.display(),
            count = files.len(),
            "Found PDF files to merge"
        );
        self.merge(&config.clone().into_merge_config(files)).await
    }

    /// Copy the pages selected by a range expression into a new document.
    ///
    /// # Errors
    ///
    /// - Path errors from validation
    /// - `InvalidToken` / `InvalidRange` for a bad page expression
    /// - Backend and write errors
    pub async fn extract(&self, config: &ExtractConfig) -> Result<ExtractReport> {
        config.validate()?;

        let input = self.validator.validate_input(&config.input).await?;
        let document = self.backend.open(input.path())?;
        let selection = PageIndexSet::parse(&config.pages, self.backend.page_count(&document))?;

        let target = self
            .validator
            .validate_output(&config.output, config.overwrite)
            .await?;

        let bytes = self.assemble_pages(&document, selection.iter(), "Extracting")?;
        let stats = self.writer.write(&bytes, target.path()).await?;

        info!(
            input = %input.path().display(),
            output = %target.path().display(),
            pages = selection.len(),
            "Extracted pages"
        );
        Ok(ExtractReport {
            input: input.into_path(),
            output: target.into_path(),
            selection: selection.to_string(),
            pages: selection.len(),
            bytes_written: stats.file_size,
        })
    }
}
