//! Merge planning.
//!
//! Lays out the pages of several documents one after another and positions
//! an optional bookmark on the first page each document contributes.

use serde::Serialize;

use crate::error::{Result, ToolkitError};

/// Minimum number of documents a merge accepts.
pub const MIN_MERGE_INPUTS: usize = 2;

/// One page of the merged output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedPage {
    /// Index of the source document in the input list.
    pub source: usize,
    /// Zero-based page index inside the source document.
    pub page_index: usize,
    /// Zero-based page index in the merged output.
    pub output_index: usize,
    /// Bookmark title, present only on a source's first page.
    pub bookmark: Option<String>,
}

/// A bookmark of the merged output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedBookmark {
    /// Outline title.
    pub title: String,
    /// Index of the source document the bookmark introduces.
    pub source: usize,
    /// Zero-based output page the bookmark points at.
    pub output_index: usize,
}

/// Concatenation order for a merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergePlan {
    pages: Vec<PlannedPage>,
}

impl MergePlan {
    /// Plan the merge of documents with the given page counts.
    ///
    /// With `titles`, each document whose pages appear in the output gets a
    /// bookmark at the sum of the page counts before it. A document without
    /// pages gets none since there is no page to point at.
    ///
    /// # Errors
    ///
    /// - `InsufficientInputs` for fewer than two documents
    /// - `MismatchedTitles` if `titles` does not hold one title per document
    ///
    /// # Examples
    ///
    /// ```
    /// use pdftoolkit::plan::MergePlan;
    ///
    /// let titles = vec!["Intro".to_string(), "Body".to_string()];
    /// let plan = MergePlan::build(&[2, 3], Some(titles.as_slice())).unwrap();
    /// assert_eq!(plan.total_pages(), 5);
    /// assert_eq!(plan.bookmarks()[1].output_index, 2);
    /// ```
    pub fn build(page_counts: &[usize], titles: Option<&[String]>) -> Result<Self> {
        if page_counts.len() < MIN_MERGE_INPUTS {
            return Err(ToolkitError::InsufficientInputs {
                required: MIN_MERGE_INPUTS,
                found: page_counts.len(),
            });
        }

        if let Some(titles) = titles
            && titles.len() != page_counts.len()
        {
            return Err(ToolkitError::MismatchedTitles {
                titles: titles.len(),
                documents: page_counts.len(),
            });
        }

        let total: usize = page_counts.iter().sum();
        let mut pages = Vec::with_capacity(total);
        let mut offset = 0;

        for (source, &count) in page_counts.iter().enumerate() {
            let title = titles.map(|titles| titles[source].clone());
            for page_index in 0..count {
                pages.push(PlannedPage {
                    source,
                    page_index,
                    output_index: offset + page_index,
                    bookmark: if page_index == 0 { title.clone() } else { None },
                });
            }
            offset += count;
        }

        Ok(Self { pages })
    }

    /// Pages in output order.
    pub fn pages(&self) -> &[PlannedPage] {
        &self.pages
    }

    /// Page count of the merged output.
    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    /// Bookmarks in output order.
    pub fn bookmarks(&self) -> Vec<PlannedBookmark> {
        self.pages
            .iter()
            .filter_map(|page| {
                page.bookmark.as_ref().map(|title| PlannedBookmark {
                    title: title.clone(),
                    source: page.source,
                    output_index: page.output_index,
                })
            })
            .collect()
    }

    /// Pages contributed by one source, in order.
    pub fn pages_from(&self, source: usize) -> impl Iterator<Item = &PlannedPage> + '_ {
        self.pages.iter().filter(move |page| page.source == source)
    }
}
