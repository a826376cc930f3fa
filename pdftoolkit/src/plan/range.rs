//! Page range expressions.
//!
//! A range expression is a comma separated list of 1-based page numbers
//! (`7`) and inclusive ranges (`3-5`). Parsing validates every token against
//! the page count of the document and yields a [`PageIndexSet`] of
//! zero-based indices.
//!
//! # Examples
//!
//! ```
//! use pdftoolkit::plan::PageIndexSet;
//!
//! let pages = PageIndexSet::parse("1,3-5,10", 10).unwrap();
//! assert_eq!(pages.as_slice(), &[0, 2, 3, 4, 9]);
//! ```

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{Result, ToolkitError};

/// Ascending, deduplicated zero-based page indices, all below the page count
/// they were parsed against.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageIndexSet {
    indices: Vec<usize>,
}

impl PageIndexSet {
    /// Parse a range expression against a document with `total_pages` pages.
    ///
    /// # Errors
    ///
    /// - `InvalidToken` if a token is empty or not of the form `N` / `N-M`
    /// - `InvalidRange` if a page is below 1, above `total_pages`, or a range
    ///   is reversed
    pub fn parse(spec: &str, total_pages: usize) -> Result<Self> {
        let mut pages = BTreeSet::new();

        for raw in spec.split(',') {
            let token = raw.trim();
            if token.is_empty() {
                return Err(ToolkitError::invalid_token(raw));
            }

            let (start, end) = match token.split_once('-') {
                Some((start, end)) => (parse_page(start, token)?, parse_page(end, token)?),
                None => {
                    let page = parse_page(token, token)?;
                    (page, page)
                }
            };

            if start < 1 || end > total_pages || start > end {
                return Err(ToolkitError::invalid_range(token, total_pages));
            }

            pages.extend(start - 1..end);
        }

        Ok(Self {
            indices: pages.into_iter().collect(),
        })
    }

    /// Build a set covering every page of a document.
    pub fn all(total_pages: usize) -> Self {
        Self {
            indices: (0..total_pages).collect(),
        }
    }

    /// Number of selected pages.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether no page is selected.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Whether the zero-based `index` is selected.
    pub fn contains(&self, index: usize) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    /// Selected indices in ascending order.
    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    /// Iterate over the selected indices in ascending order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }
}

impl fmt::Display for PageIndexSet {
    /// Renders the selection back as a compact 1-based expression.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        let mut iter = self.indices.iter().copied().peekable();
        while let Some(start) = iter.next() {
            let mut end = start;
            while iter.peek() == Some(&(end + 1)) {
                end += 1;
                iter.next();
            }
            if !first {
                f.write_str(",")?;
            }
            first = false;
            if start == end {
                write!(f, "{}", start + 1)?;
            } else {
                write!(f, "{}-{}", start + 1, end + 1)?;
            }
        }
        Ok(())
    }
}

impl IntoIterator for PageIndexSet {
    type Item = usize;
    type IntoIter = std::vec::IntoIter<usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.indices.into_iter()
    }
}

fn parse_page(text: &str, token: &str) -> Result<usize> {
    text.trim()
        .parse::<usize>()
        .map_err(|_| ToolkitError::invalid_token(token))
}
