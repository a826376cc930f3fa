//! Split planning.
//!
//! A [`SplitPlan`] partitions `[0, total_pages)` into contiguous, ordered
//! [`SplitPart`]s. Output naming is left to the caller; each part only
//! carries its 1-based sequence number.

use serde::Serialize;
use std::ops::Range;

use crate::error::{Result, ToolkitError};

/// How a document is partitioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitMode {
    /// Consecutive chunks of the given size; the last one may be shorter.
    FixedSize(usize),
    /// A new part starts at each 1-based page number.
    AtPoints(Vec<usize>),
    /// One part per page.
    SinglePages,
}

/// One output of a split, covering pages `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SplitPart {
    /// 1-based sequence number.
    pub number: usize,
    /// First zero-based page index.
    pub start: usize,
    /// Zero-based page index one past the last page.
    pub end: usize,
}

impl SplitPart {
    /// Number of pages in this part.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the part holds no pages. Only a split point of 1 produces one.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Zero-based page indices of this part.
    pub fn pages(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Human-readable 1-based page span, e.g. `pages 3-7`.
    pub fn describe(&self) -> String {
        match self.len() {
            0 => "no pages".to_string(),
            1 => format!("page {}", self.start + 1),
            _ => format!("pages {}-{}", self.start + 1, self.end),
        }
    }
}

/// Ordered partition of a document's pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitPlan {
    total_pages: usize,
    parts: Vec<SplitPart>,
}

impl SplitPlan {
    /// Compute the plan for `mode` over a document with `total_pages` pages.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if a fixed size of 0 is requested
    /// - `NoSplitPoints` if `AtPoints` carries no points
    /// - `InvalidRange` if a split point lies outside `[1, total_pages]`
    ///
    /// # Examples
    ///
    /// ```
    /// use pdftoolkit::plan::{SplitMode, SplitPlan};
    ///
    /// let plan = SplitPlan::build(&SplitMode::FixedSize(10), 23).unwrap();
    /// let ranges: Vec<_> = plan.parts().iter().map(|p| (p.start, p.end)).collect();
    /// assert_eq!(ranges, vec![(0, 10), (10, 20), (20, 23)]);
    /// ```
    pub fn build(mode: &SplitMode, total_pages: usize) -> Result<Self> {
        let bounds = match mode {
            SplitMode::FixedSize(per_split) => fixed_size_bounds(*per_split, total_pages)?,
            SplitMode::AtPoints(points) => point_bounds(points, total_pages)?,
            SplitMode::SinglePages => fixed_size_bounds(1, total_pages)?,
        };

        let parts = bounds
            .into_iter()
            .enumerate()
            .map(|(i, (start, end))| SplitPart {
                number: i + 1,
                start,
                end,
            })
            .collect();

        Ok(Self { total_pages, parts })
    }

    /// Parts in output order.
    pub fn parts(&self) -> &[SplitPart] {
        &self.parts
    }

    /// Number of parts, including empty ones.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the plan has no parts (only for an empty document).
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Page count of the planned document.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }
}

fn fixed_size_bounds(per_split: usize, total_pages: usize) -> Result<Vec<(usize, usize)>> {
    if per_split < 1 {
        return Err(ToolkitError::invalid_argument(
            "Pages per split must be at least 1",
        ));
    }

    Ok((0..total_pages)
        .step_by(per_split)
        .map(|start| (start, (start + per_split).min(total_pages)))
        .collect())
}

fn point_bounds(points: &[usize], total_pages: usize) -> Result<Vec<(usize, usize)>> {
    if points.is_empty() {
        return Err(ToolkitError::NoSplitPoints);
    }

    if let Some(&bad) = points.iter().find(|&&p| p < 1 || p > total_pages) {
        return Err(ToolkitError::invalid_range(bad.to_string(), total_pages));
    }

    let mut points = points.to_vec();
    points.sort_unstable();
    points.dedup();

    let mut bounds = Vec::with_capacity(points.len() + 1);
    let mut start = 0;
    for point in points {
        let boundary = point - 1;
        bounds.push((start, boundary));
        start = boundary;
    }
    bounds.push((start, total_pages));

    Ok(bounds)
}
