//! Page planning.
//!
//! Pure computations over page counts: which pages a range expression
//! selects, how a document is partitioned by a split, and in which order
//! pages of several documents are concatenated by a merge. Nothing in here
//! touches a PDF or the filesystem.

pub mod merge;
pub mod range;
pub mod split;

pub use merge::{MergePlan, PlannedBookmark, PlannedPage};
pub use range::PageIndexSet;
pub use split::{SplitMode, SplitPart, SplitPlan};
