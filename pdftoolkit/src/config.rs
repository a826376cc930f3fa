//! Configuration module for pdftoolkit.
//!
//! This module holds the validated, normalized settings that drive each
//! operation. The CLI turns parsed arguments into these structures; library
//! users can build them directly. It handles:
//! - Log level selection
//! - Output filename templates
//! - Per-operation settings for merge, split and extract

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

use crate::error::{Result, ToolkitError};
use crate::plan::SplitMode;

/// Default template for `split` and `split-at` outputs.
pub const DEFAULT_PART_PATTERN: &str = "{base}_part{num}.pdf";

/// Default template for `split-pages` outputs.
pub const DEFAULT_PAGE_PATTERN: &str = "{base}_page{num}.pdf";

/// Widest zero padding accepted by `{num:N}`.
pub const MAX_NUM_WIDTH: usize = 20;

/// Diagnostic log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogLevel {
    /// Everything, including per-page detail.
    Debug,
    /// Completed operations and created files.
    Info,
    /// Skipped work and other surprises (default).
    #[default]
    Warning,
    /// Failures only.
    Error,
}

impl LogLevel {
    /// Convert to a `tracing` level filter.
    pub fn as_level_filter(&self) -> LevelFilter {
        match self {
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Warning => LevelFilter::WARN,
            Self::Error => LevelFilter::ERROR,
        }
    }
}

impl FromStr for LogLevel {
    type Err = ToolkitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARNING" | "WARN" => Ok(Self::Warning),
            "ERROR" => Ok(Self::Error),
            _ => Err(ToolkitError::invalid_argument(format!(
                "Invalid log level: {s}. Must be one of: DEBUG, INFO, WARNING, ERROR"
            ))),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Base,
    Num { width: usize },
}

/// Output filename template.
///
/// Recognizes `{base}` (source filename without extension) and `{num}`
/// (1-based sequence number). `{num:03}` zero-pads the number, and `{{` /
/// `}}` produce literal braces. Templates name a file, not a path: path
/// separators and the names `.` and `..` are rejected.
///
/// # Examples
///
/// ```
/// use pdftoolkit::config::OutputPattern;
///
/// let pattern = OutputPattern::parse("{base}_part{num}.pdf").unwrap();
/// assert_eq!(pattern.render("report", 2), "report_part2.pdf");
///
/// let padded = OutputPattern::parse("{base}-{num:03}.pdf").unwrap();
/// assert_eq!(padded.render("scan", 7), "scan-007.pdf");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPattern {
    template: String,
    segments: Vec<Segment>,
}

impl OutputPattern {
    /// Parse and validate a template.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for unknown placeholders, unbalanced braces,
    /// bad number formats, path separators, or templates that render to an
    /// empty name.
    pub fn parse(template: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if !closed {
                        return Err(ToolkitError::invalid_argument(format!(
                            "Unclosed placeholder in pattern: {template}"
                        )));
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Self::parse_placeholder(&name, template)?);
                }
                '}' => {
                    return Err(ToolkitError::invalid_argument(format!(
                        "Unmatched '}}' in pattern: {template}"
                    )));
                }
                '/' | '\\' => {
                    return Err(ToolkitError::invalid_argument(format!(
                        "Output pattern must be a file name without '{c}': {template}"
                    )));
                }
                _ => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        if segments.is_empty() {
            return Err(ToolkitError::invalid_argument("Output pattern cannot be empty"));
        }
        if matches!(segments.as_slice(), [Segment::Literal(name)] if name == "." || name == "..") {
            return Err(ToolkitError::invalid_argument(format!(
                "Output pattern must name a file: {template}"
            )));
        }

        Ok(Self {
            template: template.to_string(),
            segments,
        })
    }

    fn parse_placeholder(name: &str, template: &str) -> Result<Segment> {
        let (key, format) = match name.split_once(':') {
            Some((key, format)) => (key.trim(), Some(format.trim())),
            None => (name.trim(), None),
        };

        match (key, format) {
            ("base", None) => Ok(Segment::Base),
            ("num", None) => Ok(Segment::Num { width: 0 }),
            ("num", Some(format)) => {
                let digits = format.strip_suffix('d').unwrap_or(format);
                let digits = digits.strip_prefix('0').unwrap_or(digits);
                match digits.parse::<usize>() {
                    Ok(width) if width <= MAX_NUM_WIDTH => Ok(Segment::Num { width }),
                    Ok(width) => Err(ToolkitError::invalid_argument(format!(
                        "Number width {width} in pattern exceeds {MAX_NUM_WIDTH}: {template}"
                    ))),
                    Err(_) => Err(ToolkitError::invalid_argument(format!(
                        "Invalid number format '{format}' in pattern: {template}"
                    ))),
                }
            }
            _ => Err(ToolkitError::invalid_argument(format!(
                "Unknown placeholder '{{{name}}}' in pattern: {template}. \
                 Supported placeholders are {{base}} and {{num}}"
            ))),
        }
    }

    /// The default `{base}_part{num}.pdf` template.
    pub fn parts() -> Self {
        Self::builtin(DEFAULT_PART_PATTERN, "_part")
    }

    /// The default `{base}_page{num}.pdf` template.
    pub fn pages() -> Self {
        Self::builtin(DEFAULT_PAGE_PATTERN, "_page")
    }

    fn builtin(template: &str, infix: &str) -> Self {
        Self {
            template: template.to_string(),
            segments: vec![
                Segment::Base,
                Segment::Literal(infix.to_string()),
                Segment::Num { width: 0 },
                Segment::Literal(".pdf".to_string()),
            ],
        }
    }

    /// Whether the template contains `{num}`, i.e. produces distinct names
    /// for distinct parts.
    pub fn has_sequence(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, Segment::Num { .. }))
    }

    /// Render the filename for one output.
    pub fn render(&self, base: &str, num: usize) -> String {
        let mut name = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => name.push_str(text),
                Segment::Base => name.push_str(base),
                Segment::Num { width } => name.push_str(&format!("{num:0width$}")),
            }
        }
        name
    }

    /// The template as written.
    pub fn as_str(&self) -> &str {
        &self.template
    }
}

impl FromStr for OutputPattern {
    type Err = ToolkitError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for OutputPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

/// How bookmarks are attached to a merged document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BookmarkMode {
    /// No outline entries.
    #[default]
    None,
    /// One entry per input, titled with the input's base filename.
    FileNames,
    /// One entry per input with explicit titles (one per input, in order).
    Titles(Vec<String>),
}

impl BookmarkMode {
    /// Build the mode from the `--bookmarks` flag and any explicit titles.
    ///
    /// Explicit titles imply bookmarks.
    pub fn from_flags(bookmarks: bool, titles: Vec<String>) -> Self {
        if !titles.is_empty() {
            Self::Titles(titles)
        } else if bookmarks {
            Self::FileNames
        } else {
            Self::None
        }
    }

    /// Whether any outline entries will be created.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Settings for merging an explicit list of files.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Input PDF paths, in merge order.
    pub inputs: Vec<PathBuf>,
    /// Output PDF path.
    pub output: PathBuf,
    /// Replace an existing output file.
    pub overwrite: bool,
    /// Bookmark behavior.
    pub bookmarks: BookmarkMode,
    /// Validate and plan without writing.
    pub dry_run: bool,
}

impl MergeConfig {
    /// Check for logical inconsistencies that need no file I/O.
    ///
    /// # Errors
    ///
    /// Returns an error if the output path is also one of the inputs.
    pub fn validate(&self) -> Result<()> {
        if self.inputs.iter().any(|input| input == &self.output) {
            return Err(ToolkitError::invalid_argument(format!(
                "Output file cannot be the same as an input file: {}",
                self.output.display()
            )));
        }
        Ok(())
    }
}

/// Settings for merging every PDF in a directory.
#[derive(Debug, Clone)]
pub struct MergeDirConfig {
    /// Directory to scan.
    pub directory: PathBuf,
    /// Output PDF path.
    pub output: PathBuf,
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Replace an existing output file.
    pub overwrite: bool,
    /// Bookmark behavior.
    pub bookmarks: BookmarkMode,
    /// Validate and plan without writing.
    pub dry_run: bool,
}

impl MergeDirConfig {
    /// Turn the directory listing into a regular merge configuration.
    pub fn into_merge_config(self, inputs: Vec<PathBuf>) -> MergeConfig {
        MergeConfig {
            inputs,
            output: self.output,
            overwrite: self.overwrite,
            bookmarks: self.bookmarks,
            dry_run: self.dry_run,
        }
    }
}

/// Settings for splitting one file into several.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Input PDF path.
    pub input: PathBuf,
    /// Partitioning strategy.
    pub mode: SplitMode,
    /// Output filename template.
    pub pattern: OutputPattern,
    /// Directory for outputs; defaults to the input's directory.
    pub output_dir: Option<PathBuf>,
    /// Replace existing output files.
    pub overwrite: bool,
    /// Validate and plan without writing.
    pub dry_run: bool,
}

impl SplitConfig {
    /// Create a configuration with the default pattern for `mode`.
    pub fn new(input: impl Into<PathBuf>, mode: SplitMode) -> Self {
        let pattern = match mode {
            SplitMode::SinglePages => OutputPattern::pages(),
            _ => OutputPattern::parts(),
        };
        Self {
            input: input.into(),
            pattern,
            mode,
            output_dir: None,
            overwrite: false,
            dry_run: false,
        }
    }
}

/// Settings for copying selected pages into a new file.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Input PDF path.
    pub input: PathBuf,
    /// Page specification such as `1,3-5,10`.
    pub pages: String,
    /// Output PDF path.
    pub output: PathBuf,
    /// Replace an existing output file.
    pub overwrite: bool,
}

impl ExtractConfig {
    /// Check for logical inconsistencies that need no file I/O.
    ///
    /// # Errors
    ///
    /// Returns an error if the page specification is blank or the output
    /// path equals the input path.
    pub fn validate(&self) -> Result<()> {
        if self.pages.trim().is_empty() {
            return Err(ToolkitError::invalid_argument("Page specification cannot be empty"));
        }
        if self.input == self.output {
            return Err(ToolkitError::invalid_argument(format!(
                "Output file cannot be the same as the input file: {}",
                self.output.display()
            )));
        }
        Ok(())
    }
}
