//! CLI argument parsing for pdf-toolkit.
//!
//! This module defines the command-line interface structure using `clap`.
//! Each subcommand converts its arguments into one of the library's
//! configuration types; checks that need no file I/O happen there.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use pdftoolkit::config::{
    BookmarkMode, ExtractConfig, LogLevel, MergeConfig, MergeDirConfig, OutputPattern,
    SplitConfig,
};
use pdftoolkit::plan::SplitMode;
use pdftoolkit::utils::expand_input_patterns;
use pdftoolkit::{Result, ToolkitError};

/// Merge and split PDF files.
#[derive(Parser, Debug)]
#[command(name = "pdf-toolkit")]
#[command(version)]
#[command(about = "Merge and split PDF files", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// Suppress all non-error output
    ///
    /// Primary results such as `count` and `info` are still printed.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show details such as output sizes and bookmark targets
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Do not draw progress bars
    #[arg(long, global = true)]
    pub no_progress: bool,

    /// Diagnostic log level (DEBUG, INFO, WARNING, ERROR)
    #[arg(long, global = true, value_name = "LEVEL", env = "PDF_TOOLKIT_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Merge PDF files into one document (in the order given)
    ///
    /// Examples:
    ///   pdf-toolkit merge a.pdf b.pdf -o out.pdf
    ///   pdf-toolkit merge 'chapter*.pdf' -o book.pdf --bookmarks
    Merge(MergeArgs),

    /// Merge every PDF file of a directory, sorted by path
    MergeDir(MergeDirArgs),

    /// Split a PDF into chunks of a fixed number of pages
    Split(SplitArgs),

    /// Split a PDF so that a new file starts at each given page
    ///
    /// Example:
    ///   pdf-toolkit split-at report.pdf --at 10 --at 20
    SplitAt(SplitAtArgs),

    /// Split a PDF into one file per page
    SplitPages(SplitPagesArgs),

    /// Copy selected pages into a new PDF
    ///
    /// Example:
    ///   pdf-toolkit extract report.pdf --pages 1,3-5,10 -o picked.pdf
    Extract(ExtractArgs),

    /// Show page count, file size and metadata
    Info(InfoArgs),

    /// Print the page count
    Count(CountArgs),
}

/// Arguments for `merge`.
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Input PDF files or glob patterns
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<String>,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Replace an existing output file
    #[arg(long)]
    pub overwrite: bool,

    /// Add one bookmark per input, titled with its file name
    #[arg(short, long)]
    pub bookmarks: bool,

    /// Bookmark title for each input, in order (repeat once per input)
    #[arg(long = "title", value_name = "TITLE")]
    pub titles: Vec<String>,

    /// Validate and show what would be written without writing
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

impl MergeArgs {
    /// Expand glob patterns and build the merge configuration.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed glob patterns or an output that is
    /// also an input.
    pub fn to_config(&self) -> Result<MergeConfig> {
        let config = MergeConfig {
            inputs: expand_input_patterns(&self.inputs)?,
            output: self.output.clone(),
            overwrite: self.overwrite,
            bookmarks: BookmarkMode::from_flags(self.bookmarks, self.titles.clone()),
            dry_run: self.dry_run,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Arguments for `merge-dir`.
#[derive(Args, Debug)]
pub struct MergeDirArgs {
    /// Directory containing the PDF files
    #[arg(value_name = "DIR")]
    pub directory: PathBuf,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Include subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Replace an existing output file
    #[arg(long)]
    pub overwrite: bool,

    /// Add one bookmark per input, titled with its file name
    #[arg(short, long)]
    pub bookmarks: bool,

    /// Validate and show what would be written without writing
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

impl MergeDirArgs {
    /// Build the directory merge configuration.
    pub fn to_config(&self) -> MergeDirConfig {
        MergeDirConfig {
            directory: self.directory.clone(),
            output: self.output.clone(),
            recursive: self.recursive,
            overwrite: self.overwrite,
            bookmarks: BookmarkMode::from_flags(self.bookmarks, Vec::new()),
            dry_run: self.dry_run,
        }
    }
}

/// Output options shared by the split subcommands.
#[derive(Args, Debug)]
pub struct SplitOutputArgs {
    /// Output filename template using {base} and {num}, e.g. "{base}-{num:03}.pdf"
    #[arg(long, value_name = "TEMPLATE")]
    pub pattern: Option<String>,

    /// Directory for the output files [default: the input's directory]
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Replace existing output files
    #[arg(long)]
    pub overwrite: bool,

    /// Validate and show what would be written without writing
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

impl SplitOutputArgs {
    /// Build a split configuration for `input` and `mode`.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is malformed.
    pub fn to_config(&self, input: &Path, mode: SplitMode) -> Result<SplitConfig> {
        let mut config = SplitConfig::new(input, mode);
        if let Some(pattern) = &self.pattern {
            config.pattern = OutputPattern::parse(pattern)?;
        }
        config.output_dir = self.output_dir.clone();
        config.overwrite = self.overwrite;
        config.dry_run = self.dry_run;
        Ok(config)
    }
}

/// Arguments for `split`.
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Pages per output file
    #[arg(short = 'p', long, value_name = "N")]
    pub pages_per_split: usize,

    #[command(flatten)]
    pub output: SplitOutputArgs,
}

impl SplitArgs {
    /// Build the split configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is malformed.
    pub fn to_config(&self) -> Result<SplitConfig> {
        self.output
            .to_config(&self.input, SplitMode::FixedSize(self.pages_per_split))
    }
}

/// Arguments for `split-at`.
#[derive(Args, Debug)]
pub struct SplitAtArgs {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// 1-based page that starts a new file (repeatable)
    #[arg(long = "at", value_name = "PAGE")]
    pub points: Vec<usize>,

    #[command(flatten)]
    pub output: SplitOutputArgs,
}

impl SplitAtArgs {
    /// Build the split configuration.
    ///
    /// # Errors
    ///
    /// Returns `NoSplitPoints` if no `--at` was given, or an error if the
    /// template is malformed.
    pub fn to_config(&self) -> Result<SplitConfig> {
        if self.points.is_empty() {
            return Err(ToolkitError::NoSplitPoints);
        }
        self.output
            .to_config(&self.input, SplitMode::AtPoints(self.points.clone()))
    }
}

/// Arguments for `split-pages`.
#[derive(Args, Debug)]
pub struct SplitPagesArgs {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    #[command(flatten)]
    pub output: SplitOutputArgs,
}

impl SplitPagesArgs {
    /// Build the split configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is malformed.
    pub fn to_config(&self) -> Result<SplitConfig> {
        self.output.to_config(&self.input, SplitMode::SinglePages)
    }
}

/// Arguments for `extract`.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Pages to copy, e.g. "1,3-5,10"
    #[arg(long, value_name = "RANGE")]
    pub pages: String,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Replace an existing output file
    #[arg(long)]
    pub overwrite: bool,
}

impl ExtractArgs {
    /// Build the extract configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the page list is blank or the output is the input.
    pub fn to_config(&self) -> Result<ExtractConfig> {
        let config = ExtractConfig {
            input: self.input.clone(),
            pages: self.pages.clone(),
            output: self.output.clone(),
            overwrite: self.overwrite,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Arguments for `info`.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// PDF file to describe
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `count`.
#[derive(Args, Debug)]
pub struct CountArgs {
    /// PDF file to count
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

impl Cli {
    /// Resolve the diagnostic log level from `--log-level` or the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown level name.
    pub fn log_level(&self) -> Result<LogLevel> {
        match &self.log_level {
            Some(level) => level.parse(),
            None => Ok(LogLevel::default()),
        }
    }
}
