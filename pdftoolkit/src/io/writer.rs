//! Output file writing.
//!
//! Serialized documents are written atomically: bytes go to a temporary
//! sibling file first, which is then renamed over the destination. A failed
//! write never leaves a truncated PDF at the output path.
//!
//! # Examples
//!
//! ```no_run
//! use pdftoolkit::io::OutputWriter;
//! use std::path::Path;
//!
//! # async fn example(bytes: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = OutputWriter::new();
//! let stats = writer.write(&bytes, Path::new("output.pdf")).await?;
//! println!("Wrote {}", stats.format_file_size());
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;
use tracing::debug;

use crate::error::{Result, ToolkitError};
use crate::utils::format_file_size;

/// Statistics about a write operation.
#[derive(Debug, Clone, Serialize)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Writes serialized documents to disk through a temporary sibling file
/// that is renamed into place.
#[derive(Debug, Clone, Default)]
pub struct OutputWriter;

impl OutputWriter {
    /// Create a writer.
    pub fn new() -> Self {
        Self
    }

    /// Write `bytes` to `path`, replacing any existing file.
    ///
    /// Overwrite policy is not checked here; callers validate targets with
    /// [`PathValidator::validate_output`](crate::validation::PathValidator::validate_output)
    /// first.
    ///
    /// # Errors
    ///
    /// Returns `FailedToWrite` if the file cannot be created, written or
    /// renamed into place.
    pub async fn write(&self, bytes: &[u8], path: &Path) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();
        let bytes = bytes.to_vec();

        let stats = task::spawn_blocking(move || {
            let start = Instant::now();
            let temp_path = temp_path_for(&path_buf);

            let result = write_file(&temp_path, &bytes).and_then(|()| {
                std::fs::rename(&temp_path, &path_buf).map_err(|e| ToolkitError::FailedToWrite {
                    path: path_buf.clone(),
                    source: e,
                })
            });

            if result.is_err() {
                let _ = std::fs::remove_file(&temp_path);
            }
            result?;

            Ok::<_, ToolkitError>(WriteStatistics {
                write_time: start.elapsed(),
                file_size: bytes.len() as u64,
                output_path: path_buf,
            })
        })
        .await
        .map_err(|e| ToolkitError::FailedToWrite {
            path: path.to_path_buf(),
            source: std::io::Error::other(format!("write task failed: {e}")),
        })??;

        debug!(
            path = %stats.output_path.display(),
            bytes = stats.file_size,
            elapsed = ?stats.write_time,
            "Wrote output file"
        );
        Ok(stats)
    }
}

/// Temporary sibling used for atomic writes, e.g. `out.pdf` -> `.out.pdf.tmp`.
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.tmp"))
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let to_error = |e| ToolkitError::FailedToWrite {
        path: path.to_path_buf(),
        source: e,
    };

    let file = std::fs::File::create(path).map_err(to_error)?;
    let mut writer = std::io::BufWriter::new(file);
    writer.write_all(bytes).map_err(to_error)?;
    writer.flush().map_err(to_error)?;
    Ok(())
}
