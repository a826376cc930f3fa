//! Path validation.
//!
//! Every input and output path goes through [`PathValidator`] before a
//! document is opened or a byte is written:
//! - Inputs must exist, be regular files and carry a `.pdf` extension
//! - Outputs must not exist unless overwriting was requested; their parent
//!   directories are created on demand
//! - Directories given to `merge-dir` are scanned for PDF files
//!
//! # Examples
//!
//! ```no_run
//! use pdftoolkit::validation::PathValidator;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let validator = PathValidator::new();
//! let input = validator.validate_input(Path::new("report.pdf")).await?;
//! let output = validator.validate_output(Path::new("out/report.pdf"), false).await?;
//! println!("{} -> {}", input.path().display(), output.path().display());
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::task;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Result, ToolkitError};
use crate::utils::has_pdf_extension;

/// A path that passed validation, with the overwrite policy it was checked
/// under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedPath {
    path: PathBuf,
    overwrite: bool,
}

impl ValidatedPath {
    /// The validated path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether an existing file at this path may be replaced.
    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    /// Take the path out.
    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

impl AsRef<Path> for ValidatedPath {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Validator for input and output paths.
#[derive(Debug, Clone, Default)]
pub struct PathValidator;

impl PathValidator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self
    }

    /// Validate an input document path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the path does not exist (`NotFound`)
    /// - the path is a directory (`NotAFile`)
    /// - the extension is not `.pdf` (`InvalidFormat`)
    pub async fn validate_input(&self, path: &Path) -> Result<ValidatedPath> {
        let metadata = match tokio::fs::metadata(path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ToolkitError::not_found(path));
            }
            Err(e) => return Err(e.into()),
        };

        if !metadata.is_file() {
            return Err(ToolkitError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        if !has_pdf_extension(path) {
            return Err(ToolkitError::InvalidFormat {
                path: path.to_path_buf(),
            });
        }

        Ok(ValidatedPath {
            path: path.to_path_buf(),
            overwrite: false,
        })
    }

    /// Validate several inputs, stopping at the first failure.
    pub async fn validate_inputs(&self, paths: &[PathBuf]) -> Result<Vec<ValidatedPath>> {
        let mut validated = Vec::with_capacity(paths.len());
        for path in paths {
            validated.push(self.validate_input(path).await?);
        }
        Ok(validated)
    }

    /// Check an output path without modifying the filesystem.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if the path exists and `overwrite` is false.
    pub async fn check_output(&self, path: &Path, overwrite: bool) -> Result<ValidatedPath> {
        if !overwrite && tokio::fs::try_exists(path).await? {
            return Err(ToolkitError::already_exists(path));
        }

        Ok(ValidatedPath {
            path: path.to_path_buf(),
            overwrite,
        })
    }

    /// Validate an output path.
    ///
    /// Creating the parent directory is the only side effect.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if the path exists and `overwrite` is false,
    /// or an I/O error if the parent directory cannot be created.
    pub async fn validate_output(&self, path: &Path, overwrite: bool) -> Result<ValidatedPath> {
        let validated = self.check_output(path, overwrite).await?;
        ensure_parent(path).await?;
        Ok(validated)
    }

    /// Check every output of a multi-file operation without modifying the
    /// filesystem.
    ///
    /// # Errors
    ///
    /// Fails like [`check_output`](Self::check_output), and with
    /// `InvalidArgument` if two outputs share a path.
    pub async fn check_outputs(
        &self,
        paths: &[PathBuf],
        overwrite: bool,
    ) -> Result<Vec<ValidatedPath>> {
        let mut seen = HashSet::new();
        if let Some(duplicate) = paths.iter().find(|path| !seen.insert(*path)) {
            return Err(ToolkitError::invalid_argument(format!(
                "Output pattern produces the same file more than once: {}",
                duplicate.display()
            )));
        }

        let mut validated = Vec::with_capacity(paths.len());
        for path in paths {
            validated.push(self.check_output(path, overwrite).await?);
        }
        Ok(validated)
    }

    /// Validate every output of a multi-file operation before any of them
    /// is written. Directories are only created once all checks passed.
    ///
    /// # Errors
    ///
    /// Fails like [`check_outputs`](Self::check_outputs), or with an I/O
    /// error if a parent directory cannot be created.
    pub async fn validate_outputs(
        &self,
        paths: &[PathBuf],
        overwrite: bool,
    ) -> Result<Vec<ValidatedPath>> {
        let validated = self.check_outputs(paths, overwrite).await?;
        for path in paths {
            ensure_parent(path).await?;
        }
        Ok(validated)
    }

    /// Validate a directory path.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if it does not exist or `NotADirectory` if it is a
    /// file.
    pub async fn validate_directory(&self, path: &Path) -> Result<ValidatedPath> {
        let metadata = match tokio::fs::metadata(path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ToolkitError::not_found(path));
            }
            Err(e) => return Err(e.into()),
        };

        if !metadata.is_dir() {
            return Err(ToolkitError::NotADirectory {
                path: path.to_path_buf(),
            });
        }

        Ok(ValidatedPath {
            path: path.to_path_buf(),
            overwrite: false,
        })
    }

    /// Collect the PDF files of a directory, sorted by path.
    ///
    /// With `recursive`, subdirectories are searched as well.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory is invalid or cannot be read.
    pub async fn collect_pdf_files(&self, dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
        self.validate_directory(dir).await?;

        let root = dir.to_path_buf();
        let files = task::spawn_blocking(move || {
            let max_depth = if recursive { usize::MAX } else { 1 };
            let mut files = Vec::new();
            for entry in WalkDir::new(&root).min_depth(1).max_depth(max_depth) {
                let entry = entry.map_err(|e| {
                    std::io::Error::other(format!("failed to scan {}: {e}", root.display()))
                })?;
                if entry.file_type().is_file() && has_pdf_extension(entry.path()) {
                    files.push(entry.into_path());
                }
            }
            files.sort();
            Ok::<_, std::io::Error>(files)
        })
        .await
        .map_err(|e| std::io::Error::other(format!("directory scan failed: {e}")))??;

        debug!(dir = %dir.display(), recursive, count = files.len(), "Collected PDF files");
        Ok(files)
    }
}

async fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, b"%PDF-1.5").unwrap();
    }

    #[tokio::test]
    async fn test_validate_input_ok() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Doc.PDF");
        touch(&path);

        let validated = PathValidator::new().validate_input(&path).await.unwrap();
        assert_eq!(validated.path(), path);
        assert!(!validated.overwrite());
    }

    #[tokio::test]
    async fn test_validate_input_missing() {
        let dir = TempDir::new().unwrap();
        let err = PathValidator::new()
            .validate_input(&dir.path().join("nope.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolkitError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_validate_input_wrong_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        touch(&path);

        let err = PathValidator::new().validate_input(&path).await.unwrap_err();
        assert!(matches!(err, ToolkitError::InvalidFormat { .. }));
    }

    #[tokio::test]
    async fn test_validate_input_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("folder.pdf");
        std::fs::create_dir(&path).unwrap();

        let err = PathValidator::new().validate_input(&path).await.unwrap_err();
        assert!(matches!(err, ToolkitError::NotAFile { .. }));
    }

    #[tokio::test]
    async fn test_validate_output_existing_without_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.pdf");
        touch(&path);

        let err = PathValidator::new()
            .validate_output(&path, false)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolkitError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_validate_output_existing_with_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.pdf");
        touch(&path);

        let validated = PathValidator::new().validate_output(&path, true).await.unwrap();
        assert!(validated.overwrite());
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.5");
    }

    #[tokio::test]
    async fn test_validate_output_creates_parent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("out.pdf");

        PathValidator::new().validate_output(&path, false).await.unwrap();
        assert!(path.parent().unwrap().is_dir());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_check_output_does_not_create_parent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("out.pdf");

        PathValidator::new().check_output(&path, false).await.unwrap();
        assert!(!path.parent().unwrap().exists());
    }

    #[tokio::test]
    async fn test_validate_output_relative_bare_name() {
        let validated = PathValidator::new()
            .validate_output(Path::new("surely-not-existing-output-7f3a.pdf"), false)
            .await
            .unwrap();
        assert_eq!(validated.path(), Path::new("surely-not-existing-output-7f3a.pdf"));
    }

    #[tokio::test]
    async fn test_validate_outputs_rejects_duplicates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("same.pdf");

        let err = PathValidator::new()
            .validate_outputs(&[path.clone(), path], false)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolkitError::InvalidArgument { .. }));
    }

    #[tokio::test]
    async fn test_validate_outputs_stops_on_existing() {
        let dir = TempDir::new().unwrap();
        let existing = dir.path().join("b.pdf");
        touch(&existing);

        let paths = vec![dir.path().join("a.pdf"), existing];
        let err = PathValidator::new()
            .validate_outputs(&paths, false)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolkitError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_validate_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file.pdf");
        touch(&file);

        let validator = PathValidator::new();
        assert!(validator.validate_directory(dir.path()).await.is_ok());
        assert!(matches!(
            validator.validate_directory(&file).await.unwrap_err(),
            ToolkitError::NotADirectory { .. }
        ));
        assert!(matches!(
            validator
                .validate_directory(&dir.path().join("missing"))
                .await
                .unwrap_err(),
            ToolkitError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_collect_pdf_files_sorted() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("b.pdf"));
        touch(&dir.path().join("a.PDF"));
        touch(&dir.path().join("notes.txt"));
        touch(&dir.path().join("sub").join("c.pdf"));

        let validator = PathValidator::new();

        let flat = validator.collect_pdf_files(dir.path(), false).await.unwrap();
        assert_eq!(flat, vec![dir.path().join("a.PDF"), dir.path().join("b.pdf")]);

        let deep = validator.collect_pdf_files(dir.path(), true).await.unwrap();
        assert_eq!(
            deep,
            vec![
                dir.path().join("a.PDF"),
                dir.path().join("b.pdf"),
                dir.path().join("sub").join("c.pdf"),
            ]
        );
    }

    #[tokio::test]
    async fn test_collect_pdf_files_empty() {
        let dir = TempDir::new().unwrap();
        let files = PathValidator::new()
            .collect_pdf_files(dir.path(), true)
            .await
            .unwrap();
        assert!(files.is_empty());
    }
}
