//! Split operations.

use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

use super::Toolkit;
use crate::config::SplitConfig;
use crate::error::{Result, ToolkitError};
use crate::io::PdfBackend;
use crate::plan::{SplitPart, SplitPlan};
use crate::utils::base_name;

/// One file produced (or planned) by a split.
#[derive(Debug, Clone, Serialize)]
pub struct SplitOutput {
    /// Output path.
    pub path: PathBuf,
    /// Pages of the source document in this file.
    pub part: SplitPart,
    /// Bytes written, `None` for a dry run.
    pub bytes_written: Option<u64>,
}

/// Result of a split.
#[derive(Debug, Clone, Serialize)]
pub struct SplitReport {
    /// Source document.
    pub input: PathBuf,
    /// Outputs in part order.
    pub outputs: Vec<SplitOutput>,
    /// Planned parts without pages, which produce no file.
    pub skipped: Vec<SplitPart>,
    /// Whether nothing was written.
    pub dry_run: bool,
}

impl<B: PdfBackend> Toolkit<B> {
    /// Split one document into several according to `config.mode`.
    ///
    /// Output names come from `config.pattern`, rendered with the input's
    /// base name and each part's sequence number, and land in
    /// `config.output_dir` (the input's directory by default). Every target
    /// is validated before the first file is written. Parts are written one
    /// after another, so a failure midway leaves the earlier files in place.
    ///
    /// # Errors
    ///
    /// - Path errors from validation
    /// - `InvalidArgument` / `NoSplitPoints` / `InvalidRange` from planning
    /// - `InvalidArgument` if the pattern cannot tell the outputs apart or
    ///   would overwrite the input
    /// - `AlreadyExists` if any target exists and `overwrite` is off
    /// - Backend and write errors
    pub async fn split(&self, config: &SplitConfig) -> Result<SplitReport> {
        let input = self.validator.validate_input(&config.input).await?;
        let document = self.backend.open(input.path())?;
        let plan = SplitPlan::build(&config.mode, self.backend.page_count(&document))?;

        let (parts, skipped): (Vec<SplitPart>, Vec<SplitPart>) =
            plan.parts().iter().partition(|part| !part.is_empty());
        for part in &skipped {
            warn!(part = part.number, "Skipping split part without pages");
        }

        if parts.is_empty() {
            return Err(ToolkitError::invalid_argument(format!(
                "Nothing to split: {} contains no pages",
                input.path().display()
            )));
        }
        if parts.len() > 1 && !config.pattern.has_sequence() {
            return Err(ToolkitError::invalid_argument(format!(
                "Output pattern '{}' must contain {{num}} to name {} files",
                config.pattern,
                parts.len()
            )));
        }

        let directory = match &config.output_dir {
            Some(dir) => dir.clone(),
            None => input.path().parent().map(PathBuf::from).unwrap_or_default(),
        };
        let base = base_name(input.path());
        let targets: Vec<PathBuf> = parts
            .iter()
            .map(|part| directory.join(config.pattern.render(&base, part.number)))
            .collect();

        if let Some(target) = targets.iter().find(|target| *target == input.path()) {
            return Err(ToolkitError::invalid_argument(format!(
                "Output file cannot be the same as the input file: {}",
                target.display()
            )));
        }

        if config.dry_run {
            self.validator
                .check_outputs(&targets, config.overwrite)
                .await?;
            return Ok(SplitReport {
                input: input.into_path(),
                outputs: targets
                    .into_iter()
                    .zip(parts)
                    .map(|(path, part)| SplitOutput {
                        path,
                        part,
                        bytes_written: None,
                    })
                    .collect(),
                skipped,
                dry_run: true,
            });
        }

        let targets = self
            .validator
            .validate_outputs(&targets, config.overwrite)
            .await?;

        let mut outputs = Vec::with_capacity(parts.len());
        for (target, part) in targets.into_iter().zip(parts) {
            let message = format!("Writing part {}", part.number);
            let bytes = self.assemble_pages(&document, part.pages(), &message)?;
            let stats = self.writer.write(&bytes, target.path()).await?;
            outputs.push(SplitOutput {
                path: target.into_path(),
                part,
                bytes_written: Some(stats.file_size),
            });
        }

        info!(
            input = %input.path().display(),
            files = outputs.len(),
            pages = plan.total_pages(),
            "Split PDF file"
        );
        Ok(SplitReport {
            input: input.into_path(),
            outputs,
            skipped,
            dry_run: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputPattern;
    use crate::io::MemoryBackend;
    use crate::io::memory::Transcript;
    use crate::output::OutputFormatter;
    use crate::plan::SplitMode;
    use std::path::Path;
    use tempfile::TempDir;

    fn fixture(dir: &TempDir, name: &str, pages: usize) -> (Toolkit<MemoryBackend>, PathBuf) {
        let path = dir.path().join(name);
        std::fs::write(&path, b"").unwrap();
        let backend = MemoryBackend::new();
        backend.register_pages(&path, pages);
        let toolkit = Toolkit::new(backend, OutputFormatter::quiet()).with_progress(false);
        (toolkit, path)
    }

    fn pages_of(path: &Path) -> Vec<String> {
        Transcript::from_bytes(&std::fs::read(path).unwrap())
            .unwrap()
            .pages
    }

    fn label(path: &Path, page: usize) -> String {
        format!("{}#{page}", path.display())
    }

    #[tokio::test]
    async fn test_split_fixed_size() {
        let dir = TempDir::new().unwrap();
        let (toolkit, input) = fixture(&dir, "doc.pdf", 23);

        let report = toolkit
            .split(&SplitConfig::new(&input, SplitMode::FixedSize(10)))
            .await
            .unwrap();

        let names: Vec<_> = report
            .outputs
            .iter()
            .map(|o| o.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["doc_part1.pdf", "doc_part2.pdf", "doc_part3.pdf"]);
        assert_eq!(pages_of(&report.outputs[0].path).len(), 10);
        assert_eq!(
            pages_of(&report.outputs[2].path),
            vec![label(&input, 21), label(&input, 22), label(&input, 23)]
        );
    }

    #[tokio::test]
    async fn test_split_at_points() {
        let dir = TempDir::new().unwrap();
        let (toolkit, input) = fixture(&dir, "doc.pdf", 20);

        let report = toolkit
            .split(&SplitConfig::new(&input, SplitMode::AtPoints(vec![15, 5, 10])))
            .await
            .unwrap();

        let spans: Vec<_> = report.outputs.iter().map(|o| o.part.pages()).collect();
        assert_eq!(spans, vec![0..4, 4..9, 9..14, 14..20]);
        assert_eq!(pages_of(&report.outputs[1].path)[0], label(&input, 5));
    }

    #[tokio::test]
    async fn test_split_point_one_skips_empty_part() {
        let dir = TempDir::new().unwrap();
        let (toolkit, input) = fixture(&dir, "doc.pdf", 4);

        let report = toolkit
            .split(&SplitConfig::new(&input, SplitMode::AtPoints(vec![1, 3])))
            .await
            .unwrap();

        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].number, 1);
        assert_eq!(report.outputs.len(), 2);
        assert!(!dir.path().join("doc_part1.pdf").exists());
        assert_eq!(pages_of(&dir.path().join("doc_part2.pdf")).len(), 2);
    }

    #[tokio::test]
    async fn test_split_single_pages_into_output_dir() {
        let dir = TempDir::new().unwrap();
        let (toolkit, input) = fixture(&dir, "doc.pdf", 3);
        let out = dir.path().join("pages");

        let mut config = SplitConfig::new(&input, SplitMode::SinglePages);
        config.output_dir = Some(out.clone());
        config.pattern = OutputPattern::parse("p{num:03}.pdf").unwrap();
        toolkit.split(&config).await.unwrap();

        assert_eq!(pages_of(&out.join("p001.pdf")), vec![label(&input, 1)]);
        assert_eq!(pages_of(&out.join("p003.pdf")), vec![label(&input, 3)]);
    }

    #[tokio::test]
    async fn test_split_existing_target_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let (toolkit, input) = fixture(&dir, "doc.pdf", 6);
        std::fs::write(dir.path().join("doc_part2.pdf"), b"keep").unwrap();

        let err = toolkit
            .split(&SplitConfig::new(&input, SplitMode::FixedSize(2)))
            .await
            .unwrap_err();

        assert!(matches!(err, ToolkitError::AlreadyExists { .. }));
        assert!(!dir.path().join("doc_part1.pdf").exists());
        assert_eq!(std::fs::read(dir.path().join("doc_part2.pdf")).unwrap(), b"keep");
    }

    #[tokio::test]
    async fn test_split_pattern_without_number() {
        let dir = TempDir::new().unwrap();
        let (toolkit, input) = fixture(&dir, "doc.pdf", 4);

        let mut config = SplitConfig::new(&input, SplitMode::FixedSize(2));
        config.pattern = OutputPattern::parse("{base}_copy.pdf").unwrap();
        let err = toolkit.split(&config).await.unwrap_err();
        assert!(matches!(err, ToolkitError::InvalidArgument { .. }));
    }

    #[tokio::test]
    async fn test_split_pattern_naming_the_input() {
        let dir = TempDir::new().unwrap();
        let (toolkit, input) = fixture(&dir, "doc.pdf", 4);

        let mut config = SplitConfig::new(&input, SplitMode::FixedSize(10));
        config.pattern = OutputPattern::parse("{base}.pdf").unwrap();
        let err = toolkit.split(&config).await.unwrap_err();
        assert!(matches!(err, ToolkitError::InvalidArgument { .. }));
    }

    #[tokio::test]
    async fn test_split_dry_run() {
        let dir = TempDir::new().unwrap();
        let (toolkit, input) = fixture(&dir, "doc.pdf", 5);

        let mut config = SplitConfig::new(&input, SplitMode::FixedSize(2));
        config.dry_run = true;
        let report = toolkit.split(&config).await.unwrap();

        assert!(report.dry_run);
        assert_eq!(report.outputs.len(), 3);
        assert!(report.outputs.iter().all(|o| o.bytes_written.is_none()));
        assert!(report.outputs.iter().all(|o| !o.path.exists()));
    }

    #[tokio::test]
    async fn test_split_invalid_point() {
        let dir = TempDir::new().unwrap();
        let (toolkit, input) = fixture(&dir, "doc.pdf", 5);

        let err = toolkit
            .split(&SplitConfig::new(&input, SplitMode::AtPoints(vec![6])))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolkitError::InvalidRange { total_pages: 5, .. }));
    }

    #[tokio::test]
    async fn test_split_empty_document() {
        let dir = TempDir::new().unwrap();
        let (toolkit, input) = fixture(&dir, "empty.pdf", 0);

        let err = toolkit
            .split(&SplitConfig::new(&input, SplitMode::SinglePages))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolkitError::InvalidArgument { .. }));
    }
}
