//! Failure modes that must leave the filesystem untouched.

use pdftoolkit::ToolkitError;
use pdftoolkit::config::{BookmarkMode, ExtractConfig, MergeConfig, SplitConfig};
use pdftoolkit::plan::SplitMode;
use tempfile::TempDir;

use crate::common::{create_test_pdf, toolkit};

#[tokio::test]
async fn test_merge_corrupt_input() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.pdf");
    let bad = dir.path().join("bad.pdf");
    create_test_pdf(&good, 1, 1);
    std::fs::write(&bad, b"this is not a pdf").unwrap();
    let output = dir.path().join("out.pdf");

    let err = toolkit()
        .merge(&MergeConfig {
            inputs: vec![good, bad],
            output: output.clone(),
            overwrite: false,
            bookmarks: BookmarkMode::None,
            dry_run: false,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ToolkitError::FailedToLoadPdf { .. }));
    assert_eq!(err.exit_code(), 3);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_merge_output_is_input() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.pdf");
    let b = dir.path().join("b.pdf");
    create_test_pdf(&a, 1, 1);
    create_test_pdf(&b, 1, 2);

    let err = toolkit()
        .merge(&MergeConfig {
            inputs: vec![a.clone(), b],
            output: a,
            overwrite: true,
            bookmarks: BookmarkMode::None,
            dry_run: false,
        })
        .await
        .unwrap_err();
    assert!(err.is_usage_error());
}

#[tokio::test]
async fn test_split_size_zero() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("doc.pdf");
    create_test_pdf(&input, 3, 1);

    let err = toolkit()
        .split(&SplitConfig::new(&input, SplitMode::FixedSize(0)))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolkitError::InvalidArgument { .. }));
    assert!(!dir.path().join("doc_part1.pdf").exists());
}

#[tokio::test]
async fn test_split_without_points() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("doc.pdf");
    create_test_pdf(&input, 3, 1);

    let err = toolkit()
        .split(&SplitConfig::new(&input, SplitMode::AtPoints(Vec::new())))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolkitError::NoSplitPoints));
}

#[tokio::test]
async fn test_extract_bad_token() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("doc.pdf");
    create_test_pdf(&input, 3, 1);
    let output = dir.path().join("out.pdf");

    let err = toolkit()
        .extract(&ExtractConfig {
            input,
            pages: "1,a".into(),
            output: output.clone(),
            overwrite: false,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ToolkitError::InvalidToken { .. }));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_missing_input() {
    let dir = TempDir::new().unwrap();
    let err = toolkit()
        .count(&dir.path().join("missing.pdf"))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolkitError::NotFound { .. }));
    assert_eq!(err.exit_code(), 2);
}
