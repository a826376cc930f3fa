//! Page count and metadata queries against real PDF files.

use tempfile::TempDir;

use crate::common::{create_test_pdf, create_test_pdf_with_title, toolkit};

#[tokio::test]
async fn test_count_pages() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("doc.pdf");
    create_test_pdf(&path, 12, 1);

    assert_eq!(toolkit().count(&path).await.unwrap(), 12);
}

#[tokio::test]
async fn test_info_reads_title() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("doc.pdf");
    create_test_pdf_with_title(&path, 2, 1, Some("Field Notes"));

    let report = toolkit().info(&path).await.unwrap();
    assert_eq!(report.pages, 2);
    assert_eq!(report.metadata.title.as_deref(), Some("Field Notes"));
    assert_eq!(report.file_size, std::fs::metadata(&path).unwrap().len());
}

#[tokio::test]
async fn test_merged_output_names_producer() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.pdf");
    let b = dir.path().join("b.pdf");
    create_test_pdf(&a, 1, 1);
    create_test_pdf(&b, 1, 2);
    let output = dir.path().join("out.pdf");

    let toolkit = toolkit();
    toolkit
        .merge(&pdftoolkit::config::MergeConfig {
            inputs: vec![a, b],
            output: output.clone(),
            overwrite: false,
            bookmarks: pdftoolkit::config::BookmarkMode::None,
            dry_run: false,
        })
        .await
        .unwrap();

    let report = toolkit.info(&output).await.unwrap();
    assert!(
        report
            .metadata
            .producer
            .unwrap_or_default()
            .starts_with(pdftoolkit::NAME)
    );
}
