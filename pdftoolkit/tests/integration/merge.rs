//! End-to-end merge and extract tests against real PDF files.

use pdftoolkit::config::{BookmarkMode, ExtractConfig, MergeConfig, MergeDirConfig};
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::{create_test_pdf, outline_titles, page_tag, page_tags, toolkit};

fn merge_config(inputs: Vec<PathBuf>, output: PathBuf) -> MergeConfig {
    MergeConfig {
        inputs,
        output,
        overwrite: false,
        bookmarks: BookmarkMode::None,
        dry_run: false,
    }
}

#[tokio::test]
async fn test_merge_preserves_page_order() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.pdf");
    let b = dir.path().join("b.pdf");
    create_test_pdf(&a, 2, 1);
    create_test_pdf(&b, 3, 2);
    let output = dir.path().join("merged.pdf");

    let report = toolkit()
        .merge(&merge_config(vec![b.clone(), a.clone()], output.clone()))
        .await
        .unwrap();

    assert_eq!(report.total_pages, 5);
    assert_eq!(
        page_tags(&output),
        vec![
            page_tag(2, 1),
            page_tag(2, 2),
            page_tag(2, 3),
            page_tag(1, 1),
            page_tag(1, 2)
        ]
    );
    assert!(outline_titles(&output).is_empty());
}

#[tokio::test]
async fn test_merge_same_file_twice() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.pdf");
    create_test_pdf(&a, 2, 3);
    let output = dir.path().join("twice.pdf");

    toolkit()
        .merge(&merge_config(vec![a.clone(), a], output.clone()))
        .await
        .unwrap();

    assert_eq!(page_tags(&output).len(), 4);
}

#[tokio::test]
async fn test_merge_bookmarks_from_file_names() {
    let dir = TempDir::new().unwrap();
    let intro = dir.path().join("intro.pdf");
    let body = dir.path().join("body.pdf");
    create_test_pdf(&intro, 1, 1);
    create_test_pdf(&body, 2, 2);
    let output = dir.path().join("book.pdf");

    let mut config = merge_config(vec![intro, body], output.clone());
    config.bookmarks = BookmarkMode::FileNames;
    let report = toolkit().merge(&config).await.unwrap();

    assert_eq!(report.bookmarks.len(), 2);
    assert_eq!(report.bookmarks[1].output_index, 1);
    assert_eq!(outline_titles(&output), vec!["intro", "body"]);
}

#[tokio::test]
async fn test_merge_explicit_titles() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.pdf");
    let b = dir.path().join("b.pdf");
    create_test_pdf(&a, 1, 1);
    create_test_pdf(&b, 1, 2);
    let output = dir.path().join("titled.pdf");

    let mut config = merge_config(vec![a, b], output.clone());
    config.bookmarks = BookmarkMode::Titles(vec!["Chapter 1".into(), "Chapter 2".into()]);
    toolkit().merge(&config).await.unwrap();

    assert_eq!(outline_titles(&output), vec!["Chapter 1", "Chapter 2"]);
}

#[tokio::test]
async fn test_merge_directory() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("chapters");
    std::fs::create_dir(&input).unwrap();
    create_test_pdf(&input.join("02.pdf"), 1, 2);
    create_test_pdf(&input.join("01.pdf"), 1, 1);
    std::fs::write(input.join("notes.txt"), b"not a pdf").unwrap();
    let output = dir.path().join("all.pdf");

    let report = toolkit()
        .merge_directory(&MergeDirConfig {
            directory: input,
            output: output.clone(),
            recursive: false,
            overwrite: false,
            bookmarks: BookmarkMode::None,
            dry_run: false,
        })
        .await
        .unwrap();

    assert_eq!(report.inputs.len(), 2);
    assert_eq!(page_tags(&output), vec![page_tag(1, 1), page_tag(2, 1)]);
}

#[tokio::test]
async fn test_merge_dry_run_leaves_no_file() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.pdf");
    let b = dir.path().join("b.pdf");
    create_test_pdf(&a, 2, 1);
    create_test_pdf(&b, 2, 2);
    let output = dir.path().join("merged.pdf");

    let mut config = merge_config(vec![a, b], output.clone());
    config.dry_run = true;
    let report = toolkit().merge(&config).await.unwrap();

    assert_eq!(report.total_pages, 4);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_extract_pages() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("doc.pdf");
    create_test_pdf(&input, 10, 4);
    let output = dir.path().join("picked.pdf");

    toolkit()
        .extract(&ExtractConfig {
            input,
            pages: "9-10,2".into(),
            output: output.clone(),
            overwrite: false,
        })
        .await
        .unwrap();

    assert_eq!(
        page_tags(&output),
        vec![page_tag(4, 2), page_tag(4, 9), page_tag(4, 10)]
    );
}
