//! End-to-end split tests against real PDF files.

use pdftoolkit::config::{OutputPattern, SplitConfig};
use pdftoolkit::plan::SplitMode;
use tempfile::TempDir;

use crate::common::{create_test_pdf, page_tag, page_tags, toolkit};

#[tokio::test]
async fn test_split_fixed_size() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("report.pdf");
    create_test_pdf(&input, 7, 1);

    let report = toolkit()
        .split(&SplitConfig::new(&input, SplitMode::FixedSize(3)))
        .await
        .unwrap();

    assert_eq!(report.outputs.len(), 3);
    assert_eq!(
        page_tags(&dir.path().join("report_part1.pdf")),
        vec![page_tag(1, 1), page_tag(1, 2), page_tag(1, 3)]
    );
    assert_eq!(
        page_tags(&dir.path().join("report_part3.pdf")),
        vec![page_tag(1, 7)]
    );
}

#[tokio::test]
async fn test_split_at_pages() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("report.pdf");
    create_test_pdf(&input, 6, 2);

    toolkit()
        .split(&SplitConfig::new(&input, SplitMode::AtPoints(vec![3])))
        .await
        .unwrap();

    assert_eq!(
        page_tags(&dir.path().join("report_part1.pdf")),
        vec![page_tag(2, 1), page_tag(2, 2)]
    );
    assert_eq!(page_tags(&dir.path().join("report_part2.pdf")).len(), 4);
}

#[tokio::test]
async fn test_split_single_pages_custom_pattern() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("scan.pdf");
    create_test_pdf(&input, 3, 3);
    let out = dir.path().join("pages");

    let mut config = SplitConfig::new(&input, SplitMode::SinglePages);
    config.output_dir = Some(out.clone());
    config.pattern = OutputPattern::parse("{base}-{num:02}.pdf").unwrap();
    let report = toolkit().split(&config).await.unwrap();

    assert_eq!(report.outputs.len(), 3);
    for n in 1..=3 {
        let path = out.join(format!("scan-{n:02}.pdf"));
        assert_eq!(page_tags(&path), vec![page_tag(3, n)]);
    }
}
