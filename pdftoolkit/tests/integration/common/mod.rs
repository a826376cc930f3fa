//! Helpers for building and inspecting real PDF files.

use lopdf::{Document, Object, Stream, dictionary};
use pdftoolkit::Toolkit;
use pdftoolkit::io::LopdfBackend;
use pdftoolkit::output::OutputFormatter;
use std::path::Path;

/// A toolkit backed by lopdf that prints nothing.
pub fn toolkit() -> Toolkit<LopdfBackend> {
    Toolkit::new(LopdfBackend::new(), OutputFormatter::quiet()).with_progress(false)
}

/// Width that tags page `page` (1-based) of the document tagged `tag`.
pub fn page_tag(tag: i64, page: i64) -> i64 {
    tag * 100 + page
}

/// Write a PDF with `pages` pages to `path`.
///
/// Every page gets a MediaBox width of [`page_tag`]`(tag, n)` so that
/// tests can tell pages apart after they have been copied around.
pub fn create_test_pdf(path: &Path, pages: usize, tag: i64) {
    create_test_pdf_with_title(path, pages, tag, None);
}

/// Like [`create_test_pdf`], with an optional document title.
pub fn create_test_pdf_with_title(path: &Path, pages: usize, tag: i64, title: Option<&str>) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for n in 1..=pages as i64 {
        let content = format!("BT /F1 24 Tf 72 700 Td (Document {tag} page {n}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), page_tag(tag, n).into(), 792.into()],
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
            "Resources" => resources_id,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    if let Some(title) = title {
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(title),
        });
        doc.trailer.set("Info", info_id);
    }

    doc.save(path).expect("failed to write test PDF");
}

/// MediaBox widths of every page of the PDF at `path`, in page order.
pub fn page_tags(path: &Path) -> Vec<i64> {
    let doc = Document::load(path).expect("failed to load output PDF");
    doc.get_pages()
        .values()
        .map(|&id| {
            let page = doc.get_dictionary(id).unwrap();
            let media_box = page.get(b"MediaBox").unwrap();
            let media_box = match media_box {
                Object::Reference(id) => doc.get_object(*id).unwrap(),
                other => other,
            };
            media_box.as_array().unwrap()[2].as_i64().unwrap()
        })
        .collect()
}

/// Top-level outline titles of the PDF at `path`, in order.
pub fn outline_titles(path: &Path) -> Vec<String> {
    let doc = Document::load(path).expect("failed to load output PDF");
    let catalog = doc.catalog().unwrap();
    let Ok(outlines) = catalog.get(b"Outlines") else {
        return Vec::new();
    };
    let outlines = doc
        .get_dictionary(outlines.as_reference().unwrap())
        .unwrap();

    let mut titles = Vec::new();
    let mut next = outlines.get(b"First").ok().cloned();
    while let Some(Object::Reference(id)) = next {
        let item = doc.get_dictionary(id).unwrap();
        let title = item.get(b"Title").unwrap().as_str().unwrap();
        titles.push(String::from_utf8_lossy(title).into_owned());
        next = item.get(b"Next").ok().cloned();
    }
    titles
}
