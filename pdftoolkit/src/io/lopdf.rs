//! `lopdf`-backed [`PdfBackend`].
//!
//! Pages are copied between documents by cloning the page dictionary and
//! every object reachable from it into the output document under fresh
//! object ids. Attributes a page inherits from its page tree (`Resources`,
//! `MediaBox`, `CropBox`, `Rotate`) are written onto the page itself first,
//! since the source tree does not come along.

use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat, dictionary};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use super::{DocumentMetadata, PdfBackend};
use crate::error::{Result, ToolkitError};

/// Page attributes that may be inherited from ancestor `Pages` nodes.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic `Parent` chains in malformed files.
const MAX_TREE_DEPTH: usize = 64;

static NEXT_SOURCE_ID: AtomicU64 = AtomicU64::new(0);

/// A document opened with lopdf.
#[derive(Debug)]
pub struct LopdfDocument {
    document: Document,
    pages: Vec<ObjectId>,
    source_id: u64,
}

impl LopdfDocument {
    /// Wrap an already parsed document.
    pub fn from_document(document: Document) -> Self {
        let pages = document.get_pages().into_values().collect();
        Self {
            document,
            pages,
            source_id: NEXT_SOURCE_ID.fetch_add(1, Ordering::Relaxed),
        }
    }
}

/// A page of a [`LopdfDocument`].
#[derive(Debug, Clone, Copy)]
pub struct LopdfPage<'a> {
    document: &'a LopdfDocument,
    id: ObjectId,
}

impl LopdfPage<'_> {
    /// Object id of the page inside its source document.
    pub fn id(&self) -> ObjectId {
        self.id
    }
}

/// Output document under construction.
#[derive(Debug)]
pub struct LopdfWriter {
    document: Document,
    pages_id: ObjectId,
    kids: Vec<ObjectId>,
    /// `(source document, source object)` to object id in `document`.
    imported: HashMap<(u64, ObjectId), ObjectId>,
    bookmarks: Vec<(String, usize)>,
}

impl LopdfWriter {
    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.kids.len()
    }
}

/// Backend built on the `lopdf` crate.
#[derive(Debug, Clone)]
pub struct LopdfBackend {
    producer: String,
}

impl LopdfBackend {
    /// Create a backend that stamps outputs with this library as producer.
    pub fn new() -> Self {
        Self {
            producer: format!("{} {}", crate::NAME, crate::VERSION),
        }
    }
}

impl Default for LopdfBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfBackend for LopdfBackend {
    type Document = LopdfDocument;
    type Page<'a>
        = LopdfPage<'a>
    where
        Self: 'a;
    type Writer = LopdfWriter;

    fn open(&self, path: &Path) -> Result<LopdfDocument> {
        let document = Document::load(path)
            .map_err(|e| ToolkitError::failed_to_load_pdf(path, e.to_string()))?;
        let document = LopdfDocument::from_document(document);
        debug!(path = %path.display(), pages = document.pages.len(), "Loaded PDF");
        Ok(document)
    }

    fn page_count(&self, document: &LopdfDocument) -> usize {
        document.pages.len()
    }

    fn metadata(&self, document: &LopdfDocument) -> DocumentMetadata {
        let doc = &document.document;
        let Some(info) = info_dictionary(doc) else {
            return DocumentMetadata::default();
        };

        DocumentMetadata {
            title: text_field(doc, info, b"Title"),
            author: text_field(doc, info, b"Author"),
            subject: text_field(doc, info, b"Subject"),
            keywords: text_field(doc, info, b"Keywords"),
            creator: text_field(doc, info, b"Creator"),
            producer: text_field(doc, info, b"Producer"),
        }
    }

    fn get_page<'a>(&'a self, document: &'a LopdfDocument, index: usize) -> Result<LopdfPage<'a>> {
        let id = document
            .pages
            .get(index)
            .copied()
            .ok_or(ToolkitError::PageOutOfBounds {
                index,
                page_count: document.pages.len(),
            })?;
        Ok(LopdfPage { document, id })
    }

    fn new_writer(&self) -> LopdfWriter {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();
        LopdfWriter {
            document,
            pages_id,
            kids: Vec::new(),
            imported: HashMap::new(),
            bookmarks: Vec::new(),
        }
    }

    fn add_page(&self, writer: &mut LopdfWriter, page: LopdfPage<'_>) -> Result<()> {
        let source = page.document;
        let mut dict = source.document.get_dictionary(page.id)?.clone();

        for key in INHERITABLE_KEYS {
            if !dict.has(key)
                && let Some(value) = inherited_attribute(&source.document, &dict, key)
            {
                dict.set(key, value);
            }
        }
        dict.remove(b"Parent");

        // Registered up front so annotations pointing back at the page
        // resolve to the copy.
        let page_id = writer.document.new_object_id();
        writer.imported.insert((source.source_id, page.id), page_id);

        let mut object = Object::Dictionary(dict);
        import_object(writer, source, &mut object);
        if let Object::Dictionary(dict) = &mut object {
            dict.set("Parent", writer.pages_id);
        }

        writer.document.objects.insert(page_id, object);
        writer.kids.push(page_id);
        Ok(())
    }

    fn add_bookmark(&self, writer: &mut LopdfWriter, title: &str, page_index: usize) -> Result<()> {
        writer.bookmarks.push((title.to_string(), page_index));
        Ok(())
    }

    fn serialize(&self, writer: LopdfWriter) -> Result<Vec<u8>> {
        let LopdfWriter {
            mut document,
            pages_id,
            kids,
            bookmarks,
            ..
        } = writer;

        let kid_refs: Vec<Object> = kids.iter().map(|&id| Object::Reference(id)).collect();
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kid_refs,
                "Count" => kids.len() as i64,
            }),
        );

        let mut catalog = dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        };
        if !bookmarks.is_empty() {
            let outlines_id = build_outline(&mut document, &kids, &bookmarks)?;
            catalog.set("Outlines", outlines_id);
            catalog.set("PageMode", "UseOutlines");
        }
        let catalog_id = document.add_object(catalog);
        document.trailer.set("Root", catalog_id);

        let info_id = document.add_object(dictionary! {
            "Producer" => Object::string_literal(self.producer.clone()),
        });
        document.trailer.set("Info", info_id);

        document.compress();

        let mut bytes = Vec::new();
        document.save_to(&mut bytes)?;
        debug!(
            pages = kids.len(),
            bookmarks = bookmarks.len(),
            bytes = bytes.len(),
            "Serialized PDF"
        );
        Ok(bytes)
    }
}

/// Look up `key` on the ancestors of `page`.
fn inherited_attribute(document: &Document, page: &Dictionary, key: &[u8]) -> Option<Object> {
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut depth = 0;

    while let Some(id) = parent {
        let node = document.get_dictionary(id).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }

        depth += 1;
        if depth > MAX_TREE_DEPTH {
            return None;
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    None
}

/// Rewrite every reference inside `object` to point at a copy in `writer`,
/// copying referenced objects on first use.
fn import_object(writer: &mut LopdfWriter, source: &LopdfDocument, object: &mut Object) {
    match object {
        Object::Reference(id) => {
            *object = match import_reference(writer, source, *id) {
                Some(new_id) => Object::Reference(new_id),
                None => Object::Null,
            };
        }
        Object::Array(items) => {
            for item in items.iter_mut() {
                import_object(writer, source, item);
            }
        }
        Object::Dictionary(dict) => {
            for (_, value) in dict.iter_mut() {
                import_object(writer, source, value);
            }
        }
        Object::Stream(stream) => {
            for (_, value) in stream.dict.iter_mut() {
                import_object(writer, source, value);
            }
        }
        _ => {}
    }
}

/// Copy the object `id` of `source` into `writer`, returning its new id.
///
/// Page tree nodes that were not added explicitly are not pulled in; links
/// to them become `null`.
fn import_reference(writer: &mut LopdfWriter, source: &LopdfDocument, id: ObjectId) -> Option<ObjectId> {
    if let Some(&new_id) = writer.imported.get(&(source.source_id, id)) {
        return Some(new_id);
    }

    let mut object = source.document.get_object(id).ok()?.clone();
    if is_page_tree_node(&object) {
        return None;
    }

    let new_id = writer.document.new_object_id();
    writer.imported.insert((source.source_id, id), new_id);
    import_object(writer, source, &mut object);
    writer.document.objects.insert(new_id, object);
    Some(new_id)
}

fn is_page_tree_node(object: &Object) -> bool {
    let Ok(dict) = object.as_dict() else {
        return false;
    };
    matches!(dict.get(b"Type"), Ok(Object::Name(name)) if name == b"Page" || name == b"Pages")
}

/// Build an `/Outlines` tree with one top-level item per bookmark.
fn build_outline(
    document: &mut Document,
    kids: &[ObjectId],
    bookmarks: &[(String, usize)],
) -> Result<ObjectId> {
    let outline_id = document.new_object_id();

    let mut item_ids = Vec::with_capacity(bookmarks.len());
    for (title, page_index) in bookmarks {
        let page_id = kids
            .get(*page_index)
            .copied()
            .ok_or_else(|| ToolkitError::BookmarkFailed {
                title: title.clone(),
                reason: format!(
                    "page {} does not exist in a document with {} page(s)",
                    page_index + 1,
                    kids.len()
                ),
            })?;

        let dest: Vec<Object> = vec![
            Object::Reference(page_id),
            Object::Name(b"XYZ".to_vec()),
            Object::Null,
            Object::Null,
            Object::Null,
        ];

        let item_id = document.add_object(dictionary! {
            "Title" => encode_text(title),
            "Parent" => outline_id,
            "Dest" => dest,
        });
        item_ids.push(item_id);
    }

    for (i, &item_id) in item_ids.iter().enumerate() {
        if let Ok(Object::Dictionary(dict)) = document.get_object_mut(item_id) {
            if i > 0 {
                dict.set("Prev", item_ids[i - 1]);
            }
            if let Some(&next) = item_ids.get(i + 1) {
                dict.set("Next", next);
            }
        }
    }

    let mut outline = dictionary! {
        "Type" => "Outlines",
        "Count" => item_ids.len() as i64,
    };
    if let (Some(&first), Some(&last)) = (item_ids.first(), item_ids.last()) {
        outline.set("First", first);
        outline.set("Last", last);
    }
    document.objects.insert(outline_id, Object::Dictionary(outline));

    Ok(outline_id)
}

fn info_dictionary(document: &Document) -> Option<&Dictionary> {
    match document.trailer.get(b"Info").ok()? {
        Object::Reference(id) => document.get_dictionary(*id).ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

fn text_field(document: &Document, dict: &Dictionary, key: &[u8]) -> Option<String> {
    let value = match dict.get(key).ok()? {
        Object::Reference(id) => document.get_object(*id).ok()?,
        other => other,
    };
    match value {
        Object::String(bytes, _) => decode_text(bytes),
        _ => None,
    }
    .map(|text| text.trim_end_matches('\0').trim().to_string())
    .filter(|text| !text.is_empty())
}

/// Decode a PDF text string: UTF-16BE with a byte order mark, otherwise
/// treated as Latin-1.
fn decode_text(bytes: &[u8]) -> Option<String> {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16(&units).ok()
    } else if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        String::from_utf8(rest.to_vec()).ok()
    } else {
        Some(bytes.iter().map(|&b| b as char).collect())
    }
}

/// Encode a PDF text string, switching to UTF-16BE for non-ASCII text.
fn encode_text(text: &str) -> Object {
    if text.is_ascii() {
        Object::String(text.as_bytes().to_vec(), StringFormat::Literal)
    } else {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        Object::String(bytes, StringFormat::Hexadecimal)
    }
}
