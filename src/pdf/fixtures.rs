//! In-memory PDFs for tests. Page `n` draws the text "Page n".

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::path::{Path, PathBuf};

pub fn create_test_document(num_pages: u32) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));
    let resources_id = doc.add_object(Dictionary::from_iter(vec![(
        "Font",
        Object::Dictionary(Dictionary::from_iter(vec![("F1", Object::Reference(font_id))])),
    )]));

    let mut page_ids = Vec::new();
    for i in 1..=num_pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(12)]),
                Operation::new("Td", vec![Object::Integer(100), Object::Integer(700)]),
                Operation::new(
                    "Tj",
                    vec![Object::String(
                        format!("Page {}", i).into_bytes(),
                        StringFormat::Literal,
                    )],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            Dictionary::new(),
            content.encode().expect("encode fixture content"),
        ));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ]),
            ),
            ("Resources", Object::Reference(resources_id)),
            ("Contents", Object::Reference(content_id)),
        ]));
        page_ids.push(page_id);
    }

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(num_pages as i64)),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let info_id = doc.add_object(Dictionary::from_iter(vec![(
        "Title",
        Object::String(b"Fixture".to_vec(), StringFormat::Literal),
    )]));
    doc.trailer.set("Info", Object::Reference(info_id));

    doc
}

/// Save a fixture with `num_pages` pages as `dir/name`
pub fn write_test_pdf(dir: &Path, name: &str, num_pages: u32) -> PathBuf {
    let path = dir.join(name);
    let mut doc = create_test_document(num_pages);
    doc.save(&path).expect("save fixture");
    path
}

/// The "Page n" text drawn on the given page
pub fn page_marker(doc: &Document, page_id: ObjectId) -> String {
    let bytes = doc.get_page_content(page_id).expect("page content");
    let content = Content::decode(&bytes).expect("decode page content");
    content
        .operations
        .iter()
        .find(|op| op.operator == "Tj")
        .and_then(|op| match op.operands.first() {
            Some(Object::String(text, _)) => Some(String::from_utf8_lossy(text).into_owned()),
            _ => None,
        })
        .unwrap_or_default()
}

/// Markers of every page of the PDF at `path`, in page order
pub fn page_markers(path: &Path) -> Vec<String> {
    let doc = Document::load(path).expect("load output");
    doc.get_pages()
        .values()
        .map(|&id| page_marker(&doc, id))
        .collect()
}
