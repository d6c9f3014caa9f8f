//! In-memory PDF fixtures for unit tests.
#![allow(clippy::unwrap_used)]

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, dictionary};

use crate::pages::PageCollection;
use crate::pdf::PdfDocument;

/// A PDF with one page per label. Each page carries its label both as
/// visible text and as a `/Label` entry so tests can identify it after
/// a round trip. Resources and MediaBox are inherited from the page tree.
pub fn pdf_with_pages(labels: &[&str]) -> Vec<u8> {
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

    let kids: Vec<Object> = labels
        .iter()
        .map(|label| {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 48.into()]),
                    Operation::new("Td", vec![100.into(), 600.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*label)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Label" => Object::string_literal(*label),
            });
            page_id.into()
        })
        .collect();

    let count = i64::try_from(kids.len()).unwrap();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// A single-page PDF whose `/Rotate` is set on the parent `/Pages` node.
pub fn pdf_with_inherited_rotate(rotation: i64) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Label" => Object::string_literal("R"),
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::from(page_id)],
            "Count" => 1i64,
            "Rotate" => rotation,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// A two-page PDF whose `/CropBox` is set on the parent `/Pages` node.
pub fn pdf_with_inherited_crop_box() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = ["C1", "C2"]
        .into_iter()
        .map(|label| {
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Label" => Object::string_literal(label),
            })
            .into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => 2i64,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "CropBox" => vec![10.into(), 20.into(), 600.into(), 780.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// A decoded document with `n` pages labelled "1", "2", ...
pub fn document(n: usize) -> PdfDocument {
    let labels: Vec<String> = (1..=n).map(|i| i.to_string()).collect();
    let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
    PdfDocument::from_bytes(&pdf_with_pages(&refs)).unwrap()
}

/// A collection over a fresh `n`-page document.
pub fn collection(n: usize) -> PageCollection {
    PageCollection::from_document(document(n))
}

/// `/Label` of every page of an encoded PDF, in page order.
pub fn reread_labels(bytes: &[u8]) -> Vec<String> {
    let doc = Document::load_mem(bytes).unwrap();
    doc.get_pages()
        .into_values()
        .map(|id| {
            let dict = doc.get_dictionary(id).unwrap();
            String::from_utf8_lossy(dict.get(b"Label").unwrap().as_str().unwrap()).into_owned()
        })
        .collect()
}

/// `/Rotate` of every page of an encoded PDF, in page order.
pub fn reread_rotations(bytes: &[u8]) -> Vec<i64> {
    let doc = Document::load_mem(bytes).unwrap();
    doc.get_pages()
        .into_values()
        .map(|id| {
            let dict = doc.get_dictionary(id).unwrap();
            dict.get(b"Rotate").and_then(Object::as_i64).unwrap_or(0)
        })
        .collect()
}

/// Every page dictionary of an encoded PDF, in page order.
pub fn reread_page_dicts(bytes: &[u8]) -> Vec<Dictionary> {
    let doc = Document::load_mem(bytes).unwrap();
    doc.get_pages()
        .into_values()
        .map(|id| doc.get_dictionary(id).unwrap().clone())
        .collect()
}
