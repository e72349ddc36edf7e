//! Shared helpers for pdflock integration tests.
//!
//! PDFs are generated on the fly with `lopdf` instead of being checked in
//! as fixtures.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use pdflock::locator::FileRecord;
use pdflock::policy::TransformPolicy;
use pdflock::transform::Transformer;

/// Write a one-page PDF showing `text` to `path`, creating parent dirs.
pub fn write_sample_pdf(path: &Path, text: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }

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

    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 24.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().expect("Failed to encode content"),
    ));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc.save(path).expect("Failed to save sample PDF");
}

/// Write a valid PDF with an empty page tree to `path`.
pub fn write_blank_pdf(path: &Path) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => Vec::<Object>::new(),
        "Count" => 0,
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc.save(path).expect("Failed to save blank PDF");
}

/// Write sample PDFs named `names` under `root` and return their paths.
pub fn write_sample_pdfs(root: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = root.join(name);
            write_sample_pdf(&path, name);
            path
        })
        .collect()
}

/// Protect `path` in place with `password`, panicking on failure.
pub fn protect_in_place(path: &Path, password: &str) {
    let outcome =
        Transformer::new().transform(&FileRecord::new(path), &TransformPolicy::protect(password));
    assert!(outcome.success(), "Failed to protect fixture: {outcome:?}");
}

/// Whether the PDF at `path` is password protected.
pub fn is_protected(path: &Path) -> bool {
    pdflock::io::PdfReader::new()
        .is_protected(path)
        .expect("Fixture is not a readable PDF")
}

/// Whether the PDF at `path` opens without a password.
pub fn opens_without_password(path: &Path) -> bool {
    pdflock::io::PdfReader::new().open(path, None).is_ok()
}

/// Number of pages in the PDF at `path` once unlocked with `password`.
pub fn page_count_with_password(path: &Path, password: &str) -> usize {
    pdflock::io::PdfReader::new()
        .open(path, Some(password))
        .map(|doc| doc.get_pages().len())
        .unwrap_or(0)
}

/// Decoded content stream of the first page of the plain PDF at `path`.
pub fn first_page_content(path: &Path) -> Vec<u8> {
    let doc = Document::load(path).expect("Fixture is not a readable PDF");
    let page_id = *doc.get_pages().get(&1).expect("Fixture has no first page");
    doc.get_page_content(page_id)
        .expect("Failed to read page content")
}

/// Whether `haystack` contains `needle`.
pub fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
