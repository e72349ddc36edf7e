//! Integration tests for single-file protect and unprotect.

use lopdf::Document;
use pdflock::error::ErrorKind;
use pdflock::locator::FileRecord;
use pdflock::policy::{EncryptionStrength, TransformPolicy};
use pdflock::transform::Transformer;
use rstest::rstest;
use std::fs;
use tempfile::TempDir;

use crate::common::{
    contains_bytes, first_page_content, is_protected, opens_without_password,
    page_count_with_password, protect_in_place, write_blank_pdf, write_sample_pdf,
};

#[rstest]
#[case(EncryptionStrength::Rc4_128)]
#[case(EncryptionStrength::Rc4_40)]
fn test_protect_then_unprotect_restores_open_access(#[case] strength: EncryptionStrength) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.pdf");
    write_sample_pdf(&path, "quarterly report");
    let original_content = first_page_content(&path);
    let file = FileRecord::new(&path);
    let transformer = Transformer::new();

    let outcome = transformer.transform(
        &file,
        &TransformPolicy::protect("secret123").with_strength(strength),
    );
    assert!(outcome.success(), "{outcome:?}");
    assert!(is_protected(&path));
    assert!(!opens_without_password(&path));
    assert_eq!(page_count_with_password(&path, "secret123"), 1);
    assert!(!file.temp_path().exists());

    let outcome = transformer.transform(&file, &TransformPolicy::unprotect("secret123"));
    assert!(outcome.success(), "{outcome:?}");
    assert!(!is_protected(&path));
    assert!(opens_without_password(&path));
    assert!(!file.temp_path().exists());

    let restored_content = first_page_content(&path);
    assert_eq!(restored_content, original_content);
    assert!(contains_bytes(&restored_content, b"(quarterly report) Tj"));
}

#[test]
fn test_document_without_pages_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("blank.pdf");
    write_blank_pdf(&path);
    let file = FileRecord::new(&path);
    let transformer = Transformer::new();

    let outcome = transformer.transform(&file, &TransformPolicy::protect("secret123"));
    assert!(outcome.success(), "{outcome:?}");
    assert!(is_protected(&path));

    let outcome = transformer.transform(&file, &TransformPolicy::unprotect("secret123"));
    assert!(outcome.success(), "{outcome:?}");
    assert!(opens_without_password(&path));
    assert!(Document::load(&path).unwrap().get_pages().is_empty());
}

#[test]
fn test_wrong_password_leaves_file_byte_identical() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a.pdf");
    write_sample_pdf(&path, "a");
    protect_in_place(&path, "right");
    let before = fs::read(&path).unwrap();

    let outcome =
        Transformer::new().transform(&FileRecord::new(&path), &TransformPolicy::unprotect("wrong"));

    assert_eq!(outcome.error_kind(), Some(ErrorKind::Authentication));
    assert_eq!(fs::read(&path).unwrap(), before);
    assert!(!dir.path().join("a.pdf.tmp").exists());
}

#[test]
fn test_protecting_protected_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a.pdf");
    write_sample_pdf(&path, "a");
    protect_in_place(&path, "first");
    let before = fs::read(&path).unwrap();

    let outcome =
        Transformer::new().transform(&FileRecord::new(&path), &TransformPolicy::protect("second"));

    assert_eq!(outcome.error_kind(), Some(ErrorKind::AlreadyProtected));
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_corrupt_file_is_invalid_pdf() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.pdf");
    fs::write(&path, b"%PDF-1.5\nthis is not a pdf").unwrap();

    let outcome =
        Transformer::new().transform(&FileRecord::new(&path), &TransformPolicy::protect("pw"));

    assert_eq!(outcome.error_kind(), Some(ErrorKind::InvalidPdf));
    assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.5\nthis is not a pdf");
}
