//! Integration tests for PDF discovery.

use pdflock::locator::locate;
use std::fs;
use tempfile::TempDir;

use crate::common::write_sample_pdfs;

#[test]
fn test_locate_finds_nested_pdfs_only() {
    let dir = TempDir::new().unwrap();
    write_sample_pdfs(dir.path(), &["x.pdf", "nested/y.pdf"]);
    fs::write(dir.path().join("z.txt"), b"text").unwrap();
    fs::write(dir.path().join("upper.PDF"), b"skipped").unwrap();
    fs::write(dir.path().join("x.pdf.tmp"), b"leftover").unwrap();

    let files = locate(dir.path());

    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|f| f.path.is_absolute()));
    assert!(files[0].path.ends_with("nested/y.pdf"));
    assert!(files[1].path.ends_with("x.pdf"));
}

#[test]
fn test_locate_missing_root_is_empty() {
    let dir = TempDir::new().unwrap();
    assert!(locate(dir.path().join("missing")).is_empty());
}
