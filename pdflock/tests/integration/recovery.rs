//! Integration tests for interrupted-run recovery.

use pdflock::recovery::{Resolution, find_orphans, resolve_all};
use std::fs;
use tempfile::TempDir;

use crate::common::{is_protected, protect_in_place, write_sample_pdf};

#[test]
fn test_recover_after_interrupted_commit() {
    let dir = TempDir::new().unwrap();

    // Interrupted after the original was removed: only the replacement remains.
    let lost = dir.path().join("lost.pdf");
    write_sample_pdf(&lost, "lost");
    protect_in_place(&lost, "pw");
    fs::rename(&lost, dir.path().join("lost.pdf.tmp")).unwrap();

    // Interrupted before the commit: the original is intact.
    let kept = dir.path().join("sub/kept.pdf");
    write_sample_pdf(&kept, "kept");
    fs::write(dir.path().join("sub/kept.pdf.tmp"), b"partial").unwrap();

    let orphans = find_orphans(dir.path());
    assert_eq!(orphans.len(), 2);

    let results = resolve_all(&orphans);
    let resolutions: Vec<Resolution> = results.into_iter().map(|(_, r)| r.unwrap()).collect();

    assert_eq!(resolutions, vec![Resolution::Restored, Resolution::Removed]);
    assert!(is_protected(&lost));
    assert!(!is_protected(&kept));
    assert!(find_orphans(dir.path()).is_empty());
}
