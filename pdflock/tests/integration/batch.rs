//! Integration tests for whole-directory runs.

use pdflock::batch::{BatchOptions, BatchRunner, CancelFlag, ErrorPolicy, RunStatus};
use pdflock::error::{ErrorKind, PdfLockError};
use pdflock::locator::locate;
use pdflock::policy::TransformPolicy;
use std::fs;
use tempfile::TempDir;

use crate::common::{is_protected, protect_in_place, write_sample_pdfs};

#[tokio::test]
async fn test_protect_directory_tree() {
    let dir = TempDir::new().unwrap();
    let paths = write_sample_pdfs(dir.path(), &["a.pdf", "sub/b.pdf", "sub/deeper/c.pdf"]);
    fs::write(dir.path().join("notes.txt"), b"left alone").unwrap();

    let runner = BatchRunner::new(BatchOptions::default());
    let mut progress = Vec::new();
    let summary = runner
        .run(
            locate(dir.path()),
            &TransformPolicy::protect("secret123"),
            &CancelFlag::new(),
            |event| progress.push(event.clone()),
        )
        .await;

    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.succeeded, 3);
    assert_eq!(summary.failed, 0);
    assert!(summary.is_success());
    assert_eq!(progress.len(), 3);
    assert!(progress.last().unwrap().is_last());

    for path in &paths {
        assert!(is_protected(path), "{} not protected", path.display());
    }
    assert_eq!(fs::read(dir.path().join("notes.txt")).unwrap(), b"left alone");
}

#[tokio::test]
async fn test_unprotect_with_wrong_password_fails_every_file() {
    let dir = TempDir::new().unwrap();
    let paths = write_sample_pdfs(dir.path(), &["a.pdf", "b.pdf"]);
    for path in &paths {
        protect_in_place(path, "right");
    }
    let before: Vec<Vec<u8>> = paths.iter().map(|p| fs::read(p).unwrap()).collect();

    let summary = BatchRunner::new(BatchOptions::default())
        .run(
            locate(dir.path()),
            &TransformPolicy::unprotect("wrong"),
            &CancelFlag::new(),
            |_| {},
        )
        .await;

    assert_eq!(summary.succeeded, 0);
    assert_eq!(summary.failed, 2);
    assert!(
        summary
            .failures
            .iter()
            .all(|f| f.error_kind() == Some(ErrorKind::Authentication))
    );
    for (path, bytes) in paths.iter().zip(&before) {
        assert_eq!(&fs::read(path).unwrap(), bytes);
    }

    let err = summary.into_result().unwrap_err();
    assert_eq!(err.exit_code(), 3);
}

#[tokio::test]
async fn test_missing_password_modifies_nothing() {
    let dir = TempDir::new().unwrap();
    let paths = write_sample_pdfs(dir.path(), &["a.pdf"]);
    let before = fs::read(&paths[0]).unwrap();

    let summary = BatchRunner::new(BatchOptions::default())
        .run(
            locate(dir.path()),
            &TransformPolicy::protect(""),
            &CancelFlag::new(),
            |_| panic!("no progress expected"),
        )
        .await;

    assert_eq!(summary.status, RunStatus::MissingPassword);
    assert_eq!(fs::read(&paths[0]).unwrap(), before);
    assert!(matches!(
        summary.into_result(),
        Err(PdfLockError::MissingPassword)
    ));
}

#[tokio::test]
async fn test_mixed_directory_continues_past_failures() {
    let dir = TempDir::new().unwrap();
    write_sample_pdfs(dir.path(), &["a.pdf", "c.pdf"]);
    fs::write(dir.path().join("b.pdf"), b"garbage").unwrap();

    let summary = BatchRunner::new(BatchOptions::default())
        .run(
            locate(dir.path()),
            &TransformPolicy::protect("pw"),
            &CancelFlag::new(),
            |_| {},
        )
        .await;

    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);
    assert!(summary.failures[0].path.ends_with("b.pdf"));
    assert!(is_protected(&dir.path().join("c.pdf")));
}

#[tokio::test]
async fn test_fail_fast_stops_at_first_failure() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.pdf"), b"garbage").unwrap();
    write_sample_pdfs(dir.path(), &["b.pdf"]);

    let runner = BatchRunner::new(
        BatchOptions::default().with_error_policy(ErrorPolicy::StopOnFirstError),
    );
    let summary = runner
        .run(
            locate(dir.path()),
            &TransformPolicy::protect("pw"),
            &CancelFlag::new(),
            |_| {},
        )
        .await;

    assert_eq!(summary.status, RunStatus::Stopped);
    assert_eq!(summary.skipped(), 1);
    assert!(!is_protected(&dir.path().join("b.pdf")));
}

#[tokio::test]
async fn test_spawned_run_reports_in_file_order() {
    let dir = TempDir::new().unwrap();
    write_sample_pdfs(dir.path(), &["c.pdf", "a.pdf", "b.pdf"]);

    let runner = BatchRunner::new(BatchOptions::default());
    let mut handle = runner.spawn(
        locate(dir.path()),
        TransformPolicy::protect("pw"),
        CancelFlag::new(),
    );

    let mut names = Vec::new();
    while let Some(event) = handle.next_event().await {
        names.push(event.outcome.path.file_name().unwrap().to_string_lossy().into_owned());
    }
    let summary = handle.join().await.unwrap();

    assert_eq!(names, vec!["a.pdf", "b.pdf", "c.pdf"]);
    assert_eq!(summary.succeeded, 3);
}

#[tokio::test]
async fn test_dry_run_leaves_files_unprotected() {
    let dir = TempDir::new().unwrap();
    let paths = write_sample_pdfs(dir.path(), &["a.pdf"]);

    let summary = BatchRunner::new(BatchOptions::default().with_dry_run(true))
        .run(
            locate(dir.path()),
            &TransformPolicy::protect("pw"),
            &CancelFlag::new(),
            |event| assert!(event.dry_run),
        )
        .await;

    assert_eq!(summary.succeeded, 1);
    assert!(!is_protected(&paths[0]));
}
