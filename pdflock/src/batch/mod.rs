//! Sequential batch runs over located files.
//!
//! The [`BatchRunner`] feeds every [`FileRecord`] through a [`Transformer`]
//! strictly one at a time, folds the outcomes into a [`RunSummary`], and
//! publishes a [`ProgressEvent`] after each file.
//!
//! # Features
//!
//! - **Pre-flight check**: an empty password refuses the run before any file
//!   is opened
//! - **Worker execution**: each transform runs on a blocking thread, so the
//!   caller's task stays responsive
//! - **Progress**: a callback, or a channel when the run is spawned
//! - **Cancellation**: a [`CancelFlag`] checked between files
//! - **Error policy**: continue past failures (default) or stop on the first
//!
//! # Example
//!
//! ```rust,no_run
//! use pdflock::batch::{BatchOptions, BatchRunner, CancelFlag};
//! use pdflock::locator::locate;
//! use pdflock::policy::TransformPolicy;
//!
//! # async fn example() {
//! let runner = BatchRunner::new(BatchOptions::default());
//! let files = locate("./invoices");
//! let policy = TransformPolicy::protect("secret123");
//!
//! let summary = runner
//!     .run(files, &policy, &CancelFlag::new(), |event| {
//!         println!("{}", event.format_progress());
//!     })
//!     .await;
//!
//! println!("{} succeeded, {} failed", summary.succeeded, summary.failed);
//! # }
//! ```

pub mod progress;
pub mod summary;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use tokio::sync::mpsc;
use tokio::task::{self, JoinHandle};

pub use progress::ProgressEvent;
pub use summary::{RunStatus, RunSummary};

use crate::error::{ErrorKind, PdfLockError, Result};
use crate::io::{LopdfCodec, PdfCodec};
use crate::locator::FileRecord;
use crate::policy::TransformPolicy;
use crate::transform::{TransformError, TransformOutcome, Transformer};

/// What to do after a file fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Keep going with the remaining files.
    #[default]
    Continue,
    /// Stop the run after the first failure.
    StopOnFirstError,
}

/// Options for batch runs.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Behavior after a failed file.
    pub error_policy: ErrorPolicy,
    /// Report every file as it would be processed without touching it.
    pub dry_run: bool,
}

impl BatchOptions {
    /// Set the error policy.
    pub fn with_error_policy(mut self, error_policy: ErrorPolicy) -> Self {
        self.error_policy = error_policy;
        self
    }

    /// Enable or disable dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Shared cancellation signal, checked between files.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    /// Create an unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. The file in flight still finishes.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Check if cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Runs a transform policy over many files.
pub struct BatchRunner<C = LopdfCodec> {
    transformer: Arc<Transformer<C>>,
    options: BatchOptions,
}

impl<C> Clone for BatchRunner<C> {
    fn clone(&self) -> Self {
        Self {
            transformer: Arc::clone(&self.transformer),
            options: self.options.clone(),
        }
    }
}

impl BatchRunner<LopdfCodec> {
    /// Create a runner backed by `lopdf`.
    pub fn new(options: BatchOptions) -> Self {
        Self::with_transformer(Transformer::new(), options)
    }
}

impl<C: PdfCodec + 'static> BatchRunner<C> {
    /// Create a runner over a custom transformer.
    pub fn with_transformer(transformer: Transformer<C>, options: BatchOptions) -> Self {
        Self {
            transformer: Arc::new(transformer),
            options,
        }
    }

    /// Options in effect.
    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Process `files` in order and return the aggregate summary.
    ///
    /// `on_progress` is invoked after each file with the running counts.
    /// An empty password returns at once with
    /// [`RunStatus::MissingPassword`] and no file opened.
    pub async fn run<F>(
        &self,
        files: Vec<FileRecord>,
        policy: &TransformPolicy,
        cancel: &CancelFlag,
        mut on_progress: F,
    ) -> RunSummary
    where
        F: FnMut(&ProgressEvent),
    {
        let start = Instant::now();
        let total = files.len();

        if policy.validate().is_err() {
            tracing::warn!(files = total, "no password provided, nothing was modified");
            return RunSummary::missing_password(total);
        }

        tracing::debug!(files = total, mode = %policy.mode, dry_run = self.options.dry_run, "batch started");

        let mut summary = RunSummary::new(total);
        let shared_policy = Arc::new(policy.clone());

        for (idx, file) in files.into_iter().enumerate() {
            if cancel.is_cancelled() {
                tracing::info!(processed = summary.processed(), total, "batch cancelled");
                summary.status = RunStatus::Cancelled;
                break;
            }

            let outcome = if self.options.dry_run {
                TransformOutcome::succeeded(&file.path)
            } else {
                self.transform_on_worker(file, Arc::clone(&shared_policy))
                    .await
            };

            summary.record(&outcome);
            let failed_now = !outcome.success();

            on_progress(&ProgressEvent {
                index: idx + 1,
                total,
                outcome,
                succeeded: summary.succeeded,
                failed: summary.failed,
                dry_run: self.options.dry_run,
            });

            if failed_now && self.options.error_policy == ErrorPolicy::StopOnFirstError {
                tracing::info!(processed = summary.processed(), total, "stopping after first failure");
                summary.status = RunStatus::Stopped;
                break;
            }
        }

        summary.duration = start.elapsed();
        tracing::debug!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            status = ?summary.status,
            "batch finished"
        );
        summary
    }

    /// Move the run onto a tokio task and stream progress over a channel.
    ///
    /// Events arrive in file order. Must be called from within a tokio
    /// runtime.
    pub fn spawn(
        &self,
        files: Vec<FileRecord>,
        policy: TransformPolicy,
        cancel: CancelFlag,
    ) -> BatchHandle {
        let runner = self.clone();
        let (tx, rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            runner
                .run(files, &policy, &cancel, |event| {
                    // The receiver may be gone; the run still completes.
                    let _ = tx.send(event.clone());
                })
                .await
        });

        BatchHandle { events: rx, task }
    }

    async fn transform_on_worker(
        &self,
        file: FileRecord,
        policy: Arc<TransformPolicy>,
    ) -> TransformOutcome {
        let transformer = Arc::clone(&self.transformer);
        let path = file.path.clone();

        task::spawn_blocking(move || transformer.transform(&file, &policy))
            .await
            .unwrap_or_else(|e| {
                TransformOutcome::failed(
                    path,
                    TransformError::new(ErrorKind::Io, format!("Transform task failed: {e}")),
                )
            })
    }
}

/// A run executing on a background task.
pub struct BatchHandle {
    events: mpsc::UnboundedReceiver<ProgressEvent>,
    task: JoinHandle<RunSummary>,
}

impl BatchHandle {
    /// Next progress event, or `None` once the run has finished.
    pub async fn next_event(&mut self) -> Option<ProgressEvent> {
        self.events.recv().await
    }

    /// Wait for the run to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if the background task panicked.
    pub async fn join(self) -> Result<RunSummary> {
        self.task
            .await
            .map_err(|e| PdfLockError::other(format!("Batch task failed: {e}")))
    }
}
