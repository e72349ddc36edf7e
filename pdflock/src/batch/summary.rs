//! Aggregate result of one batch run.

use serde::Serialize;
use std::time::Duration;

use crate::error::{PdfLockError, Result};
use crate::transform::TransformOutcome;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RunStatus {
    /// Every file was attempted.
    Completed,
    /// No password was given; nothing was attempted.
    MissingPassword,
    /// Stopped after the first failure (fail-fast).
    Stopped,
    /// Cancelled between files.
    Cancelled,
}

/// Counts and failures for one run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// Number of files handed to the run.
    pub total_files: usize,
    /// Files transformed and committed.
    pub succeeded: usize,
    /// Files left unchanged because of an error.
    pub failed: usize,
    /// How the run ended.
    pub status: RunStatus,
    /// Failed outcomes in processing order.
    pub failures: Vec<TransformOutcome>,
    /// Wall time of the run.
    pub duration: Duration,
}

impl RunSummary {
    /// Start a summary for `total_files` files.
    pub(crate) fn new(total_files: usize) -> Self {
        Self {
            total_files,
            succeeded: 0,
            failed: 0,
            status: RunStatus::Completed,
            failures: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    /// Summary of a run refused for lack of a password.
    pub fn missing_password(total_files: usize) -> Self {
        Self {
            status: RunStatus::MissingPassword,
            ..Self::new(total_files)
        }
    }

    /// Fold one outcome into the counters.
    pub(crate) fn record(&mut self, outcome: &TransformOutcome) {
        if outcome.success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
            self.failures.push(outcome.clone());
        }
    }

    /// Files attempted so far.
    pub fn processed(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Files never attempted (cancelled, stopped or refused runs).
    pub fn skipped(&self) -> usize {
        self.total_files.saturating_sub(self.processed())
    }

    /// Whether every file was attempted and none failed.
    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Completed && self.failed == 0
    }

    /// Turn an unsuccessful summary into the matching error.
    ///
    /// # Errors
    ///
    /// - [`PdfLockError::MissingPassword`] for a refused run.
    /// - [`PdfLockError::Cancelled`] for a cancelled run.
    /// - [`PdfLockError::FilesFailed`] if any file failed.
    pub fn into_result(self) -> Result<Self> {
        match self.status {
            RunStatus::MissingPassword => Err(PdfLockError::MissingPassword),
            RunStatus::Cancelled => Err(PdfLockError::Cancelled),
            RunStatus::Completed | RunStatus::Stopped if self.failed > 0 => {
                Err(PdfLockError::FilesFailed {
                    failed: self.failed,
                    total: self.total_files,
                })
            }
            _ => Ok(self),
        }
    }
}
