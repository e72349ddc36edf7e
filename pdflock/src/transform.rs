//! Per-file read, modify, atomic-replace cycle.
//!
//! [`Transformer::transform`] opens one file through a [`PdfCodec`], writes
//! the transformed document to `<original>.tmp`, and only then swaps it in
//! place of the original. Failures never escape: they come back as a failed
//! [`TransformOutcome`] so a batch can move on to the next file.
//!
//! Commit order is remove-original then rename-temp. If the process dies
//! between the two, the `.tmp` file holds the complete replacement; see
//! [`crate::recovery`].

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, PdfLockError, Result};
use crate::io::{LopdfCodec, PdfCodec};
use crate::locator::FileRecord;
use crate::policy::TransformPolicy;

/// Why a single file failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformError {
    /// Classification of the failure.
    pub kind: ErrorKind,
    /// Human-readable detail.
    pub message: String,
}

impl TransformError {
    /// Create an error of `kind`.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<&PdfLockError> for TransformError {
    fn from(err: &PdfLockError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.label(), self.message)
    }
}

/// Result of transforming one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformOutcome {
    /// File that was transformed.
    pub path: PathBuf,
    /// Failure, if the file was not transformed.
    pub error: Option<TransformError>,
}

impl TransformOutcome {
    /// A successful outcome.
    pub fn succeeded(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            error: None,
        }
    }

    /// A failed outcome.
    pub fn failed(path: impl Into<PathBuf>, error: TransformError) -> Self {
        Self {
            path: path.into(),
            error: Some(error),
        }
    }

    /// Whether the file was transformed and committed.
    pub fn success(&self) -> bool {
        self.error.is_none()
    }

    /// Failure kind, if any.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error.as_ref().map(|e| e.kind)
    }
}

/// Applies a [`TransformPolicy`] to single files.
#[derive(Debug, Clone)]
pub struct Transformer<C = LopdfCodec> {
    codec: C,
}

impl Transformer<LopdfCodec> {
    /// Create a transformer backed by `lopdf`.
    pub fn new() -> Self {
        Self::with_codec(LopdfCodec::new())
    }
}

impl Default for Transformer<LopdfCodec> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: PdfCodec> Transformer<C> {
    /// Create a transformer over a custom codec.
    pub fn with_codec(codec: C) -> Self {
        Self { codec }
    }

    /// Codec used for every file.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Transform one file. Never fails; errors are reported in the outcome.
    pub fn transform(&self, file: &FileRecord, policy: &TransformPolicy) -> TransformOutcome {
        match self.try_transform(file, policy) {
            Ok(()) => {
                tracing::info!(
                    path = %file.path.display(),
                    mode = %policy.mode,
                    "file committed"
                );
                TransformOutcome::succeeded(&file.path)
            }
            Err(err) => {
                tracing::warn!(
                    path = %file.path.display(),
                    mode = %policy.mode,
                    error = %err,
                    "file left unchanged"
                );
                TransformOutcome::failed(&file.path, TransformError::from(&err))
            }
        }
    }

    fn try_transform(&self, file: &FileRecord, policy: &TransformPolicy) -> Result<()> {
        policy.validate()?;

        let temp_path = file.temp_path();

        let mut handle = self.codec.open(&file.path, policy.open_password())?;
        tracing::debug!(path = %file.path.display(), "opened");

        let encryption = policy.encryption_spec();
        if let Err(err) = self
            .codec
            .save(&mut handle, &temp_path, encryption.as_ref())
        {
            self.codec.close(handle);
            discard_temp(&temp_path);
            return Err(err);
        }
        self.codec.close(handle);
        tracing::debug!(temp = %temp_path.display(), "replacement written");

        commit(&temp_path, &file.path)
    }
}

/// Swap the fully written `temp` in place of `original`.
fn commit(temp: &Path, original: &Path) -> Result<()> {
    if let Err(e) = std::fs::remove_file(original) {
        discard_temp(temp);
        return Err(PdfLockError::FailedToReplace {
            path: original.to_path_buf(),
            source: e,
        });
    }

    // From here on the original is gone; leave the temp file for recovery
    // if the rename fails.
    std::fs::rename(temp, original).map_err(|e| PdfLockError::FailedToReplace {
        path: original.to_path_buf(),
        source: e,
    })
}

fn discard_temp(temp: &Path) {
    match std::fs::remove_file(temp) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(temp = %temp.display(), error = %e, "could not remove temporary file");
        }
    }
}
