//! Configuration module for pdflock.
//!
//! This module holds the validated settings for one invocation. The CLI
//! builds a [`Config`] from its arguments and the library only ever sees
//! this normalized form. It handles:
//! - Validation of argument combinations
//! - The directory requirement of each operation
//! - Translation into [`BatchOptions`]

use std::path::PathBuf;

use crate::batch::{BatchOptions, ErrorPolicy};
use crate::error::{PdfLockError, Result};
use crate::policy::TransformPolicy;

/// What an invocation does with the located files.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Apply a protect or unprotect policy to every PDF.
    Transform(TransformPolicy),
    /// Count the PDFs and report leftovers, touching nothing.
    Scan,
    /// Resolve leftover temporary files.
    Recover,
}

impl Operation {
    /// Whether the root directory must exist.
    ///
    /// Scanning a missing directory reports zero files instead.
    pub fn requires_directory(&self) -> bool {
        !matches!(self, Operation::Scan)
    }
}

/// Complete configuration for one pdflock invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory searched recursively.
    pub root: PathBuf,

    /// Operation to run.
    pub operation: Operation,

    /// Dry run mode - report what would change without writing.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Behavior after a file fails.
    pub error_policy: ErrorPolicy,

    /// Localization file, if any.
    pub locale: Option<PathBuf>,
}

impl Config {
    /// Configuration for `operation` on `root` with every flag off.
    pub fn new(root: impl Into<PathBuf>, operation: Operation) -> Self {
        Self {
            root: root.into(),
            operation,
            dry_run: false,
            verbose: false,
            quiet: false,
            error_policy: ErrorPolicy::default(),
            locale: None,
        }
    }

    /// Validate the configuration.
    ///
    /// An empty password is not rejected here; the batch reports it so the
    /// caller can show the localized message.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Verbose and quiet modes are both enabled
    /// - The operation needs the root directory and it does not exist
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            return Err(PdfLockError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        if self.operation.requires_directory() && !self.root.is_dir() {
            return Err(PdfLockError::directory_not_found(self.root.clone()));
        }

        Ok(())
    }

    /// Transform policy, if this is a protect or unprotect run.
    pub fn policy(&self) -> Option<&TransformPolicy> {
        match &self.operation {
            Operation::Transform(policy) => Some(policy),
            _ => None,
        }
    }

    /// Options for the batch runner.
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions::default()
            .with_error_policy(self.error_policy)
            .with_dry_run(self.dry_run)
    }
}
