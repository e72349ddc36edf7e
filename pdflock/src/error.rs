//! Error types for pdflock.
//!
//! This module defines all error types that can occur while locating,
//! protecting and unprotecting PDF files. Errors are designed to be
//! informative and actionable, providing clear context about what went
//! wrong and how to fix it.
//!
//! # Error Categories
//!
//! - **Batch Errors**: Missing password, missing directory. These abort a run
//!   before any file is touched.
//! - **Per-File Errors**: Wrong password, already protected, I/O and parse
//!   failures. These are captured per file and never abort a batch.
//! - **Configuration Errors**: Invalid arguments or localization files.

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Result type alias for pdflock operations.
pub type Result<T> = std::result::Result<T, PdfLockError>;

/// Main error type for pdflock operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfLockError {
    /// No password was supplied for the run.
    #[error("No password was specified")]
    MissingPassword,

    /// The selected root directory does not exist or is not a directory.
    #[error("Directory not found: {}", path.display())]
    DirectoryNotFound {
        /// Path that was selected.
        path: PathBuf,
    },

    /// The supplied password did not unlock the document.
    #[error("Wrong password for PDF: {}", path.display())]
    AuthenticationFailed {
        /// Path to the PDF file.
        path: PathBuf,
    },

    /// Protection was requested for a document that is already encrypted.
    #[error(
        "PDF is already password protected: {}\n  \
         Hint: Remove the existing protection first with 'pdflock unprotect'",
        path.display()
    )]
    AlreadyProtected {
        /// Path to the PDF file.
        path: PathBuf,
    },

    /// The codec could not parse the file as a PDF.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", path.display())]
    InvalidPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// The codec could not apply the requested encryption.
    #[error("Failed to encrypt PDF: {}\n  Reason: {reason}", path.display())]
    EncryptionFailed {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// Failed to read an input file.
    #[error("Cannot read file: {}\n  Reason: {source}", path.display())]
    FailedToRead {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to write the replacement file.
    #[error("Failed to write file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to swap the replacement file into place.
    #[error("Failed to replace file: {}\n  Reason: {source}", path.display())]
    FailedToReplace {
        /// Path of the original file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The localization file exists but could not be parsed.
    #[error("Invalid localization file: {}\n  Reason: {reason}", path.display())]
    InvalidLocale {
        /// Path to the localization file.
        path: PathBuf,
        /// Parser error.
        reason: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// One or more files in a batch failed.
    #[error("{failed} of {total} PDF(s) could not be modified")]
    FilesFailed {
        /// Number of failed files.
        failed: usize,
        /// Number of files in the batch.
        total: usize,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

/// Coarse classification of a failure, safe to clone and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No password was given for the run.
    MissingPassword,
    /// Wrong password while removing protection.
    Authentication,
    /// Adding protection to an already protected file.
    AlreadyProtected,
    /// Read, write, or rename failure.
    Io,
    /// The file is not a readable PDF.
    InvalidPdf,
    /// The document parsed but could not be encrypted.
    Encryption,
    /// The run was cancelled.
    Cancelled,
}

impl ErrorKind {
    /// Short lower-case label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MissingPassword => "missing password",
            Self::Authentication => "wrong password",
            Self::AlreadyProtected => "already protected",
            Self::Io => "i/o error",
            Self::InvalidPdf => "invalid pdf",
            Self::Encryption => "encryption failed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl PdfLockError {
    /// Create a DirectoryNotFound error.
    pub fn directory_not_found(path: PathBuf) -> Self {
        Self::DirectoryNotFound { path }
    }

    /// Create an AuthenticationFailed error.
    pub fn authentication_failed(path: PathBuf) -> Self {
        Self::AuthenticationFailed { path }
    }

    /// Create an AlreadyProtected error.
    pub fn already_protected(path: PathBuf) -> Self {
        Self::AlreadyProtected { path }
    }

    /// Create an InvalidPdf error.
    pub fn invalid_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::InvalidPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create an EncryptionFailed error.
    pub fn encryption_failed(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::EncryptionFailed {
            path,
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingPassword => ErrorKind::MissingPassword,
            Self::AuthenticationFailed { .. } => ErrorKind::Authentication,
            Self::AlreadyProtected { .. } => ErrorKind::AlreadyProtected,
            Self::InvalidPdf { .. } => ErrorKind::InvalidPdf,
            Self::EncryptionFailed { .. } => ErrorKind::Encryption,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::DirectoryNotFound { .. }
            | Self::FailedToRead { .. }
            | Self::FailedToWrite { .. }
            | Self::FailedToReplace { .. }
            | Self::InvalidLocale { .. }
            | Self::InvalidConfig { .. }
            | Self::FilesFailed { .. }
            | Self::Io(_)
            | Self::Other { .. } => ErrorKind::Io,
        }
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingPassword => 1,
            Self::DirectoryNotFound { .. } => 2,
            Self::AuthenticationFailed { .. } => 3,
            Self::AlreadyProtected { .. } => 3,
            Self::InvalidPdf { .. } => 3,
            Self::EncryptionFailed { .. } => 3,
            Self::FilesFailed { .. } => 3,
            Self::FailedToRead { .. } => 2,
            Self::FailedToWrite { .. } => 5,
            Self::FailedToReplace { .. } => 5,
            Self::InvalidLocale { .. } => 1,
            Self::InvalidConfig { .. } => 1,
            Self::Cancelled => 130, // Standard exit code for SIGINT
            Self::Io(_) => 5,
            Self::Other { .. } => 1,
        }
    }
}
