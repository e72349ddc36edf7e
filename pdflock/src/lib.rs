//! pdflock - Batch-apply or remove password protection on PDF files.
//!
//! This library walks a directory tree, and for every PDF found either
//! encrypts it with a password or strips the password from it. Each file is
//! rewritten through a sibling temporary file so an original is never lost
//! to a failed write. It provides:
//!
//! - Recursive PDF discovery
//! - Per-file protect/unprotect with atomic replacement
//! - Sequential batch runs with progress events and cancellation
//! - Localized user-facing messages
//! - Recovery of temporary files left by an interrupted run
//!
//! # Examples
//!
//! ## Protect a Directory
//!
//! ```no_run
//! use pdflock::batch::{BatchOptions, BatchRunner, CancelFlag};
//! use pdflock::locator::locate;
//! use pdflock::policy::TransformPolicy;
//!
//! # async fn example() -> pdflock::Result<()> {
//! let files = locate("./invoices");
//! let runner = BatchRunner::new(BatchOptions::default());
//!
//! let summary = runner
//!     .run(files, &TransformPolicy::protect("secret123"), &CancelFlag::new(), |_| {})
//!     .await
//!     .into_result()?;
//!
//! println!("{} PDFs were encrypted", summary.succeeded);
//! # Ok(())
//! # }
//! ```
//!
//! ## Using Individual Components
//!
//! ```no_run
//! use pdflock::locator::FileRecord;
//! use pdflock::policy::TransformPolicy;
//! use pdflock::transform::Transformer;
//!
//! let transformer = Transformer::new();
//! let outcome = transformer.transform(
//!     &FileRecord::new("report.pdf"),
//!     &TransformPolicy::unprotect("secret123"),
//! );
//!
//! if let Some(err) = outcome.error {
//!     eprintln!("{err}");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod config;
pub mod error;
pub mod i18n;
pub mod io;
pub mod locator;
pub mod output;
pub mod policy;
pub mod recovery;
pub mod transform;

// Re-export commonly used types
pub use config::{Config, Operation};
pub use error::{ErrorKind, PdfLockError, Result};
pub use policy::{Mode, TransformPolicy};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
