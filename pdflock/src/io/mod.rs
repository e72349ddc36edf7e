//! PDF codec seam.
//!
//! The transformer never talks to a PDF library directly. It goes through
//! [`PdfCodec`], which opens a document (optionally unlocking it), saves it
//! (optionally encrypting it), and closes it. [`LopdfCodec`] is the
//! production implementation on top of `lopdf`.
//!
//! # Examples
//!
//! ```no_run
//! use pdflock::io::{LopdfCodec, PdfCodec};
//! use std::path::Path;
//!
//! # fn example() -> pdflock::Result<()> {
//! let codec = LopdfCodec::new();
//! let mut doc = codec.open(Path::new("locked.pdf"), Some("secret123"))?;
//! codec.save(&mut doc, Path::new("unlocked.pdf"), None)?;
//! codec.close(doc);
//! # Ok(())
//! # }
//! ```

pub mod reader;
pub mod writer;

use std::path::Path;

use lopdf::Document;

pub use reader::PdfReader;
pub use writer::PdfWriter;

use crate::error::Result;
use crate::policy::EncryptionSpec;

/// Operations the transformer needs from a PDF library.
pub trait PdfCodec: Send + Sync {
    /// An open document.
    type Handle;

    /// Open `path`. With a password, unlock an encrypted document; without
    /// one, refuse a document that is already encrypted.
    ///
    /// # Errors
    ///
    /// - [`PdfLockError::AuthenticationFailed`](crate::PdfLockError::AuthenticationFailed)
    ///   if the password is rejected.
    /// - [`PdfLockError::AlreadyProtected`](crate::PdfLockError::AlreadyProtected)
    ///   if no password was given and the document is encrypted.
    /// - [`PdfLockError::InvalidPdf`](crate::PdfLockError::InvalidPdf) if the
    ///   file cannot be parsed.
    fn open(&self, path: &Path, password: Option<&str>) -> Result<Self::Handle>;

    /// Write `handle` to `path`, encrypted per `encryption` or in the clear.
    fn save(
        &self,
        handle: &mut Self::Handle,
        path: &Path,
        encryption: Option<&EncryptionSpec>,
    ) -> Result<()>;

    /// Release the document.
    fn close(&self, handle: Self::Handle) {
        drop(handle);
    }
}

/// [`PdfCodec`] backed by `lopdf`.
#[derive(Debug, Clone, Default)]
pub struct LopdfCodec {
    reader: PdfReader,
    writer: PdfWriter,
}

impl LopdfCodec {
    /// Create a codec with default reader and writer settings.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PdfCodec for LopdfCodec {
    type Handle = Document;

    fn open(&self, path: &Path, password: Option<&str>) -> Result<Document> {
        self.reader.open(path, password)
    }

    fn save(
        &self,
        handle: &mut Document,
        path: &Path,
        encryption: Option<&EncryptionSpec>,
    ) -> Result<()> {
        self.writer.write(handle, path, encryption)
    }
}
