//! PDF writing with optional encryption.
//!
//! This module serializes a document to a path, either in the clear or
//! encrypted with the standard security handler. It only writes; committing
//! the written file over an original is the transformer's job.
//!
//! # Examples
//!
//! ```no_run
//! use pdflock::io::writer::PdfWriter;
//! use pdflock::policy::TransformPolicy;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # fn example(mut doc: Document) -> pdflock::Result<()> {
//! let policy = TransformPolicy::protect("secret123");
//! let writer = PdfWriter::new();
//! writer.write(&mut doc, Path::new("locked.pdf.tmp"), policy.encryption_spec().as_ref())?;
//! # Ok(())
//! # }
//! ```

use lopdf::{Document, EncryptionState, EncryptionVersion, Object, Permissions, StringFormat};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{PdfLockError, Result};
use crate::policy::{EncryptionSpec, EncryptionStrength};

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,

    /// Call `fsync` on the written file before returning.
    pub sync: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            buffer_size: 8192,
            sync: true,
        }
    }
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Write `doc` to `path`, encrypting it when `encryption` is given.
    ///
    /// The file at `path` is created or truncated.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The encryption state cannot be built or applied
    /// - The file cannot be created
    /// - An I/O error occurs during serialization, flushing or syncing
    pub fn write(
        &self,
        doc: &mut Document,
        path: &Path,
        encryption: Option<&EncryptionSpec>,
    ) -> Result<()> {
        if let Some(spec) = encryption {
            encrypt(doc, path, spec)?;
        }

        let file = std::fs::File::create(path).map_err(|e| PdfLockError::FailedToWrite {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut writer = BufWriter::with_capacity(self.options.buffer_size, file);

        doc.save_to(&mut writer)
            .map_err(|e| PdfLockError::FailedToWrite {
                path: path.to_path_buf(),
                source: std::io::Error::other(e),
            })?;

        // Flush the buffered writer to ensure all data is written to the file system.
        writer.flush().map_err(|e| PdfLockError::FailedToWrite {
            path: path.to_path_buf(),
            source: e,
        })?;

        if self.options.sync {
            writer
                .get_ref()
                .sync_all()
                .map_err(|e| PdfLockError::FailedToWrite {
                    path: path.to_path_buf(),
                    source: e,
                })?;
        }

        Ok(())
    }
}

fn encrypt(doc: &mut Document, path: &Path, spec: &EncryptionSpec) -> Result<()> {
    ensure_document_id(doc);

    let version = match spec.strength {
        EncryptionStrength::Rc4_40 => EncryptionVersion::V2 {
            document: &*doc,
            owner_password: &spec.owner_password,
            user_password: &spec.user_password,
            key_length: 40,
            permissions: Permissions::all(),
        },
        EncryptionStrength::Rc4_128 => EncryptionVersion::V2 {
            document: &*doc,
            owner_password: &spec.owner_password,
            user_password: &spec.user_password,
            key_length: 128,
            permissions: Permissions::all(),
        },
    };

    let state = EncryptionState::try_from(version)
        .map_err(|e| PdfLockError::encryption_failed(path.to_path_buf(), e.to_string()))?;

    doc.encrypt(&state)
        .map_err(|e| PdfLockError::encryption_failed(path.to_path_buf(), e.to_string()))?;

    Ok(())
}

/// The standard security handler derives its key from the first `/ID` entry.
fn ensure_document_id(doc: &mut Document) {
    if doc.trailer.get(b"ID").is_ok() {
        return;
    }

    let id: [u8; 16] = rand::random();
    doc.trailer.set(
        "ID",
        Object::Array(vec![
            Object::String(id.to_vec(), StringFormat::Hexadecimal),
            Object::String(id.to_vec(), StringFormat::Hexadecimal),
        ]),
    );
}
