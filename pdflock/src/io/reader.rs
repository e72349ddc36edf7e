//! PDF opening and unlocking.
//!
//! This module loads documents with `lopdf` and enforces the open-side rules
//! of a run:
//! - Without a password, an encrypted document is refused.
//! - With a password, an encrypted document is unlocked and its encryption
//!   state dropped so it saves in the clear.
//!
//! # Examples
//!
//! ```no_run
//! use pdflock::io::reader::PdfReader;
//! use std::path::Path;
//!
//! # fn example() -> pdflock::Result<()> {
//! let reader = PdfReader::new();
//! let doc = reader.open(Path::new("locked.pdf"), Some("secret123"))?;
//! println!("Unlocked {} pages", doc.get_pages().len());
//! # Ok(())
//! # }
//! ```

use lopdf::xref::XrefEntry;
use lopdf::{Document, Object, ObjectId, Reader};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::error::{PdfLockError, Result};

/// Opens PDF documents for transformation.
#[derive(Debug, Clone, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Open a document, unlocking it with `password` when given.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read or parsed
    /// - `password` is `None` and the document is encrypted
    /// - `password` is given and does not unlock the document
    pub fn open(&self, path: &Path, password: Option<&str>) -> Result<Document> {
        let path_buf = path.to_path_buf();

        let bytes = std::fs::read(path).map_err(|e| PdfLockError::FailedToRead {
            path: path_buf.clone(),
            source: e,
        })?;

        let mut doc = Document::load_mem(&bytes).map_err(|e| {
            let err_msg = e.to_string();
            if mentions_encryption(&err_msg) {
                match password {
                    Some(_) => PdfLockError::authentication_failed(path_buf.clone()),
                    None => PdfLockError::already_protected(path_buf.clone()),
                }
            } else {
                PdfLockError::invalid_pdf(path_buf.clone(), err_msg)
            }
        })?;

        // lopdf silently unlocks documents whose user password is empty and
        // keeps the state around, so both markers count as "encrypted".
        let unlocked_on_load = doc.encryption_state.is_some();
        let encrypted = doc.is_encrypted() || unlocked_on_load;

        match password {
            None if encrypted => {
                return Err(PdfLockError::already_protected(path_buf));
            }
            None => {}
            Some(password) => {
                let rejected = |e: lopdf::Error| {
                    tracing::debug!(path = %path.display(), error = %e, "password rejected");
                    PdfLockError::authentication_failed(path_buf.clone())
                };

                if unlocked_on_load {
                    doc.authenticate_password(password).map_err(rejected)?;
                    drop_encrypt_dictionary(&mut doc);
                } else if doc.is_encrypted() {
                    doc.authenticate_password(password).map_err(rejected)?;
                    doc = load_locked_objects(doc, &bytes);
                    doc.decrypt(password).map_err(rejected)?;
                } else {
                    tracing::debug!(path = %path.display(), "document is not encrypted, saving as is");
                }
                doc.encryption_state = None;
            }
        }

        Ok(doc)
    }

    /// Check whether the file at `path` is password protected.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed.
    pub fn is_protected(&self, path: &Path) -> Result<bool> {
        match Document::load(path) {
            Ok(doc) => Ok(doc.is_encrypted() || doc.encryption_state.is_some()),
            Err(e) if mentions_encryption(&e.to_string()) => Ok(true),
            Err(e) => Err(PdfLockError::invalid_pdf(path.to_path_buf(), e.to_string())),
        }
    }
}

fn mentions_encryption(message: &str) -> bool {
    let message = message.to_lowercase();
    message.contains("encrypt") || message.contains("password") || message.contains("decrypt")
}

/// Parse the objects lopdf's loader skips when the user password is not
/// empty. They come back still encrypted, ready for [`Document::decrypt`].
fn load_locked_objects(doc: Document, bytes: &[u8]) -> Document {
    let start = bytes
        .windows(5)
        .position(|w| w == b"%PDF-")
        .unwrap_or(0);

    let reader = Reader {
        buffer: &bytes[start..],
        document: doc,
        encryption_state: None,
        raw_objects: BTreeMap::new(),
    };

    let ids: Vec<ObjectId> = reader
        .document
        .reference_table
        .entries
        .iter()
        .filter_map(|(&number, entry)| match *entry {
            XrefEntry::Normal { generation, .. } => Some((number, generation)),
            _ => None,
        })
        .filter(|id| !reader.document.objects.contains_key(id))
        .collect();

    let mut objects = Vec::with_capacity(ids.len());
    for id in ids {
        match reader.get_object(id, &mut HashSet::new()) {
            Ok(object) => objects.push((id, object)),
            Err(e) => tracing::warn!(object = ?id, error = %e, "skipping unreadable object"),
        }
    }

    let mut doc = reader.document;
    doc.objects.extend(objects);
    doc
}

/// Remove the `/Encrypt` trailer entry and the dictionary it points to.
fn drop_encrypt_dictionary(doc: &mut Document) {
    if let Ok(id) = doc.trailer.get(b"Encrypt").and_then(Object::as_reference) {
        doc.objects.remove(&id);
    }
    doc.trailer.remove(b"Encrypt");
}
