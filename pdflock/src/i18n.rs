//! Localized user-facing messages.
//!
//! A locale file is a flat JSON object mapping message keys to templates:
//!
//! ```json
//! { "pdfs_were_found": "{file_count} PDF-Dateien gefunden" }
//! ```
//!
//! Templates reference run-time values through named placeholders that are
//! substituted as plain text. Keys the file does not define fall back to the
//! built-in English table.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{PdfLockError, Result};

/// Every message the tool can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MessageKey {
    /// `select_dir`
    SelectDir,
    /// `quit`
    Quit,
    /// `no_dir_selected`
    NoDirSelected,
    /// `will_be_applied_to_zero`
    WillBeAppliedToZero,
    /// `pwd`
    Pwd,
    /// `add_pwd_protection`
    AddPwdProtection,
    /// `remove_pwd_protection`
    RemovePwdProtection,
    /// `remove_pwd_protection_checkbox`
    RemovePwdProtectionCheckbox,
    /// `pdfs_were_found`
    PdfsWereFound,
    /// `no_pwd_provided`
    NoPwdProvided,
    /// `dirs_are_being_searched`
    DirsAreBeingSearched,
    /// `pdfs_were_modified`
    PdfsWereModified,
    /// `success`
    Success,
    /// `pdf_failed`
    PdfFailed,
    /// `orphans_found`
    OrphansFound,
    /// `orphan_restored`
    OrphanRestored,
    /// `orphan_removed`
    OrphanRemoved,
    /// `cancelled`
    Cancelled,
    /// `run_incomplete`
    RunIncomplete,
    /// `dry_run_file`
    DryRunFile,
    /// `dry_run_summary`
    DryRunSummary,
    /// `dry_run_orphan_restore`
    DryRunOrphanRestore,
    /// `dry_run_orphan_remove`
    DryRunOrphanRemove,
}

impl MessageKey {
    /// All keys, in declaration order.
    pub const ALL: [MessageKey; 23] = [
        MessageKey::SelectDir,
        MessageKey::Quit,
        MessageKey::NoDirSelected,
        MessageKey::WillBeAppliedToZero,
        MessageKey::Pwd,
        MessageKey::AddPwdProtection,
        MessageKey::RemovePwdProtection,
        MessageKey::RemovePwdProtectionCheckbox,
        MessageKey::PdfsWereFound,
        MessageKey::NoPwdProvided,
        MessageKey::DirsAreBeingSearched,
        MessageKey::PdfsWereModified,
        MessageKey::Success,
        MessageKey::PdfFailed,
        MessageKey::OrphansFound,
        MessageKey::OrphanRestored,
        MessageKey::OrphanRemoved,
        MessageKey::Cancelled,
        MessageKey::RunIncomplete,
        MessageKey::DryRunFile,
        MessageKey::DryRunSummary,
        MessageKey::DryRunOrphanRestore,
        MessageKey::DryRunOrphanRemove,
    ];

    /// Key as written in locale files.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKey::SelectDir => "select_dir",
            MessageKey::Quit => "quit",
            MessageKey::NoDirSelected => "no_dir_selected",
            MessageKey::WillBeAppliedToZero => "will_be_applied_to_zero",
            MessageKey::Pwd => "pwd",
            MessageKey::AddPwdProtection => "add_pwd_protection",
            MessageKey::RemovePwdProtection => "remove_pwd_protection",
            MessageKey::RemovePwdProtectionCheckbox => "remove_pwd_protection_checkbox",
            MessageKey::PdfsWereFound => "pdfs_were_found",
            MessageKey::NoPwdProvided => "no_pwd_provided",
            MessageKey::DirsAreBeingSearched => "dirs_are_being_searched",
            MessageKey::PdfsWereModified => "pdfs_were_modified",
            MessageKey::Success => "success",
            MessageKey::PdfFailed => "pdf_failed",
            MessageKey::OrphansFound => "orphans_found",
            MessageKey::OrphanRestored => "orphan_restored",
            MessageKey::OrphanRemoved => "orphan_removed",
            MessageKey::Cancelled => "cancelled",
            MessageKey::RunIncomplete => "run_incomplete",
            MessageKey::DryRunFile => "dry_run_file",
            MessageKey::DryRunSummary => "dry_run_summary",
            MessageKey::DryRunOrphanRestore => "dry_run_orphan_restore",
            MessageKey::DryRunOrphanRemove => "dry_run_orphan_remove",
        }
    }

    /// Built-in English template.
    pub fn default_template(&self) -> &'static str {
        match self {
            MessageKey::SelectDir => "Select directory",
            MessageKey::Quit => "Quit",
            MessageKey::NoDirSelected => "No directory selected",
            MessageKey::WillBeAppliedToZero => "No PDFs will be modified",
            MessageKey::Pwd => "Password:",
            MessageKey::AddPwdProtection => "Protect PDFs with password",
            MessageKey::RemovePwdProtection => "Remove passwords from PDFs",
            MessageKey::RemovePwdProtectionCheckbox => "Remove password?",
            MessageKey::PdfsWereFound => "{file_count} PDFs were found",
            MessageKey::NoPwdProvided => "No password was specified",
            MessageKey::DirsAreBeingSearched => "Directories are being searched",
            MessageKey::PdfsWereModified => "PDF was {mode_label} ({current_path})",
            MessageKey::Success => "Success: {file_count} PDFs were {mode_label}",
            MessageKey::PdfFailed => "PDF was not modified ({current_path}): {error}",
            MessageKey::OrphansFound => {
                "{file_count} leftover temporary files were found, run `pdflock recover` to resolve them"
            }
            MessageKey::OrphanRestored => "Restored interrupted replacement ({current_path})",
            MessageKey::OrphanRemoved => "Removed stale temporary file ({current_path})",
            MessageKey::Cancelled => "Cancelled: {succeeded} of {file_count} PDFs were {mode_label}",
            MessageKey::RunIncomplete => {
                "{succeeded} of {file_count} PDFs were {mode_label}, {failed} failed"
            }
            MessageKey::DryRunFile => "PDF would be {mode_label} ({current_path})",
            MessageKey::DryRunSummary => "Dry run: {file_count} PDFs would be {mode_label}",
            MessageKey::DryRunOrphanRestore => "Would restore interrupted replacement ({current_path})",
            MessageKey::DryRunOrphanRemove => "Would remove stale temporary file ({current_path})",
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageKey {
    type Err = PdfLockError;

    fn from_str(s: &str) -> Result<Self> {
        MessageKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| PdfLockError::other(format!("Unknown message key: {s}")))
    }
}

/// Values available to templates.
///
/// Unset values leave their placeholder untouched.
#[derive(Debug, Clone, Default)]
pub struct MessageArgs {
    values: Vec<(&'static str, String)>,
}

impl MessageArgs {
    /// Empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// `{file_count}`
    pub fn file_count(self, count: usize) -> Self {
        self.with("file_count", count.to_string())
    }

    /// `{current_path}`
    pub fn current_path(self, path: &Path) -> Self {
        self.with("current_path", path.display().to_string())
    }

    /// `{mode_label}`
    pub fn mode_label(self, label: &str) -> Self {
        self.with("mode_label", label.to_string())
    }

    /// `{succeeded}`
    pub fn succeeded(self, count: usize) -> Self {
        self.with("succeeded", count.to_string())
    }

    /// `{failed}`
    pub fn failed(self, count: usize) -> Self {
        self.with("failed", count.to_string())
    }

    /// `{error}`
    pub fn error(self, message: impl fmt::Display) -> Self {
        self.with("error", message.to_string())
    }

    fn with(mut self, name: &'static str, value: String) -> Self {
        match self.values.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name, value)),
        }
        self
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Substitute `{name}` placeholders in a single left-to-right pass.
///
/// Substituted values are never rescanned, so a value containing braces is
/// emitted as-is.
pub fn render_template(template: &str, args: &MessageArgs) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match args.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

/// Message templates for one language.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    overrides: HashMap<MessageKey, String>,
}

impl Catalog {
    /// Catalog with only the built-in English templates.
    pub fn defaults() -> Self {
        Self::default()
    }

    /// Load a locale file.
    ///
    /// A missing file is not an error: the defaults are used and a warning
    /// is logged.
    ///
    /// # Errors
    ///
    /// Returns [`PdfLockError::InvalidLocale`] if the file exists but cannot
    /// be read or is not a JSON object of strings.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    path = %path.display(),
                    "localization file not found, using built-in English messages"
                );
                return Ok(Self::defaults());
            }
            Err(e) => {
                return Err(PdfLockError::InvalidLocale {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        };

        Self::from_json(&content).map_err(|e| match e {
            PdfLockError::Other { message } => PdfLockError::InvalidLocale {
                path: path.to_path_buf(),
                reason: message,
            },
            other => other,
        })
    }

    /// Parse a catalog from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not an object mapping strings to strings.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: HashMap<String, String> =
            serde_json::from_str(json).map_err(|e| PdfLockError::other(e.to_string()))?;

        let mut overrides = HashMap::with_capacity(entries.len());
        for (name, template) in entries {
            match name.parse::<MessageKey>() {
                Ok(key) => {
                    overrides.insert(key, template);
                }
                Err(_) => tracing::debug!(key = %name, "ignoring unknown message key"),
            }
        }

        Ok(Self { overrides })
    }

    /// Template for `key`, falling back to English.
    pub fn get(&self, key: MessageKey) -> &str {
        self.overrides
            .get(&key)
            .map(String::as_str)
            .unwrap_or_else(|| key.default_template())
    }

    /// Render `key` with `args`.
    pub fn render(&self, key: MessageKey, args: &MessageArgs) -> String {
        render_template(self.get(key), args)
    }
}
