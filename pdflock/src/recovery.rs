//! Resolution of temporary files left behind by an interrupted run.
//!
//! A transform writes `<name>.pdf.tmp`, removes `<name>.pdf`, then renames
//! the temp file into place. A process killed part way leaves one of two
//! states on disk:
//!
//! - target present: the commit never started and the temp file is stale
//! - target missing: the original was removed and the temp file is the
//!   complete replacement
//!
//! [`resolve`] restores the second case and discards the first.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{PdfLockError, Result};
use crate::locator::{TEMP_SUFFIX, locate_orphans};

/// A leftover temp file and the file it was meant to replace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Orphan {
    /// The `<name>.pdf.tmp` file.
    pub temp: PathBuf,
    /// The `<name>.pdf` file.
    pub target: PathBuf,
    /// Whether `target` existed when the orphan was found.
    pub target_exists: bool,
}

impl Orphan {
    /// Describe the orphan at `temp`, or `None` if `temp` lacks the suffix.
    pub fn from_temp(temp: impl Into<PathBuf>) -> Option<Self> {
        let temp = temp.into();
        let target = target_of(&temp)?;
        let target_exists = target.exists();

        Some(Self {
            temp,
            target,
            target_exists,
        })
    }
}

/// What [`resolve`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Resolution {
    /// The temp file was renamed onto its missing target.
    Restored,
    /// The temp file was deleted; the target was intact.
    Removed,
}

/// Find every orphaned temp file under `root`, sorted by path.
pub fn find_orphans(root: impl AsRef<Path>) -> Vec<Orphan> {
    locate_orphans(root)
        .into_iter()
        .filter_map(Orphan::from_temp)
        .collect()
}

/// Resolve one orphan.
///
/// The target's presence is checked again here, not taken from
/// [`Orphan::target_exists`].
///
/// # Errors
///
/// Returns [`PdfLockError::FailedToReplace`] if the rename or delete fails.
pub fn resolve(orphan: &Orphan) -> Result<Resolution> {
    if orphan.target.exists() {
        std::fs::remove_file(&orphan.temp).map_err(|e| PdfLockError::FailedToReplace {
            path: orphan.temp.clone(),
            source: e,
        })?;
        tracing::info!(temp = %orphan.temp.display(), "removed stale temporary file");
        Ok(Resolution::Removed)
    } else {
        std::fs::rename(&orphan.temp, &orphan.target).map_err(|e| {
            PdfLockError::FailedToReplace {
                path: orphan.target.clone(),
                source: e,
            }
        })?;
        tracing::info!(target = %orphan.target.display(), "restored interrupted replacement");
        Ok(Resolution::Restored)
    }
}

/// Resolve every orphan, continuing past failures.
pub fn resolve_all(orphans: &[Orphan]) -> Vec<(Orphan, Result<Resolution>)> {
    orphans
        .iter()
        .map(|orphan| {
            let result = resolve(orphan);
            if let Err(err) = &result {
                tracing::warn!(temp = %orphan.temp.display(), error = %err, "could not resolve temporary file");
            }
            (orphan.clone(), result)
        })
        .collect()
}

fn target_of(temp: &Path) -> Option<PathBuf> {
    let name = temp.file_name()?.to_str()?;
    let stem = name.strip_suffix(TEMP_SUFFIX)?;
    if stem.is_empty() {
        return None;
    }
    Some(temp.with_file_name(stem))
}
