//! Directory scanning for candidate PDF files.
//!
//! The locator walks a root directory recursively and returns every regular
//! file whose extension is exactly `pdf`. A root that does not exist yields
//! an empty list, which is the "nothing selected yet" state of a caller.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

/// Extension of the files a run operates on.
pub const PDF_EXTENSION: &str = "pdf";

/// Suffix appended to an original file name while its replacement is written.
pub const TEMP_SUFFIX: &str = ".tmp";

/// One discovered file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FileRecord {
    /// Absolute path to the file.
    pub path: PathBuf,
}

impl FileRecord {
    /// Create a record, making `path` absolute against the current directory.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: absolutize(path.into()),
        }
    }

    /// Sibling path the replacement content is written to.
    pub fn temp_path(&self) -> PathBuf {
        temp_path_for(&self.path)
    }
}

/// Build `<original>.tmp` for `path`.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(TEMP_SUFFIX);
    PathBuf::from(name)
}

/// Locate every PDF under `root`.
///
/// Order is by path so repeated scans of an unchanged tree agree.
///
/// # Examples
///
/// ```no_run
/// use pdflock::locator::locate;
///
/// let files = locate("./invoices");
/// println!("{} PDFs were found", files.len());
/// ```
pub fn locate(root: impl AsRef<Path>) -> Vec<FileRecord> {
    let mut records: Vec<FileRecord> = walk_files(root.as_ref())
        .filter(|path| is_pdf(path))
        .map(FileRecord::new)
        .collect();

    records.sort();
    records
}

/// Locate leftover `<name>.pdf.tmp` files under `root`.
pub fn locate_orphans(root: impl AsRef<Path>) -> Vec<PathBuf> {
    let mut orphans: Vec<PathBuf> = walk_files(root.as_ref())
        .filter(|path| is_orphaned_temp(path))
        .map(absolutize)
        .collect();

    orphans.sort();
    orphans
}

/// Check whether `path` has the target extension.
///
/// Matching is case-sensitive: `report.PDF` is not picked up.
pub fn is_pdf(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == PDF_EXTENSION)
}

/// Check whether `path` looks like a replacement file left behind by a run.
pub fn is_orphaned_temp(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "tmp")
        && path.file_stem().map(Path::new).is_some_and(is_pdf)
}

fn walk_files(root: &Path) -> impl Iterator<Item = PathBuf> {
    let walker = if root.is_dir() {
        Some(WalkDir::new(root).follow_links(false))
    } else {
        tracing::debug!(root = %root.display(), "root is not a directory, nothing to scan");
        None
    };

    walker
        .into_iter()
        .flatten()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
}

fn absolutize(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path,
    }
}
