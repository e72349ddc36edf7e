//! Output formatting and display for pdflock.
//!
//! This module handles all user-facing output including:
//! - Formatted status messages
//! - Per-file progress lines
//! - Run summaries
//!
//! Every line shown to the user is rendered from the localization
//! [`Catalog`], so a locale file changes all of them.
//!
//! # Examples
//!
//! ```no_run
//! use pdflock::output::OutputFormatter;
//! use pdflock::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Directories are being searched");
//! # }
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::batch::{ProgressEvent, RunStatus, RunSummary};
use crate::i18n::{Catalog, MessageArgs, MessageKey};
use crate::policy::Mode;

/// Line reported after one file.
pub fn progress_message(catalog: &Catalog, event: &ProgressEvent, mode: Mode) -> (MessageLevel, String) {
    let args = MessageArgs::new()
        .current_path(&event.outcome.path)
        .mode_label(mode.label())
        .file_count(event.total);

    match &event.outcome.error {
        None if event.dry_run => (
            MessageLevel::Info,
            catalog.render(MessageKey::DryRunFile, &args),
        ),
        None => (
            MessageLevel::Info,
            catalog.render(MessageKey::PdfsWereModified, &args),
        ),
        Some(err) => (
            MessageLevel::Warning,
            catalog.render(MessageKey::PdfFailed, &args.error(err)),
        ),
    }
}

/// Line reported at the end of a run.
///
/// A dry run never claims success, since nothing was written.
pub fn summary_message(
    catalog: &Catalog,
    summary: &RunSummary,
    mode: Mode,
    dry_run: bool,
) -> (MessageLevel, String) {
    let args = MessageArgs::new()
        .file_count(summary.total_files)
        .mode_label(mode.label())
        .succeeded(summary.succeeded)
        .failed(summary.failed);

    match summary.status {
        RunStatus::MissingPassword => (
            MessageLevel::Error,
            catalog.render(MessageKey::NoPwdProvided, &args),
        ),
        RunStatus::Cancelled => (
            MessageLevel::Warning,
            catalog.render(MessageKey::Cancelled, &args),
        ),
        _ if summary.total_files == 0 => (
            MessageLevel::Info,
            catalog.render(MessageKey::WillBeAppliedToZero, &args),
        ),
        _ if dry_run => (
            MessageLevel::Info,
            catalog.render(MessageKey::DryRunSummary, &args),
        ),
        _ if summary.is_success() => (
            MessageLevel::Success,
            catalog.render(MessageKey::Success, &args),
        ),
        _ => (
            MessageLevel::Warning,
            catalog.render(MessageKey::RunIncomplete, &args),
        ),
    }
}

/// Display one progress event.
///
/// Successes are informational and hidden by `--quiet`; failures are
/// warnings and always shown.
pub fn display_progress(
    formatter: &OutputFormatter,
    catalog: &Catalog,
    event: &ProgressEvent,
    mode: Mode,
) {
    let (level, line) = progress_message(catalog, event, mode);
    match level {
        MessageLevel::Warning => formatter.warning(&line),
        _ => formatter.info(&line),
    }
    formatter.debug(&event.format_progress());
}

/// Display the final status of a run.
pub fn display_summary(
    formatter: &OutputFormatter,
    catalog: &Catalog,
    summary: &RunSummary,
    mode: Mode,
    dry_run: bool,
) {
    let (level, line) = summary_message(catalog, summary, mode, dry_run);
    match level {
        MessageLevel::Error => formatter.error(&line),
        MessageLevel::Warning => formatter.warning(&line),
        MessageLevel::Success => formatter.success(&line),
        _ => formatter.info(&line),
    }

    formatter.detail("Duration", &format!("{:.2}s", summary.duration.as_secs_f64()));
    if summary.skipped() > 0 {
        formatter.detail("Skipped", &summary.skipped().to_string());
    }
}
