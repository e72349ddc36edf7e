//! pdflock - Batch-apply or remove password protection on PDF files.
//!
//! A CLI tool that encrypts or decrypts every PDF in a directory tree.

mod cli;

use clap::Parser;
use std::path::Path;
use std::process;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use pdflock::batch::{BatchRunner, CancelFlag};
use pdflock::config::{Config, Operation};
use pdflock::error::{PdfLockError, Result};
use pdflock::i18n::{Catalog, MessageArgs, MessageKey};
use pdflock::locator::{FileRecord, locate};
use pdflock::output::{OutputFormatter, display_progress, display_summary};
use pdflock::policy::TransformPolicy;
use pdflock::recovery::{self, Resolution};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Run the application and handle errors
    if let Err(err) = run(cli).await {
        if !already_reported(&err) {
            eprintln!("Error: {err}");
        }
        process::exit(err.exit_code());
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the default filter.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "pdflock=debug" } else { "warn" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Run outcomes whose localized message was already printed.
fn already_reported(err: &PdfLockError) -> bool {
    matches!(
        err,
        PdfLockError::MissingPassword
            | PdfLockError::Cancelled
            | PdfLockError::FilesFailed { .. }
    )
}

/// Main application logic.
async fn run(cli: Cli) -> Result<()> {
    let config = cli.to_config()?;

    let formatter = OutputFormatter::from_config(&config);
    let catalog = match &config.locale {
        Some(path) => Catalog::load(path)?,
        None => Catalog::defaults(),
    };

    formatter.debug(&format!("{} v{}", pdflock::NAME, pdflock::VERSION));
    formatter.detail("Directory", &config.root.display().to_string());

    match &config.operation {
        Operation::Transform(policy) => transform(&config, policy, &formatter, &catalog).await,
        Operation::Scan => scan(&config, &formatter, &catalog).await,
        Operation::Recover => recover(&config, &formatter, &catalog).await,
    }
}

async fn transform(
    config: &Config,
    policy: &TransformPolicy,
    formatter: &OutputFormatter,
    catalog: &Catalog,
) -> Result<()> {
    let files = find_files(&config.root, formatter, catalog).await?;
    warn_orphans(&config.root, formatter, catalog).await?;

    let cancel = CancelFlag::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupt received, stopping after the current file");
                cancel.cancel();
            }
        })
    };

    let runner = BatchRunner::new(config.batch_options());
    let mut handle = runner.spawn(files, policy.clone(), cancel);

    while let Some(event) = handle.next_event().await {
        display_progress(formatter, catalog, &event, policy.mode);
    }

    let summary = handle.join().await?;
    interrupt.abort();

    formatter.blank_line();
    display_summary(formatter, catalog, &summary, policy.mode, config.dry_run);

    summary.into_result().map(|_| ())
}

async fn scan(config: &Config, formatter: &OutputFormatter, catalog: &Catalog) -> Result<()> {
    if !config.root.is_dir() {
        formatter.info(&catalog.render(MessageKey::NoDirSelected, &MessageArgs::new()));
    }

    let files = find_files(&config.root, formatter, catalog).await?;
    for (idx, file) in files.iter().enumerate() {
        formatter.list_item(idx + 1, &file.path.display().to_string());
    }

    warn_orphans(&config.root, formatter, catalog).await
}

async fn recover(config: &Config, formatter: &OutputFormatter, catalog: &Catalog) -> Result<()> {
    let root = config.root.clone();
    let orphans = tokio::task::spawn_blocking(move || recovery::find_orphans(root))
        .await
        .map_err(|e| PdfLockError::other(format!("Directory search failed: {e}")))?;

    formatter.info(&catalog.render(
        MessageKey::OrphansFound,
        &MessageArgs::new().file_count(orphans.len()),
    ));

    if config.dry_run {
        for orphan in &orphans {
            let key = if orphan.target_exists {
                MessageKey::DryRunOrphanRemove
            } else {
                MessageKey::DryRunOrphanRestore
            };
            formatter.info(&catalog.render(key, &MessageArgs::new().current_path(&orphan.temp)));
        }
        return Ok(());
    }

    let results = tokio::task::spawn_blocking(move || recovery::resolve_all(&orphans))
        .await
        .map_err(|e| PdfLockError::other(format!("Recovery failed: {e}")))?;

    let total = results.len();
    let mut failed = 0;
    for (orphan, result) in results {
        match result {
            Ok(Resolution::Restored) => formatter.success(&catalog.render(
                MessageKey::OrphanRestored,
                &MessageArgs::new().current_path(&orphan.target),
            )),
            Ok(Resolution::Removed) => formatter.info(&catalog.render(
                MessageKey::OrphanRemoved,
                &MessageArgs::new().current_path(&orphan.temp),
            )),
            Err(err) => {
                failed += 1;
                formatter.error(&catalog.render(
                    MessageKey::PdfFailed,
                    &MessageArgs::new().current_path(&orphan.temp).error(&err),
                ));
            }
        }
    }

    if failed > 0 {
        return Err(PdfLockError::FilesFailed { failed, total });
    }
    Ok(())
}

/// Locate PDFs off the async runtime and report how many were found.
async fn find_files(
    root: &Path,
    formatter: &OutputFormatter,
    catalog: &Catalog,
) -> Result<Vec<FileRecord>> {
    formatter.info(&catalog.render(MessageKey::DirsAreBeingSearched, &MessageArgs::new()));

    let root = root.to_path_buf();
    let files = tokio::task::spawn_blocking(move || locate(root))
        .await
        .map_err(|e| PdfLockError::other(format!("Directory search failed: {e}")))?;

    formatter.info(&catalog.render(
        MessageKey::PdfsWereFound,
        &MessageArgs::new().file_count(files.len()),
    ));

    Ok(files)
}

/// Warn about leftover temporary files without resolving them.
async fn warn_orphans(root: &Path, formatter: &OutputFormatter, catalog: &Catalog) -> Result<()> {
    let root = root.to_path_buf();
    let orphans = tokio::task::spawn_blocking(move || recovery::find_orphans(root))
        .await
        .map_err(|e| PdfLockError::other(format!("Directory search failed: {e}")))?;

    if orphans.is_empty() {
        return Ok(());
    }

    tracing::warn!(count = orphans.len(), "leftover temporary files found");
    formatter.warning(&catalog.render(
        MessageKey::OrphansFound,
        &MessageArgs::new().file_count(orphans.len()),
    ));
    Ok(())
}
