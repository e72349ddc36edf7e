//! CLI argument parsing for pdflock.
//!
//! This module defines the command-line interface structure using `clap`.
//! It handles argument parsing, validation, and help text generation.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use pdflock::batch::ErrorPolicy;
use pdflock::config::{Config, Operation};
use pdflock::error::Result;
use pdflock::policy::{EncryptionStrength, TransformPolicy};

/// Batch-apply or remove password protection on PDF files.
///
/// pdflock searches a directory recursively for `.pdf` files and encrypts
/// or decrypts every one of them in place with a single password. Each
/// file is rewritten through a temporary sibling, so a failure leaves the
/// original untouched.
#[derive(Parser, Debug)]
#[command(name = "pdflock")]
#[command(version)]
#[command(about = "Batch-apply or remove password protection on PDF files", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Localization file (JSON object of message key to template)
    ///
    /// Keys missing from the file fall back to English. A missing file
    /// is not an error.
    #[arg(long, global = true, value_name = "FILE", env = "PDFLOCK_LOCALE")]
    pub locale: Option<PathBuf>,

    /// Verbose output - list files and show per-file progress counters
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all non-error output
    ///
    /// Only errors and warnings will be printed.
    /// Useful for scripts and automation.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run - report what would be modified without writing anything
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Stop after the first PDF that cannot be modified
    ///
    /// By default every PDF is attempted and failures are reported at
    /// the end.
    #[arg(long, global = true)]
    pub fail_fast: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Protect every PDF under DIR with a password
    ///
    /// Examples:
    ///   pdflock protect ./invoices secret123
    ///   PDFLOCK_PASSWORD=secret123 pdflock protect ./invoices
    Protect {
        /// Directory searched recursively
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        #[command(flatten)]
        password: PasswordArgs,

        /// Encryption strength
        #[arg(long, value_name = "STRENGTH", default_value = "rc4-128")]
        #[arg(value_parser = ["rc4-128", "rc4-40"])]
        strength: String,
    },

    /// Remove the password from every PDF under DIR
    Unprotect {
        /// Directory searched recursively
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        #[command(flatten)]
        password: PasswordArgs,
    },

    /// Count the PDFs under DIR without modifying them
    Scan {
        /// Directory searched recursively
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },

    /// Resolve temporary files left behind by an interrupted run
    Recover {
        /// Directory searched recursively
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct PasswordArgs {
    /// Password to apply or remove
    ///
    /// Prefer PDFLOCK_PASSWORD over the command line to keep the password
    /// out of shell history.
    #[arg(value_name = "PASSWORD", env = "PDFLOCK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl PasswordArgs {
    fn value(&self) -> String {
        self.password.clone().unwrap_or_default()
    }
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// A missing password is carried through as an empty one; the batch
    /// reports it.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Encryption strength is invalid
    /// - Configuration validation fails
    pub fn to_config(&self) -> Result<Config> {
        let (root, operation) = match &self.command {
            Command::Protect {
                dir,
                password,
                strength,
            } => {
                let strength: EncryptionStrength = strength.parse()?;
                let policy = TransformPolicy::protect(password.value()).with_strength(strength);
                (dir, Operation::Transform(policy))
            }
            Command::Unprotect { dir, password } => (
                dir,
                Operation::Transform(TransformPolicy::unprotect(password.value())),
            ),
            Command::Scan { dir } => (dir, Operation::Scan),
            Command::Recover { dir } => (dir, Operation::Recover),
        };

        let config = Config {
            root: root.clone(),
            operation,
            dry_run: self.dry_run,
            verbose: self.verbose,
            quiet: self.quiet,
            error_policy: if self.fail_fast {
                ErrorPolicy::StopOnFirstError
            } else {
                ErrorPolicy::Continue
            },
            locale: self.locale.clone(),
        };

        config.validate()?;

        Ok(config)
    }
}
