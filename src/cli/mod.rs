//! CLI module: clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::Path;

use clap::Parser;

use crate::codec::FieldCodec;
use crate::config::Settings;
use crate::errors::{FieldSealError, Result};

/// FieldSeal CLI: field-level encryption for medical records.
#[derive(Parser)]
#[command(
    name = "fieldseal",
    about = "Field-level encryption for medical records",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file (default: ./.fieldseal.toml if present)
    #[arg(short, long, global = true, env = "FIELDSEAL_CONFIG")]
    pub config: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Encrypt a text value into its stored hex form
    Encrypt {
        /// Text to encrypt (omit to read stdin or prompt)
        text: Option<String>,
    },

    /// Decrypt a stored hex value (fails on anything malformed)
    Decrypt {
        /// Hex-encoded encrypted value
        value: String,
    },

    /// Decrypt a stored value if encrypted, otherwise print it unchanged
    Reveal {
        /// Stored value, encrypted or legacy plaintext
        value: String,
    },

    /// Encrypt a document into a sealed attachment (JSON)
    SealFile {
        /// Document to seal
        path: String,
        /// Output file (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Decrypt a sealed attachment
    OpenFile {
        /// Sealed attachment JSON
        sealed: String,
        /// Write the decrypted document here (prints a data URL if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Encrypt the sensitive fields of a JSON record
    SealRecord {
        /// Record JSON file, or `-` for stdin
        file: String,
        /// Record kind (patient, appointment, exam, consultation, treatment, medication, condition)
        #[arg(short, long)]
        kind: String,
        /// Decrypt already-encrypted fields first and re-seal everything
        #[arg(long)]
        migrate: bool,
    },

    /// Decrypt the sensitive fields of a JSON record, tolerating plaintext
    OpenRecord {
        /// Record JSON file, or `-` for stdin
        file: String,
        /// Record kind
        #[arg(short, long)]
        kind: String,
    },

    /// Show the key fingerprint, or check it against an expected one
    Fingerprint {
        /// Expected fingerprint; exits non-zero on mismatch
        #[arg(long)]
        check: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load settings from `--config`, or from the working directory.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    match &cli.config {
        Some(path) => Settings::load_file(Path::new(path)),
        None => Settings::load(&std::env::current_dir()?),
    }
}

/// Build the field codec from settings and the passphrase environment.
///
/// Warns on stderr when the insecure built-in passphrase is in use.
pub fn build_codec(cli: &Cli) -> Result<FieldCodec> {
    let settings = load_settings(cli)?;
    let passphrase = settings.resolve_passphrase();

    if passphrase.is_insecure_default() {
        output::warning(&format!(
            "{} is not set — using the built-in insecure passphrase.",
            settings.passphrase_env
        ));
    }

    FieldCodec::with_passphrase(&settings, &passphrase)
}

/// Read a text value from the argument, piped stdin, or a hidden prompt.
pub fn read_text(value: Option<&str>, prompt: &str) -> Result<String> {
    if let Some(v) = value {
        output::warning("Value provided on command line — it may appear in shell history.");
        return Ok(v.to_string());
    }

    if !io::stdin().is_terminal() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf.trim_end_matches(['\r', '\n']).to_string());
    }

    dialoguer::Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map_err(|e| FieldSealError::CommandFailed(format!("input prompt: {e}")))
}

/// Read a whole file, or stdin when `path` is `-`.
pub fn read_source(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}
