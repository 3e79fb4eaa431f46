//! `fieldseal seal-record` / `open-record`: transform the sensitive
//! fields of a JSON record.
//!
//! The transformed record is printed to stdout; a per-field summary
//! goes to stderr.

use serde_json::Value;

use crate::cli::output;
use crate::cli::{build_codec, load_settings, read_source, Cli};
use crate::errors::{FieldSealError, Result};
use crate::record::{self, OpenReport, RecordKind, SealReport};

/// Execute the `seal-record` command.
pub fn execute_seal(cli: &Cli, file: &str, kind: &str, migrate: bool) -> Result<()> {
    let kind: RecordKind = kind.parse()?;
    let fields = kind.sensitive_fields(&load_settings(cli)?);
    let mut value = parse_record(&read_source(file)?)?;
    let codec = build_codec(cli)?;

    let sealed = {
        let rec = record::as_record(&mut value)?;
        if migrate {
            let (opened, sealed) = record::migrate_record(&codec, rec, &fields)?;
            if !opened.passthrough.is_empty() {
                output::info(&format!(
                    "{} legacy plaintext field(s) encrypted",
                    opened.passthrough.len()
                ));
            }
            sealed
        } else {
            record::seal_record(&codec, rec, &fields)?
        }
    };

    print_record(&value)?;
    output::print_field_table(&seal_rows(&sealed));
    output::success(&format!("Sealed {} field(s) of {kind} record", sealed.sealed.len()));

    if !sealed.already_sealed.is_empty() {
        output::tip("Already-sealed fields were left as is; use `--migrate` to refresh them.");
    }

    Ok(())
}

/// Execute the `open-record` command.
pub fn execute_open(cli: &Cli, file: &str, kind: &str) -> Result<()> {
    let kind: RecordKind = kind.parse()?;
    let fields = kind.sensitive_fields(&load_settings(cli)?);
    let mut value = parse_record(&read_source(file)?)?;
    let codec = build_codec(cli)?;

    let opened = record::open_record(&codec, record::as_record(&mut value)?, &fields);

    print_record(&value)?;
    output::print_field_table(&open_rows(&opened));

    if !opened.passthrough.is_empty() {
        output::tip("Plaintext fields can be encrypted with `fieldseal seal-record --migrate`.");
    }

    Ok(())
}

fn parse_record(json: &str) -> Result<Value> {
    serde_json::from_str(json)
        .map_err(|e| FieldSealError::SerializationError(format!("record JSON: {e}")))
}

fn print_record(value: &Value) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| FieldSealError::SerializationError(format!("record JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

fn seal_rows(report: &SealReport) -> Vec<(String, &'static str)> {
    let sealed = report.sealed.iter().map(|f| (f.clone(), "sealed"));
    let kept = report.already_sealed.iter().map(|f| (f.clone(), "already sealed"));
    let skipped = report.skipped.iter().map(|f| (f.clone(), "skipped"));
    sealed.chain(kept).chain(skipped).collect()
}

fn open_rows(report: &OpenReport) -> Vec<(String, &'static str)> {
    let decrypted = report.decrypted.iter().map(|f| (f.clone(), "decrypted"));
    let plain = report.passthrough.iter().map(|f| (f.clone(), "plaintext"));
    let skipped = report.skipped.iter().map(|f| (f.clone(), "skipped"));
    decrypted.chain(plain).chain(skipped).collect()
}
