//! Sensitive-field sealing for stored records.
//!
//! The persistence layer hands records over as JSON objects.  Each
//! `RecordKind` knows which of its fields carry personal health data;
//! `seal_record` encrypts those before a write and `open_record` reads
//! them back through the tolerant path, so a table holding a mix of
//! legacy plaintext rows and encrypted rows reads cleanly.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::codec::{FieldCodec, SafeDecrypt};
use crate::config::Settings;
use crate::errors::{FieldSealError, Result};

/// Kinds of record the application stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Patient,
    Appointment,
    Exam,
    Consultation,
    Treatment,
    Medication,
    Condition,
}

impl RecordKind {
    pub const ALL: [RecordKind; 7] = [
        RecordKind::Patient,
        RecordKind::Appointment,
        RecordKind::Exam,
        RecordKind::Consultation,
        RecordKind::Treatment,
        RecordKind::Medication,
        RecordKind::Condition,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Patient => "patient",
            RecordKind::Appointment => "appointment",
            RecordKind::Exam => "exam",
            RecordKind::Consultation => "consultation",
            RecordKind::Treatment => "treatment",
            RecordKind::Medication => "medication",
            RecordKind::Condition => "condition",
        }
    }

    /// Built-in list of fields holding personal health data.
    pub fn default_sensitive_fields(self) -> &'static [&'static str] {
        match self {
            RecordKind::Patient => &["name", "birth_date", "document_number", "phone", "address"],
            RecordKind::Appointment => &["doctor", "specialty", "location", "date", "notes"],
            RecordKind::Exam => &["name", "date", "laboratory", "result", "notes"],
            RecordKind::Consultation => &["doctor", "date", "reason", "diagnosis", "notes"],
            RecordKind::Treatment => &["name", "start_date", "end_date", "prescriber", "notes"],
            RecordKind::Medication => &["name", "dosage", "frequency", "prescriber", "notes"],
            RecordKind::Condition => &["name", "code", "diagnosed_at", "notes"],
        }
    }

    /// Sensitive fields for this kind, honouring any settings override.
    pub fn sensitive_fields(self, settings: &Settings) -> Vec<String> {
        match settings.sensitive_fields_for(self.as_str()) {
            Some(fields) => fields.to_vec(),
            None => self
                .default_sensitive_fields()
                .iter()
                .map(|f| f.to_string())
                .collect(),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = FieldSealError;

    fn from_str(s: &str) -> Result<Self> {
        RecordKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let known: Vec<&str> = RecordKind::ALL.iter().map(|k| k.as_str()).collect();
                FieldSealError::RecordError(format!(
                    "unknown record kind '{s}' (expected one of: {})",
                    known.join(", ")
                ))
            })
    }
}

/// Counts from a `seal_record` call.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SealReport {
    /// Fields that were encrypted.
    pub sealed: Vec<String>,
    /// Fields that already decrypt under this key and were left alone.
    pub already_sealed: Vec<String>,
    /// Listed fields that were absent, null, or not strings.
    pub skipped: Vec<String>,
}

/// Counts from an `open_record` call.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OpenReport {
    /// Fields that held ciphertext and were decrypted.
    pub decrypted: Vec<String>,
    /// Fields returned as stored (legacy plaintext or undecodable).
    pub passthrough: Vec<String>,
    /// Listed fields that were absent, null, or not strings.
    pub skipped: Vec<String>,
}

/// Encrypt every listed string field in place.
///
/// Fields that already hold ciphertext for this codec are not wrapped a
/// second time; use `migrate_record` to refresh their IVs.
pub fn seal_record<S: AsRef<str>>(
    codec: &FieldCodec,
    record: &mut Map<String, Value>,
    fields: &[S],
) -> Result<SealReport> {
    let mut report = SealReport::default();

    for field in fields {
        let field = field.as_ref();
        match record.get_mut(field) {
            Some(Value::String(value)) if codec.safe_decrypt(value).is_decrypted() => {
                report.already_sealed.push(field.to_string());
            }
            Some(Value::String(value)) => {
                *value = codec.encrypt_string(value)?;
                report.sealed.push(field.to_string());
            }
            _ => report.skipped.push(field.to_string()),
        }
    }

    Ok(report)
}

/// Decrypt every listed string field in place, tolerating plaintext.
pub fn open_record<S: AsRef<str>>(
    codec: &FieldCodec,
    record: &mut Map<String, Value>,
    fields: &[S],
) -> OpenReport {
    let mut report = OpenReport::default();

    for field in fields {
        let field = field.as_ref();
        let Some(Value::String(value)) = record.get_mut(field) else {
            report.skipped.push(field.to_string());
            continue;
        };

        match codec.safe_decrypt(value) {
            SafeDecrypt::Decrypted(text) => {
                *value = text;
                report.decrypted.push(field.to_string());
            }
            SafeDecrypt::Passthrough(_) => report.passthrough.push(field.to_string()),
        }
    }

    if !report.passthrough.is_empty() {
        tracing::debug!(fields = ?report.passthrough, "record fields read as plaintext");
    }
    report
}

/// Bring a record up to date: legacy plaintext gets encrypted and
/// already-encrypted fields get a fresh IV.
pub fn migrate_record<S: AsRef<str>>(
    codec: &FieldCodec,
    record: &mut Map<String, Value>,
    fields: &[S],
) -> Result<(OpenReport, SealReport)> {
    let opened = open_record(codec, record, fields);
    let sealed = seal_record(codec, record, fields)?;
    Ok((opened, sealed))
}

/// Borrow a JSON value as a record object.
pub fn as_record(value: &mut Value) -> Result<&mut Map<String, Value>> {
    value
        .as_object_mut()
        .ok_or_else(|| FieldSealError::RecordError("record must be a JSON object".into()))
}
