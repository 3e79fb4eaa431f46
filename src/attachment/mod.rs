//! Exam and consultation documents, encrypted at rest.
//!
//! A document is sealed into a `SealedAttachment` before it is written to
//! storage and opened again on every read.  In JSON the encrypted payload
//! (`IV || ciphertext`) travels as a base64 string.

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::FieldCodec;
use crate::crypto::cipher::IV_LEN;
use crate::errors::{FieldSealError, Result};

/// Fallback MIME type for unknown extensions.
const OCTET_STREAM: &str = "application/octet-stream";

/// An encrypted document as it is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SealedAttachment {
    /// Original file name, e.g. "hemograma.pdf".
    pub file_name: String,

    pub mime_type: String,

    /// Plaintext length in bytes.
    pub size: usize,

    pub sealed_at: DateTime<Utc>,

    /// `IV || ciphertext`, base64 in JSON.
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub payload: Vec<u8>,
}

/// A decrypted document, ready to hand to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl Attachment {
    /// `data:<mime>;base64,<data>` for inline display.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, BASE64.encode(&self.data))
    }
}

/// Encrypt a document's bytes for storage.
pub fn seal(codec: &FieldCodec, file_name: &str, data: &[u8]) -> Result<SealedAttachment> {
    let payload = codec.encrypt(data)?;

    Ok(SealedAttachment {
        file_name: file_name.to_string(),
        mime_type: guess_mime_type(file_name).to_string(),
        size: data.len(),
        sealed_at: Utc::now(),
        payload,
    })
}

/// Read a file from disk and seal it under its own file name.
pub fn seal_file(codec: &FieldCodec, path: &Path) -> Result<SealedAttachment> {
    let data = fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            FieldSealError::AttachmentCorrupted(format!("{} has no file name", path.display()))
        })?;

    seal(codec, &file_name, &data)
}

impl SealedAttachment {
    /// Decrypt the payload.  The length must match the recorded size;
    /// nothing else about the content can be checked.
    pub fn open(&self, codec: &FieldCodec) -> Result<Attachment> {
        let data = codec.decrypt(&self.payload)?;

        if data.len() != self.size {
            return Err(FieldSealError::AttachmentCorrupted(format!(
                "{}: expected {} bytes, payload holds {}",
                self.file_name,
                self.size,
                self.payload.len().saturating_sub(IV_LEN)
            )));
        }

        Ok(Attachment {
            file_name: self.file_name.clone(),
            mime_type: self.mime_type.clone(),
            data,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| FieldSealError::SerializationError(format!("sealed attachment: {e}")))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| FieldSealError::SerializationError(format!("sealed attachment: {e}")))
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn read_from(path: &Path) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

/// MIME type from the file extension.
pub fn guess_mime_type(file_name: &str) -> &'static str {
    let ext = match file_name.rsplit_once('.') {
        Some((_, ext)) => ext.to_ascii_lowercase(),
        None => return OCTET_STREAM,
    };

    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "txt" => "text/plain",
        "dcm" => "application/dicom",
        _ => OCTET_STREAM,
    }
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded binary fields
// ---------------------------------------------------------------------------

fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&BASE64.encode(data))
}

fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}
