use std::string::FromUtf8Error;

use thiserror::Error;

/// All errors that can occur in FieldSeal.
#[derive(Debug, Error)]
pub enum FieldSealError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Encrypted payload too short: {len} bytes, need at least {min}")]
    PayloadTooShort { len: usize, min: usize },

    #[error("Encrypted value is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Decrypted value is not valid UTF-8 — wrong key or corrupted data")]
    InvalidUtf8(#[from] FromUtf8Error),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Key fingerprint mismatch — this process derives a different key")]
    KeyMismatch,

    // --- Storage-facing errors ---
    #[error("Attachment is corrupted: {0}")]
    AttachmentCorrupted(String),

    #[error("Record error: {0}")]
    RecordError(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for FieldSeal results.
pub type Result<T> = std::result::Result<T, FieldSealError>;
