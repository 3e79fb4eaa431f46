//! Cryptographic primitives for FieldSeal.
//!
//! This module provides:
//! - AES-256-CTR stream encryption and decryption (`cipher`)
//! - Argon2id passphrase-based key derivation (`kdf`)
//! - The zeroizing secret key holder and its fingerprint (`keys`)

pub mod cipher;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_key, ...};
pub use cipher::{decrypt, encrypt, IV_LEN, KEY_LEN};
pub use kdf::{derive_key, derive_key_with_params, Argon2Params, DEFAULT_KEY_SALT};
pub use keys::SecretKey;
