//! AES-256-CTR stream encryption.
//!
//! Each call to `encrypt` draws a fresh random 16-byte IV from the OS
//! and prepends it to the ciphertext.  `decrypt` splits the IV back out
//! before running the keystream over the rest.
//!
//! Layout of the returned byte buffer:
//!   [ 16-byte IV | ciphertext (same length as plaintext) ]
//!
//! There is no authentication tag.  A flipped ciphertext bit flips the
//! same plaintext bit on decryption and nothing reports it.

use ctr::cipher::{KeyIvInit, StreamCipher};
use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::errors::{FieldSealError, Result};

/// AES-256 with a 128-bit big-endian counter block.
type Aes256Ctr = ctr::Ctr128BE<aes::Aes256>;

/// Size of the IV in bytes (one AES block).
pub const IV_LEN: usize = 16;

/// Size of the cipher key in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// Encrypt `plaintext` with a 32-byte `key`.
///
/// Returns the IV prepended to the ciphertext (IV || ciphertext).
/// The only failure is the OS random source being unavailable.
pub fn encrypt(key: &[u8; KEY_LEN], plaintext: &[u8]) -> Result<Vec<u8>> {
    let mut iv = [0u8; IV_LEN];
    OsRng
        .try_fill_bytes(&mut iv)
        .map_err(|e| FieldSealError::EncryptionFailed(format!("OS random source: {e}")))?;

    let mut output = Vec::with_capacity(IV_LEN + plaintext.len());
    output.extend_from_slice(&iv);
    output.extend_from_slice(plaintext);

    let mut cipher = Aes256Ctr::new(key[..].into(), iv[..].into());
    cipher.apply_keystream(&mut output[IV_LEN..]);

    Ok(output)
}

/// Decrypt data that was produced by `encrypt`.
///
/// Expects the first 16 bytes to be the IV, followed by the ciphertext.
pub fn decrypt(key: &[u8; KEY_LEN], payload: &[u8]) -> Result<Vec<u8>> {
    if payload.len() < IV_LEN {
        return Err(FieldSealError::PayloadTooShort {
            len: payload.len(),
            min: IV_LEN,
        });
    }

    let (iv, ciphertext) = payload.split_at(IV_LEN);
    let mut plaintext = ciphertext.to_vec();

    let mut cipher = Aes256Ctr::new(key[..].into(), iv.into());
    cipher.apply_keystream(&mut plaintext);

    Ok(plaintext)
}
