//! The field codec's secret key.
//!
//! `SecretKey` owns the 32 derived bytes for the lifetime of the codec
//! and wipes them on drop.  Its fingerprint lets two deployments check
//! they derive the same key without ever exchanging it.

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use super::cipher::KEY_LEN;
use crate::errors::{FieldSealError, Result};

/// A 32-byte symmetric key that zeroes its memory when dropped.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct SecretKey {
    bytes: [u8; KEY_LEN],
}

impl SecretKey {
    /// Create a new `SecretKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to pass to the cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// SHA-256 of the key bytes, base64-encoded.
    pub fn fingerprint(&self) -> String {
        BASE64.encode(Sha256::digest(self.bytes))
    }

    /// Check this key against a fingerprint produced elsewhere.
    pub fn verify_fingerprint(&self, expected: &str) -> Result<()> {
        let actual = self.fingerprint();

        if actual
            .as_bytes()
            .ct_eq(expected.trim().as_bytes())
            .into()
        {
            Ok(())
        } else {
            Err(FieldSealError::KeyMismatch)
        }
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_deterministic() {
        let a = SecretKey::new([0x42; KEY_LEN]);
        let b = SecretKey::new([0x42; KEY_LEN]);
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn verify_fingerprint_accepts_matching_key() {
        let key = SecretKey::new([0x42; KEY_LEN]);
        let fp = key.fingerprint();
        assert!(key.verify_fingerprint(&fp).is_ok());
        assert!(key.verify_fingerprint(&format!("{fp}\n")).is_ok());
    }

    #[test]
    fn verify_fingerprint_rejects_other_key() {
        let key = SecretKey::new([0x42; KEY_LEN]);
        let other = SecretKey::new([0x43; KEY_LEN]);
        let err = key.verify_fingerprint(&other.fingerprint()).unwrap_err();
        assert!(matches!(err, FieldSealError::KeyMismatch));
    }

    #[test]
    fn debug_does_not_leak_key_bytes() {
        let key = SecretKey::new([0xAB; KEY_LEN]);
        let debug = format!("{key:?}");
        assert!(debug.contains("fingerprint"));
        assert!(!debug.contains("171, 171"));
    }
}
