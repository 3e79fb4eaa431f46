//! Passphrase-based key derivation using Argon2id.
//!
//! The field codec key comes from one configured passphrase and a
//! constant salt, so every process that shares the passphrase derives
//! the same key.  Parameters are configurable via `Argon2Params`
//! (loaded from `.fieldseal.toml` or sensible defaults).

use argon2::{Algorithm, Argon2, Params, Version};

use super::cipher::KEY_LEN;
use crate::errors::{FieldSealError, Result};

/// Constant salt used when the settings file does not override it.
pub const DEFAULT_KEY_SALT: &[u8] = b"fieldseal/field-codec/v1";

/// Argon2 refuses salts shorter than this.
const MIN_SALT_LEN: usize = 8;

/// Minimum safe memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// Configurable Argon2id parameters.
///
/// These map 1:1 to the fields in `Settings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Params {
    /// Memory cost in KiB (default: 65 536 = 64 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 3).
    pub iterations: u32,
    /// Parallelism lanes (default: 4).
    pub parallelism: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

/// Derive the 32-byte field key from a passphrase with default params.
pub fn derive_key(passphrase: &[u8], salt: &[u8]) -> Result<[u8; KEY_LEN]> {
    derive_key_with_params(passphrase, salt, &Argon2Params::default())
}

/// Derive the 32-byte field key with explicit Argon2id parameters.
///
/// The same passphrase + salt + params will always produce the same key.
pub fn derive_key_with_params(
    passphrase: &[u8],
    salt: &[u8],
    argon2_params: &Argon2Params,
) -> Result<[u8; KEY_LEN]> {
    if salt.len() < MIN_SALT_LEN {
        return Err(FieldSealError::KeyDerivationFailed(format!(
            "salt must be at least {MIN_SALT_LEN} bytes (got {})",
            salt.len()
        )));
    }
    if argon2_params.memory_kib < MIN_MEMORY_KIB {
        return Err(FieldSealError::KeyDerivationFailed(format!(
            "Argon2 memory_kib must be at least {MIN_MEMORY_KIB} (got {})",
            argon2_params.memory_kib
        )));
    }
    if argon2_params.iterations < 1 {
        return Err(FieldSealError::KeyDerivationFailed(
            "Argon2 iterations must be at least 1".into(),
        ));
    }
    if argon2_params.parallelism < 1 {
        return Err(FieldSealError::KeyDerivationFailed(
            "Argon2 parallelism must be at least 1".into(),
        ));
    }

    let params = Params::new(
        argon2_params.memory_kib,
        argon2_params.iterations,
        argon2_params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| FieldSealError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = [0u8; KEY_LEN];
    argon2
        .hash_password_into(passphrase, salt, &mut key)
        .map_err(|e| {
            FieldSealError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}"))
        })?;

    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> Argon2Params {
        Argon2Params {
            memory_kib: MIN_MEMORY_KIB,
            iterations: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn same_inputs_same_key() {
        let a = derive_key_with_params(b"passphrase", DEFAULT_KEY_SALT, &fast()).unwrap();
        let b = derive_key_with_params(b"passphrase", DEFAULT_KEY_SALT, &fast()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_passphrase_different_key() {
        let a = derive_key_with_params(b"passphrase-a", DEFAULT_KEY_SALT, &fast()).unwrap();
        let b = derive_key_with_params(b"passphrase-b", DEFAULT_KEY_SALT, &fast()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn different_salt_different_key() {
        let a = derive_key_with_params(b"passphrase", b"salt-one-xx", &fast()).unwrap();
        let b = derive_key_with_params(b"passphrase", b"salt-two-xx", &fast()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_short_salt() {
        assert!(derive_key_with_params(b"passphrase", b"salt", &fast()).is_err());
    }

    #[test]
    fn rejects_weak_params() {
        let weak_memory = Argon2Params {
            memory_kib: 1_024,
            ..fast()
        };
        assert!(derive_key_with_params(b"pw", DEFAULT_KEY_SALT, &weak_memory).is_err());

        let zero_iterations = Argon2Params {
            iterations: 0,
            ..fast()
        };
        assert!(derive_key_with_params(b"pw", DEFAULT_KEY_SALT, &zero_iterations).is_err());

        let zero_lanes = Argon2Params {
            parallelism: 0,
            ..fast()
        };
        assert!(derive_key_with_params(b"pw", DEFAULT_KEY_SALT, &zero_lanes).is_err());
    }
}
