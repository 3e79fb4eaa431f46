//! The field codec: encrypts sensitive values before they are stored and
//! decrypts them when the owning record is read back.
//!
//! Build one `FieldCodec` at startup and hand out `&FieldCodec` to every
//! component that persists sensitive fields.  The key is derived once, in
//! the constructor; each call afterwards only touches its own IV and
//! cipher state, so the codec is shared across threads without locking.
//!
//! Encodings:
//! - bytes:   `IV || ciphertext`
//! - strings: lowercase hex of the byte form
//!
//! `safe_decrypt` additionally reads the delimited legacy form
//! `hex(IV):hex(ciphertext)` and passes anything it cannot decrypt
//! through untouched, so records written before encryption was switched
//! on keep working.

use serde_json::Value;

use crate::config::{Passphrase, Settings};
use crate::crypto::cipher::{self, IV_LEN};
use crate::crypto::kdf::{derive_key_with_params, Argon2Params};
use crate::crypto::keys::SecretKey;
use crate::errors::Result;

/// Outcome of the tolerant read path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SafeDecrypt {
    /// The value was encrypted and decrypted cleanly.
    Decrypted(String),
    /// The value was not recognisably encrypted; this is the input as given.
    Passthrough(String),
}

impl SafeDecrypt {
    pub fn into_inner(self) -> String {
        match self {
            SafeDecrypt::Decrypted(s) | SafeDecrypt::Passthrough(s) => s,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SafeDecrypt::Decrypted(s) | SafeDecrypt::Passthrough(s) => s,
        }
    }

    pub fn is_decrypted(&self) -> bool {
        matches!(self, SafeDecrypt::Decrypted(_))
    }
}

/// Symmetric field codec keyed by a single derived `SecretKey`.
#[derive(Debug)]
pub struct FieldCodec {
    key: SecretKey,
}

impl FieldCodec {
    pub fn new(key: SecretKey) -> Self {
        Self { key }
    }

    /// Derive the key from a passphrase and salt and wrap it in a codec.
    pub fn from_passphrase(passphrase: &[u8], salt: &[u8], params: &Argon2Params) -> Result<Self> {
        let key = derive_key_with_params(passphrase, salt, params)?;
        Ok(Self::new(SecretKey::new(key)))
    }

    /// Resolve the passphrase from the environment and derive the key
    /// with the configured salt and Argon2 params.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::with_passphrase(settings, &settings.resolve_passphrase())
    }

    /// Like `from_settings`, for callers that resolved the passphrase
    /// themselves (e.g. to report where it came from).
    pub fn with_passphrase(settings: &Settings, passphrase: &Passphrase) -> Result<Self> {
        let codec = Self::from_passphrase(
            passphrase.as_bytes(),
            settings.key_salt.as_bytes(),
            &settings.argon2_params(),
        )?;

        tracing::info!(
            source = ?passphrase.source(),
            fingerprint = %codec.key.fingerprint(),
            "field codec key derived"
        );
        Ok(codec)
    }

    pub fn key(&self) -> &SecretKey {
        &self.key
    }

    /// Encrypt raw bytes.  Output is `IV || ciphertext`.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        cipher::encrypt(self.key.as_bytes(), plaintext)
    }

    /// Decrypt a payload produced by `encrypt`.  Fails on payloads shorter
    /// than the IV; never detects tampering.
    pub fn decrypt(&self, payload: &[u8]) -> Result<Vec<u8>> {
        cipher::decrypt(self.key.as_bytes(), payload)
    }

    /// Encrypt UTF-8 text into a hex string of length `2 * (16 + text.len())`.
    pub fn encrypt_string(&self, text: &str) -> Result<String> {
        Ok(hex::encode(self.encrypt(text.as_bytes())?))
    }

    /// Strict inverse of `encrypt_string`.
    pub fn decrypt_string(&self, encoded: &str) -> Result<String> {
        let payload = hex::decode(encoded)?;
        let plaintext = self.decrypt(&payload)?;
        Ok(String::from_utf8(plaintext)?)
    }

    /// Decrypt `value` if it looks encrypted, otherwise hand it back.
    ///
    /// Never fails.  Values that are not shaped like ciphertext, and
    /// values that are but do not decode, come back as `Passthrough`.
    pub fn safe_decrypt(&self, value: &str) -> SafeDecrypt {
        let Some(payload) = stored_payload(value) else {
            tracing::debug!(len = value.len(), "value is not encrypted; passing through");
            return SafeDecrypt::Passthrough(value.to_string());
        };

        let decoded = self
            .decrypt(&payload)
            .and_then(|plain| String::from_utf8(plain).map_err(Into::into));

        match decoded {
            Ok(text) => SafeDecrypt::Decrypted(text),
            Err(e) => {
                tracing::warn!(
                    len = value.len(),
                    error = %e,
                    "value looks encrypted but did not decode; passing through"
                );
                SafeDecrypt::Passthrough(value.to_string())
            }
        }
    }

    /// `safe_decrypt` over a JSON value.  Only strings are candidates;
    /// numbers, booleans, nulls, arrays and objects pass through.
    pub fn safe_decrypt_value(&self, value: &Value) -> Value {
        match value {
            Value::String(s) => Value::String(self.safe_decrypt(s).into_inner()),
            other => {
                tracing::debug!("non-string value; passing through");
                other.clone()
            }
        }
    }
}

/// Recognise the two stored encrypted shapes and return the raw payload.
fn stored_payload(value: &str) -> Option<Vec<u8>> {
    if let Some((iv_hex, ct_hex)) = value.split_once(':') {
        if iv_hex.len() != IV_LEN * 2 || ct_hex.contains(':') {
            return None;
        }
        let mut payload = hex::decode(iv_hex).ok()?;
        payload.extend(hex::decode(ct_hex).ok()?);
        return Some(payload);
    }

    // A bare IV (32 chars) is the encrypted empty string.  Digit-only
    // values are legacy numbers (document numbers, ids); real ciphertext
    // of this length is all decimal digits with negligible probability.
    if value.len() < IV_LEN * 2 || value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    hex::decode(value).ok()
}
