use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::crypto::kdf::{Argon2Params, DEFAULT_KEY_SALT};
use crate::errors::{FieldSealError, Result};

/// Passphrase used when the configured environment variable is unset.
///
/// This value is public and ships in every build.  A codec keyed from it
/// protects nothing; it exists so development setups work without any
/// configuration.  Every use is logged at `warn` level.
pub const INSECURE_DEFAULT_PASSPHRASE: &str = "fieldseal-insecure-default-passphrase";

/// Project-level configuration, loaded from `.fieldseal.toml`.
///
/// Every field has a sensible default so FieldSeal works out-of-the-box
/// without any config file at all.  The passphrase itself never lives
/// here, only the name of the environment variable that carries it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Environment variable holding the codec passphrase.
    #[serde(default = "default_passphrase_env")]
    pub passphrase_env: String,

    /// Constant salt for key derivation.  Changing it changes the key.
    #[serde(default = "default_key_salt")]
    pub key_salt: String,

    /// Argon2 memory cost in KiB (default: 64 MB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 3).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,

    /// Per record kind overrides of the sensitive field list,
    /// e.g. `patient = ["name", "birth_date"]`.
    #[serde(default)]
    pub sensitive_fields: BTreeMap<String, Vec<String>>,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_passphrase_env() -> String {
    "FIELDSEAL_PASSPHRASE".to_string()
}

fn default_key_salt() -> String {
    String::from_utf8_lossy(DEFAULT_KEY_SALT).into_owned()
}

fn default_argon2_memory_kib() -> u32 {
    65_536 // 64 MB
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

// ── Passphrase resolution ────────────────────────────────────────────

/// Where the codec passphrase came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassphraseSource {
    /// Read from the named environment variable.
    Environment(String),
    /// The variable was missing or empty; `INSECURE_DEFAULT_PASSPHRASE` was used.
    InsecureDefault,
}

/// A resolved passphrase, wiped from memory on drop.
pub struct Passphrase {
    value: Zeroizing<String>,
    source: PassphraseSource,
}

impl Passphrase {
    pub fn as_bytes(&self) -> &[u8] {
        self.value.as_bytes()
    }

    pub fn source(&self) -> &PassphraseSource {
        &self.source
    }

    pub fn is_insecure_default(&self) -> bool {
        self.source == PassphraseSource::InsecureDefault
    }
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            passphrase_env: default_passphrase_env(),
            key_salt: default_key_salt(),
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
            sensitive_fields: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    pub const FILE_NAME: &'static str = ".fieldseal.toml";

    /// Load settings from `<project_dir>/.fieldseal.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_file(&config_path)
    }

    /// Load settings from an explicit file path, which must exist.
    pub fn load_file(config_path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(config_path).map_err(|e| {
            FieldSealError::ConfigError(format!("cannot read {}: {e}", config_path.display()))
        })?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            FieldSealError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Convert the Argon2 settings into crypto-layer params.
    pub fn argon2_params(&self) -> Argon2Params {
        Argon2Params {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }

    /// Read the passphrase from the configured environment variable,
    /// falling back to `INSECURE_DEFAULT_PASSPHRASE`.
    pub fn resolve_passphrase(&self) -> Passphrase {
        self.passphrase_from(std::env::var(&self.passphrase_env).ok())
    }

    fn passphrase_from(&self, value: Option<String>) -> Passphrase {
        match value {
            Some(pw) if !pw.is_empty() => Passphrase {
                value: Zeroizing::new(pw),
                source: PassphraseSource::Environment(self.passphrase_env.clone()),
            },
            _ => {
                tracing::warn!(
                    env = %self.passphrase_env,
                    "passphrase variable is not set; using the built-in insecure default passphrase"
                );
                Passphrase {
                    value: Zeroizing::new(INSECURE_DEFAULT_PASSPHRASE.to_string()),
                    source: PassphraseSource::InsecureDefault,
                }
            }
        }
    }

    /// The configured sensitive field override for a record kind, if any.
    pub fn sensitive_fields_for(&self, kind: &str) -> Option<&[String]> {
        self.sensitive_fields.get(kind).map(Vec::as_slice)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
