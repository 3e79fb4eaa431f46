//! Settings file and passphrase resolution.

pub mod settings;

pub use settings::{Passphrase, PassphraseSource, Settings, INSECURE_DEFAULT_PASSPHRASE};
