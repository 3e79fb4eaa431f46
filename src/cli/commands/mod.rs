//! One module per subcommand.

pub mod completions;
pub mod decrypt;
pub mod encrypt;
pub mod fingerprint;
pub mod open_file;
pub mod record;
pub mod reveal;
pub mod seal_file;
