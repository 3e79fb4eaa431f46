//! `fieldseal fingerprint`: show or verify the codec key fingerprint.
//!
//! Run it on two hosts to confirm they derive the same key before
//! pointing both at the same database.

use crate::cli::output;
use crate::cli::{build_codec, Cli};
use crate::errors::Result;

/// Execute the `fingerprint` command.
pub fn execute(cli: &Cli, check: Option<&str>) -> Result<()> {
    let codec = build_codec(cli)?;

    match check {
        Some(expected) => {
            codec.key().verify_fingerprint(expected)?;
            output::success("Key fingerprint matches.");
        }
        None => println!("{}", codec.key().fingerprint()),
    }

    Ok(())
}
