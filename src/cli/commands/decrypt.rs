//! `fieldseal decrypt`: strictly decrypt a stored hex value.

use crate::cli::{build_codec, Cli};
use crate::errors::Result;

/// Execute the `decrypt` command.
pub fn execute(cli: &Cli, value: &str) -> Result<()> {
    let codec = build_codec(cli)?;
    let text = codec.decrypt_string(value.trim())?;
    println!("{text}");

    Ok(())
}
