//! `fieldseal encrypt`: encrypt a text value into its stored hex form.

use crate::cli::{build_codec, read_text, Cli};
use crate::errors::Result;

/// Execute the `encrypt` command.
pub fn execute(cli: &Cli, text: Option<&str>) -> Result<()> {
    let plaintext = read_text(text, "Value to encrypt")?;
    let codec = build_codec(cli)?;

    println!("{}", codec.encrypt_string(&plaintext)?);

    Ok(())
}
