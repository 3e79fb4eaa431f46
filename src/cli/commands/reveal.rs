//! `fieldseal reveal`: print a stored value, decrypting it if it is encrypted.

use crate::cli::output;
use crate::cli::{build_codec, Cli};
use crate::codec::SafeDecrypt;
use crate::errors::Result;

/// Execute the `reveal` command.
pub fn execute(cli: &Cli, value: &str) -> Result<()> {
    let codec = build_codec(cli)?;

    match codec.safe_decrypt(value) {
        SafeDecrypt::Decrypted(text) => {
            output::success("Value was encrypted.");
            println!("{text}");
        }
        SafeDecrypt::Passthrough(text) => {
            output::info("Value is not encrypted with this key; printed as stored.");
            println!("{text}");
        }
    }

    Ok(())
}
