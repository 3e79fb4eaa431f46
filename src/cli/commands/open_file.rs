//! `fieldseal open-file`: decrypt a sealed attachment.
//!
//! With `--output` the document is written back to disk; otherwise a
//! `data:` URL is printed, which is what the web client renders.

use std::fs;
use std::path::Path;

use crate::attachment::SealedAttachment;
use crate::cli::output;
use crate::cli::{build_codec, Cli};
use crate::errors::Result;

/// Execute the `open-file` command.
pub fn execute(cli: &Cli, sealed_path: &str, output_path: Option<&str>) -> Result<()> {
    let sealed = SealedAttachment::read_from(Path::new(sealed_path))?;
    let codec = build_codec(cli)?;
    let document = sealed.open(&codec)?;

    match output_path {
        Some(out) => {
            fs::write(out, &document.data)?;
            output::success(&format!(
                "Opened {} ({} bytes) into {out}",
                document.file_name,
                document.data.len()
            ));
        }
        None => println!("{}", document.to_data_url()),
    }

    Ok(())
}
