//! `fieldseal seal-file`: encrypt a document into a sealed attachment.

use std::path::Path;

use crate::attachment;
use crate::cli::output;
use crate::cli::{build_codec, Cli};
use crate::errors::Result;

/// Execute the `seal-file` command.
pub fn execute(cli: &Cli, path: &str, output_path: Option<&str>) -> Result<()> {
    let codec = build_codec(cli)?;
    let sealed = attachment::seal_file(&codec, Path::new(path))?;

    match output_path {
        Some(out) => {
            sealed.write_to(Path::new(out))?;
            output::success(&format!(
                "Sealed {} ({}, {} bytes) into {out}",
                sealed.file_name, sealed.mime_type, sealed.size
            ));
        }
        None => println!("{}", sealed.to_json()?),
    }

    Ok(())
}
