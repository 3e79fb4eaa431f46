use clap::Parser;
use fieldseal::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "fieldseal=warn";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Encrypt { ref text } => {
            fieldseal::cli::commands::encrypt::execute(&cli, text.as_deref())
        }
        Commands::Decrypt { ref value } => fieldseal::cli::commands::decrypt::execute(&cli, value),
        Commands::Reveal { ref value } => fieldseal::cli::commands::reveal::execute(&cli, value),
        Commands::SealFile {
            ref path,
            ref output,
        } => fieldseal::cli::commands::seal_file::execute(&cli, path, output.as_deref()),
        Commands::OpenFile {
            ref sealed,
            ref output,
        } => fieldseal::cli::commands::open_file::execute(&cli, sealed, output.as_deref()),
        Commands::SealRecord {
            ref file,
            ref kind,
            migrate,
        } => fieldseal::cli::commands::record::execute_seal(&cli, file, kind, migrate),
        Commands::OpenRecord { ref file, ref kind } => {
            fieldseal::cli::commands::record::execute_open(&cli, file, kind)
        }
        Commands::Fingerprint { ref check } => {
            fieldseal::cli::commands::fingerprint::execute(&cli, check.as_deref())
        }
        Commands::Completions { shell } => fieldseal::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        fieldseal::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
