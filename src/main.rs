// Score, normalize and validate one scan from recognizer output saved as JSON.

use clap::Parser;
use idscan::{EngineConfig, Evidence, Extractor, ScanError};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "idscan")]
#[command(version, about = "Normalize and validate Emirates ID and passport scan evidence", long_about = None)]
struct Cli {
    /// Evidence JSON file (`document_type` is "emirates_id" or "passport")
    evidence: PathBuf,

    /// Engine configuration JSON file
    #[arg(short, long, env = "IDSCAN_CONFIG")]
    config: Option<PathBuf>,

    /// Pretty-print the result
    #[arg(short, long)]
    pretty: bool,

    /// Log pipeline steps to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(CliError::Scan(err)) if err.is_user_correctable() => {
            eprintln!("{}", err.public_message());
            ExitCode::from(2)
        }
        Err(CliError::Scan(err)) => {
            log::error!("{}", err);
            eprintln!("{}", err.public_message());
            ExitCode::from(1)
        }
        Err(CliError::Input(message)) => {
            eprintln!("Error: {}", message);
            ExitCode::from(2)
        }
    }
}

enum CliError {
    Scan(ScanError),
    Input(String),
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .map_err(|e| CliError::Input(format!("{}: {}", path.display(), e)))?,
        None => EngineConfig::default(),
    };

    let raw = fs::read_to_string(&cli.evidence)
        .map_err(|e| CliError::Input(format!("{}: {}", cli.evidence.display(), e)))?;
    let evidence: Evidence = serde_json::from_str(&raw)
        .map_err(|e| CliError::Input(format!("{}: {}", cli.evidence.display(), e)))?;

    let result = Extractor::new(config)
        .extract(&evidence)
        .map_err(CliError::Scan)?;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&result)
    } else {
        serde_json::to_string(&result)
    };
    output.map_err(|e| CliError::Scan(ScanError::internal("result", e)))
}
