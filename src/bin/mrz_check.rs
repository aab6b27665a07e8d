use clap::{Parser, Subcommand};
use idscan::validation::MrzValidator;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "mrz_check")]
#[command(version, about = "ICAO 9303 check digit and MRZ date helper", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the check digit of an MRZ field
    Digit {
        /// Field characters exactly as they appear in the MRZ
        data: String,
    },

    /// Verify an MRZ field against its check digit
    Verify {
        data: String,

        /// Check digit printed after the field
        check: String,
    },

    /// Resolve a YYMMDD MRZ date to YYYY-MM-DD
    Date { date: String },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Digit { data } => {
            println!("{}", MrzValidator::compute_check_digit(&data));
            ExitCode::SUCCESS
        }
        Commands::Verify { data, check } => {
            if MrzValidator::validate_check_digit(&data, Some(&check)) {
                println!("{} OK", data);
                ExitCode::SUCCESS
            } else {
                println!(
                    "{} FAILED: expected {}, found {}",
                    data,
                    MrzValidator::compute_check_digit(&data),
                    check
                );
                ExitCode::from(1)
            }
        }
        Commands::Date { date } => match MrzValidator::resolve_date(&date) {
            Some(resolved) => {
                println!("{}", resolved);
                ExitCode::SUCCESS
            }
            None => {
                eprintln!("Not a YYMMDD date: {}", date);
                ExitCode::from(2)
            }
        },
    }
}
