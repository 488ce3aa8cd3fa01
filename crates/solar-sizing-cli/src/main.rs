mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::amortize::AmortizeArgs;
use commands::assess::AssessArgs;

/// Solar installation sizing and financing assessments
#[derive(Parser)]
#[command(
    name = "ssa",
    version,
    about = "Solar installation sizing and financing assessments",
    long_about = "A CLI for sizing solar installations against regional policy and \
                  available space, with decimal precision. Produces generation, cost, \
                  financing, and payback figures plus month-by-month loan schedules."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full sizing and financing assessment for a site
    Assess(AssessArgs),
    /// Generate a month-by-month loan amortization schedule
    Amortize(AmortizeArgs),
    /// List the seeded regional policies
    Regions,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Assess(args) => commands::assess::run_assess(args),
        Commands::Amortize(args) => commands::amortize::run_amortize(args),
        Commands::Regions => commands::regions::run_regions(),
        Commands::Version => {
            println!("ssa {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
