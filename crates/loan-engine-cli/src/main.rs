mod commands;
mod convert;
mod i18n;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::loan::{ComputeArgs, ScheduleArgs};
use i18n::{keys, Language};

/// Fixed-rate loan amortization calculations
#[derive(Parser)]
#[command(
    name = "loan",
    version,
    about = "Fixed-rate loan amortization calculations",
    long_about = "A CLI for fixed-rate loan amortization with decimal precision. \
                  Computes the monthly payment, total cost and cost ratio of a loan \
                  plus the full month-by-month amortization schedule, with labels \
                  in French or English."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Display language for labels and messages
    #[arg(long, default_value = "auto", global = true)]
    lang: LangChoice,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the full loan analysis (summary + amortization schedule)
    Compute(ComputeArgs),
    /// Compute the amortization schedule only
    Schedule(ScheduleArgs),
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

#[derive(Debug, Clone, ValueEnum)]
enum LangChoice {
    /// Follow the system locale
    Auto,
    Fr,
    En,
}

fn main() {
    let cli = Cli::parse();

    let lang = match cli.lang {
        LangChoice::Auto => Language::detect(),
        LangChoice::Fr => Language::Fr,
        LangChoice::En => Language::En,
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Compute(args) => commands::loan::run_compute(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Version => {
            println!("loan {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, lang, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", i18n::label(lang, keys::ERROR_PREFIX).red().bold(), e);
            process::exit(1);
        }
    }
}
