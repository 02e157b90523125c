mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::analysis::{ChartArgs, CompareArgs, ReportArgs, SummaryArgs};

/// Break-even and safety-margin analysis
#[derive(Parser)]
#[command(
    name = "bep",
    version,
    about = "Break-even and safety-margin analysis",
    long_about = "Computes break-even points, safety margins and profit for a set of \
                  companies read from CSV, and draws per-company break-even charts and \
                  a profit/volume comparison chart."
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
    /// Financial summary for every company
    Summary(SummaryArgs),
    /// Break-even chart for one company
    Chart(ChartArgs),
    /// Profit/volume chart comparing all companies
    Compare(CompareArgs),
    /// Write every chart as SVG and print the summary
    Report(ReportArgs),
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
    env_logger::init();
    let cli = Cli::parse();
    log::info!("bep started");

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Summary(args) => commands::analysis::run_summary(args),
        Commands::Chart(args) => commands::analysis::run_chart(args),
        Commands::Compare(args) => commands::analysis::run_compare(args),
        Commands::Report(args) => commands::analysis::run_report(args),
        Commands::Version => {
            println!("bep {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            print_warnings(&value);
            output::format_output(&cli.output, &value);
            log::info!("rendering complete");
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

/// Echo envelope warnings on stderr so they survive any output format.
fn print_warnings(value: &serde_json::Value) {
    if let Some(warnings) = value.get("warnings").and_then(|w| w.as_array()) {
        for w in warnings.iter().filter_map(|w| w.as_str()) {
            eprintln!("{}: {}", "warning".yellow().bold(), w);
        }
    }
}
