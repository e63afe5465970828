mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::channel::{BreakEvenArgs, ChannelProfitArgs, ChannelSummaryArgs};
use commands::imports::{AllocateArgs, ImportSimArgs};
use commands::tax::TaxTierArgs;

/// Seller back-office financial calculations
#[derive(Parser)]
#[command(
    name = "sfc",
    version,
    about = "Seller back-office financial calculations",
    long_about = "A CLI for the calculation core of an e-commerce seller back office, \
                  with decimal precision. Supports per-channel profitability, break-even \
                  pricing, progressive tax-tier resolution, and import landed-cost \
                  simulation with proportional allocation."
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
    /// Evaluate profitability of one product on one channel
    ChannelProfit(ChannelProfitArgs),
    /// Break-even sale price for a product + channel configuration
    BreakEven(BreakEvenArgs),
    /// Summarize a product across all its channel configurations
    ChannelSummary(ChannelSummaryArgs),
    /// Resolve an annual turnover to its progressive tax tier
    TaxTier(TaxTierArgs),
    /// Run a full import landed-cost simulation
    ImportSim(ImportSimArgs),
    /// Distribute a cost across product lines (standalone allocator)
    Allocate(AllocateArgs),
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
        Commands::ChannelProfit(args) => commands::channel::run_channel_profit(args),
        Commands::BreakEven(args) => commands::channel::run_break_even(args),
        Commands::ChannelSummary(args) => commands::channel::run_channel_summary(args),
        Commands::TaxTier(args) => commands::tax::run_tax_tier(args),
        Commands::ImportSim(args) => commands::imports::run_import_sim(args),
        Commands::Allocate(args) => commands::imports::run_allocate(args),
        Commands::Version => {
            println!("sfc {}", env!("CARGO_PKG_VERSION"));
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
