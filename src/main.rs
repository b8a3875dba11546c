use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tax_engine::cmd::{FundCommand, InsuranceCommand, OutputFormat, TaxCommand, YearCommand};
use tax_engine::config::ConfigLoader;

/// Calculate Chinese social insurance, housing fund and individual income tax.
///
/// Rate tables and the cumulative withholding brackets are read from the
/// `--config` file; each command reads its own personal input with `-c`.
///
/// Examples:
///   tax --config tax.yaml f -c personal.yaml
///   tax --config tax.yaml t -c salaries.yaml
#[derive(Parser, Debug)]
#[command(name = "tax")]
#[command(version, verbatim_doc_comment)]
struct Cli {
    /// Rate configuration file (YAML or JSON)
    #[arg(long, global = true, default_value = "tax.yaml")]
    config: PathBuf,

    /// Output the result as JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate the housing fund
    #[command(name = "accumulation-fund", visible_aliases = ["fund", "f"])]
    AccumulationFund(FundCommand),
    /// Calculate social insurance
    #[command(visible_alias = "i")]
    Insurance(InsuranceCommand),
    /// Calculate monthly tax from a salary list
    #[command(visible_alias = "t")]
    Tax(TaxCommand),
    /// Calculate a year of tax from a simplified plan
    #[command(visible_alias = "y")]
    Year(YearCommand),
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ConfigLoader::load_tax_config(&cli.config)
        .with_context(|| format!("Failed to load rate configuration: {}", cli.config.display()))?;

    let format = OutputFormat::from_flag(cli.json);
    let mut out = io::stdout().lock();

    match &cli.command {
        Command::AccumulationFund(cmd) => cmd.exec(&config, format, &mut out),
        Command::Insurance(cmd) => cmd.exec(&config, format, &mut out),
        Command::Tax(cmd) => cmd.exec(&config, format, &mut out),
        Command::Year(cmd) => cmd.exec(&config, format, &mut out),
    }
}
