use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "starcheck",
    version,
    about = "Fake-star analysis for GitHub repositories"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a captured repository snapshot
    Analyze(AnalyzeCommand),
    /// Validate a rubric configuration file
    Validate(ValidateCommand),
}

#[derive(Args)]
pub struct AnalyzeCommand {
    /// JSON snapshot produced by the collector (timestamps, ratios,
    /// owner repos)
    pub snapshot: PathBuf,

    /// Rubric/threshold overrides (defaults to ./starcheck.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct ValidateCommand {
    pub config: PathBuf,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Text,
}
