use clap::Parser;
use starcheck::cli::{self, Cli};
use starcheck::error::StarcheckError;
use starcheck::input::AnalysisInput;
use starcheck::types::report::Verdict;
use starcheck::{analyze, config, report};
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const LOW: i32 = 0;
    pub const MEDIUM: i32 = 1;
    pub const HIGH: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<i32, StarcheckError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Analyze(cmd) => {
            let config = config::load_config(cmd.config.as_deref())?;
            let input = AnalysisInput::load(&cmd.snapshot)?;
            let analysis = analyze::analyze(&input, &config)?;

            let format = match cmd.format {
                cli::ReportFormat::Json => report::OutputFormat::Json,
                cli::ReportFormat::Text => report::OutputFormat::Text,
            };
            let rendered = report::render(&analysis, format)?;
            println!("{rendered}");

            Ok(match analysis.verdict {
                Verdict::Low => exit_code::LOW,
                Verdict::Medium => exit_code::MEDIUM,
                Verdict::High | Verdict::Confirmed => exit_code::HIGH,
            })
        }
        cli::Commands::Validate(cmd) => {
            config::load_config(Some(&cmd.config))?;
            println!("config ok: {}", cmd.config.display());
            Ok(exit_code::LOW)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
