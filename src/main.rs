use commission_engine::{
    config::{FileConfigSource, HttpConfigSource},
    input::{self, InputFormat},
    run::run,
};

use anyhow::{Context, Result};
use clap::Parser;
use std::{path::PathBuf, process::ExitCode, time::Duration};
use tracing_subscriber::EnvFilter;

/// Compute the commission of every transaction of a file.
#[derive(Debug, Parser)]
#[command(name = "commission", version, about)]
struct Cli {
    /// Transactions file (JSON array, or CSV)
    input: PathBuf,

    /// Input format; guessed from the file extension by default
    #[arg(long, value_enum)]
    format: Option<InputFormat>,

    /// Read the fee configurations from this JSON file instead of the API
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Base URL of the commission configuration API
    #[arg(long, env = "API_BASE_URL", required_unless_present = "config")]
    api_base_url: Option<String>,

    /// Timeout of each configuration request, in seconds
    #[arg(long, env = "CONFIG_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok(); // Load .env file

    // Logs go to stderr: stdout only ever carries commissions.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli) -> Result<()> {
    let (file, format) = input::open(&cli.input, cli.format)?;

    // Commissions are buffered by `run` until the whole batch succeeded.
    let stdout = std::io::stdout().lock();

    match (&cli.config, &cli.api_base_url) {
        (Some(config), _) => {
            let source = FileConfigSource::open(config)?;
            run(file, format, &source, stdout)
        }
        (None, Some(base_url)) => {
            let source = HttpConfigSource::new(base_url, Duration::from_secs(cli.timeout_secs))
                .context("failed to build the HTTP client")?;
            run(file, format, &source, stdout)
        }
        (None, None) => anyhow::bail!("API_BASE_URL is not set"),
    }
}
