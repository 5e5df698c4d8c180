//! Command-line entry point for zipfinder.

use anyhow::Result;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

use zipfinder::cli::USAGE_HINT;
use zipfinder::{Cli, report, scan};

/// Everything runs on one thread; awaits only wait on archive reads and the
/// results file.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logging();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let Some(config) = cli.search_config() else {
        println!("{USAGE_HINT}");
        return Ok(());
    };

    let outcome = scan(&config).await?;

    let mut stdout = std::io::stdout().lock();
    report::report(&outcome, config.output.as_deref(), &mut stdout).await?;
    Ok(())
}

/// Log to stderr so stdout carries only the report. `RUST_LOG` overrides the
/// default `warn` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
