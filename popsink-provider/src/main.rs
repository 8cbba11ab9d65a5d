//! Popsink Terraform provider binary
//!
//! Speaks the line-delimited JSON host protocol on stdin/stdout. Logs go to
//! stderr so stdout carries nothing but responses.

use anyhow::Result;
use clap::Parser;
use popsink_provider::{PopsinkProvider, server};
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "terraform-provider-popsink")]
#[command(about = "Terraform provider for the Popsink API", long_about = None)]
#[command(version)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "POPSINK_LOG", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "popsink_provider={level},popsink_client={level}",
                    level = cli.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let provider = PopsinkProvider::default();
    info!(version = provider.version(), "Starting Popsink provider");

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    tokio::select! {
        result = server::serve(&provider, stdin, stdout) => result?,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, cancelling in-flight request");
        }
    }

    info!("Popsink provider stopped");
    Ok(())
}
