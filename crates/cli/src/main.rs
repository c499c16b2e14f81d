//! iamctl - IAM API command-line client
//!
//! Manage users, service users, groups, SAML federations and S3
//! credentials through the IAM API.

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use iam_cli::commands::{self, Cli};

/// Directives applied by `--debug`
const DEBUG_DIRECTIVES: &str = "iam_client=debug,iam_core=debug";

fn init_tracing(debug: bool) -> anyhow::Result<()> {
    let filter = if debug {
        EnvFilter::try_new(DEBUG_DIRECTIVES).context("invalid debug log directives")?
    } else {
        EnvFilter::from_default_env()
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .context("failed to install tracing subscriber")
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.debug) {
        eprintln!("Warning: {e:#}");
    }

    // Ctrl+C cancels the in-flight request instead of killing the process
    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("interrupt received, cancelling request");
            interrupt.cancel();
        }
    });

    let exit_code = commands::execute(cli, cancel).await;

    std::process::exit(exit_code.as_i32());
}
