//! Chatstore CLI and REST API entry point.
//!
//! Binary name: `chatstore`
//!
//! Parses CLI arguments, resolves layered configuration, sets up tracing and
//! dispatches to the command handler.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use chatstore_observe::tracing_setup::{LogFormat, init_tracing, shutdown_tracing, verbosity_filter};
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config_args, serving) = match cli.command {
        // Shell completions don't need configuration
        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(shell, &mut cmd, "chatstore", &mut std::io::stdout());
            return Ok(());
        }
        Commands::Serve(args) => (args, true),
        Commands::Health(args) => (args, false),
    };
    let config = config_args.resolve().await?;

    let format = if cli.json && serving {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    // `health` prints its own report; keep its logs to errors unless asked.
    let filter = if serving || cli.verbose > 0 {
        verbosity_filter(cli.verbose, cli.quiet)
    } else {
        "error"
    };
    init_tracing(filter, format, config.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;
    tracing::debug!(?config, "configuration resolved");

    let result = if serving {
        cli::serve::serve(config, cli.quiet).await
    } else {
        cli::health::health(config, cli.json).await
    };

    shutdown_tracing();
    result
}
