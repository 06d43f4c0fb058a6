mod cli;
mod commands;
mod formatting;
mod settings;

use std::process::ExitCode;

use cli::Commands;
use commands::{run_embed, run_export, run_serve};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}

async fn run() -> ExitCode {
    let args = cli::parse();
    init_tracing(&args);

    match args.command {
        Commands::Serve { bind } => {
            run_serve(args.config, args.verbose, bind, args.format).await
        }
        Commands::Embed { url, artifact } => {
            run_embed(args.config, args.verbose, url, artifact, args.format)
        }
        Commands::Export {
            file,
            node_ids,
            scale,
            artifact,
        } => {
            run_export(
                args.config,
                args.verbose,
                file,
                node_ids,
                scale,
                artifact,
                args.format,
            )
            .await
        }
    }
}

/// Logs go to stderr; stdout carries the JSON document or raw HTML.
fn init_tracing(args: &cli::Cli) {
    let default = if args.verbose {
        "debug"
    } else if matches!(args.command, Commands::Serve { .. }) {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}
