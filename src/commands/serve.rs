use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use f2h_lib::{run_server, F2hError, ServerState};
use tokio::net::TcpListener;

use crate::cli::OutputFormat;
use crate::commands::log_config;
use crate::formatting::render_error;
use crate::settings::load_config;

/// Run the HTTP server until Ctrl-C.
pub async fn run_serve(
    config_path: Option<PathBuf>,
    verbose: bool,
    bind: Option<SocketAddr>,
    format: OutputFormat,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format),
    };
    log_config(verbose, &config, config_path.as_deref());

    let state = match ServerState::from_config(&config) {
        Ok(state) => state,
        Err(err) => return render_error(err, format),
    };

    let addr = bind.unwrap_or(config.server.bind);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            return render_error(
                F2hError::Config(format!("Failed to bind {addr}: {err}")),
                format,
            )
        }
    };

    match run_server(listener, state).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => render_error(err, format),
    }
}
