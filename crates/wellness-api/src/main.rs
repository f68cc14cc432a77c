//! Mental wellness chat service entry point.
//!
//! Binary name: `wellness`
//!
//! Loads configuration, wires the three-agent pipeline to the model
//! provider, and serves the HTTP API until Ctrl+C or SIGTERM.

mod cli;
mod http;
mod state;

use std::path::Path;

use anyhow::Context;
use clap::Parser;

use wellness_infra::config::{EnvLayer, apply_env_overrides, load_config, resolve_api_key};
use wellness_observe::tracing_setup::{LogFormat, directive_for_verbosity, init_tracing};

use cli::{Cli, Commands, ServeArgs};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    init_tracing(format, directive_for_verbosity(cli.verbose))
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to initialize logging")?;

    match cli.command.unwrap_or(Commands::Serve(ServeArgs::default())) {
        Commands::Serve(args) => serve(args).await?,
    }

    Ok(())
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let env = EnvLayer::with_dotenv(Path::new(".env")).await;

    let mut config = load_config(args.config.as_deref()).await?;
    apply_env_overrides(&mut config, &env);
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let api_key = resolve_api_key(&config.provider, &env);
    let state = AppState::init(&config, api_key);
    let app = http::router::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        %addr,
        model = %config.agents.model,
        app_name = %config.agents.app_name,
        "Wellness service listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
///
/// A handler that cannot be installed never fires; the other one still can.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
