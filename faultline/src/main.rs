#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;
mod routes;

use args::Args;
use clap::Parser;
use faultline_config::Config;
use faultline_server::Server;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match args.config {
        Some(ref path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(listen) = args.listen {
        config.server.listen_address = Some(listen);
    }

    let _telemetry_guard = faultline_telemetry::init(config.telemetry.as_ref(), &args.log_filter)?;

    tracing::info!(
        config_path = ?args.config.as_ref().map(|p| p.display().to_string()),
        error_label = %config.service.error_label(),
        "starting faultline"
    );

    let routes = routes::router(&config)?;
    let server = Server::new(&config, routes);

    let shutdown = CancellationToken::new();
    let shutdown_clone = shutdown.clone();

    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown_clone.cancel();
    });

    server.serve(shutdown).await?;

    tracing::info!("faultline stopped");
    Ok(())
}

/// Wait for `SIGINT` or `SIGTERM`
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received");
}
