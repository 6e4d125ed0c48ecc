use crate::{Config, redirects::RedirectTable, routes::build_axum_app};
use anyhow::{Context as _, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Serve the site until a shutdown signal arrives.
///
/// The redirect rules are loaded before binding the socket, a broken
/// `_redirects` file keeps the server from starting.
pub async fn start_web_server(config: Arc<Config>) -> Result<()> {
    let redirects = Arc::new(RedirectTable::new(&config.redirects_path));
    let rules = redirects
        .rules()
        .await
        .context("could not load redirect rules")?;
    info!(count = rules.len(), "redirect rules ready");

    let app = build_axum_app(config.clone(), redirects);

    let listener = TcpListener::bind(config.socket_addr)
        .await
        .with_context(|| format!("could not bind to {}", config.socket_addr))?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("error running web server")?;

    info!("web server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(?err, "failed to install ctrl+c handler");
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
                error!(?err, "failed to install terminate handler");
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

    info!("received shutdown signal");
}
