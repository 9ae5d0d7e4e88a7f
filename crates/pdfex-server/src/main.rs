mod api;
mod middleware;
mod pages;

use std::sync::Arc;

use pdfex_catalogue::CatalogueController;
use pdfex_store::SupabaseStore;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = pdfex_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(
        env = %config.env,
        table = %config.products_table,
        "starting catalogue server"
    );

    let store = SupabaseStore::from_config(&config)?;
    let catalogue = Arc::new(CatalogueController::new(
        store,
        config.products_table.clone(),
    ));

    // Session start: fetch the first page before the first visitor asks.
    tokio::spawn({
        let catalogue = Arc::clone(&catalogue);
        async move {
            if let Err(e) = catalogue.ensure_started().await {
                tracing::debug!(error = %e, "initial load skipped");
            }
        }
    });

    let app = build_app(AppState {
        catalogue,
        env: config.env,
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
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
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
