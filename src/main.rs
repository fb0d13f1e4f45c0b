//! Realtime Chat Server - Binary Entry Point

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use realtime_chat::api::http::{cors_layer, create_router};
use realtime_chat::{AppState, EventBroadcaster, LogStore, MutationService, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::parse();

    let store = LogStore::open(&config.data_file, config.max_messages)?;
    log::info!(
        "Message log at {} (retaining {} messages)",
        store.path().display(),
        store.max_messages()
    );

    let broadcaster = Arc::new(EventBroadcaster::new(config.broadcast_capacity));
    let service = MutationService::new(store, broadcaster);
    let state = Arc::new(AppState::new(service));
    let app = create_router(state, cors_layer(&config.client_origin)?);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    log::info!("Realtime chat server listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    log::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", e);
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
                log::error!("Failed to listen for SIGTERM: {}", e);
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

    log::info!("Shutdown signal received");
}
