use tokio::{net::TcpListener, signal};

use crate::app::{routes::create_router, state::AppState};
use crate::config::ServerConfig;
use crate::domain::ports::ServerSettings;
use crate::utils::error::Result;

pub async fn start_server(config: ServerConfig) -> Result<()> {
    if config.uses_placeholder_secret() {
        tracing::warn!("JWT_SECRET not set; signing tokens with the placeholder secret");
    }

    tracing::info!("Initializing state...");
    let state = AppState::from_config(&config).await;
    let app = create_router(state, config.cors_max_age_seconds());

    let address = config.bind_address();
    tracing::info!("Binding to {}", address);
    let listener = TcpListener::bind(&address).await?;
    tracing::info!("Server running on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
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
}
