pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;

use crate::core::ConfigProvider;
use crate::utils::error::{Result, TripinaryError};
use tokio::{net::TcpListener, signal};
use tracing::info;

/// Binds the configured address and serves until Ctrl+C or SIGTERM.
pub async fn serve<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    let state = AppState::from_config(config)?;
    let app = create_router(config.allowed_origins()).with_state(state);

    let address = config.bind_address();
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| TripinaryError::ServerError {
            message: format!("failed to bind {}: {}", address, e),
        })?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| TripinaryError::ServerError {
            message: e.to_string(),
        })?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
