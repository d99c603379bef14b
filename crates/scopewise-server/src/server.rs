//! API server implementation.

use crate::error::ServerError;
use crate::routes;
use crate::state::AppState;
use scopewise_core::config::ServerConfig;
use tokio::net::TcpListener;

/// The HTTP API server.
pub struct ApiServer {
    config: ServerConfig,
    state: AppState,
}

impl ApiServer {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Serve until Ctrl-C.
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.config.bind_address();
        tracing::info!(address = %addr, "Starting Scopewise API");

        let app = routes::create_router(self.state);

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ServerError::StartupFailed(format!("failed to bind {}: {}", addr, e)))?;

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::StartupFailed(e.to_string()))?;

        tracing::info!("Scopewise API stopped");
        Ok(())
    }

    /// Address the server will bind to.
    pub fn bind_address(&self) -> String {
        self.config.bind_address()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
