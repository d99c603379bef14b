//! `scopewise serve` command implementation.

use anyhow::{Context, Result};
use scopewise_core::ScopewiseConfig;
use scopewise_gateway::{MemoryGateway, PersistenceGateway, PostgresGateway};
use scopewise_server::{ApiServer, AppState};
use std::sync::Arc;

/// Start the API on the configured address and block until Ctrl-C.
pub async fn run(config: ScopewiseConfig, memory: bool) -> Result<()> {
    let gateway: Arc<dyn PersistenceGateway> = if memory {
        tracing::warn!("Using the in-memory backend; nothing survives a restart");
        Arc::new(MemoryGateway::new())
    } else {
        let postgres = PostgresGateway::connect(&config.database)
            .await
            .with_context(|| {
                format!(
                    "Failed to connect to {}",
                    config.database.redacted_connection_string()
                )
            })?;
        postgres.init_schema().await?;
        Arc::new(postgres)
    };

    if let Some(project) = &config.project {
        tracing::info!(project = %project, "Loaded configuration");
    }

    let server_config = config.server.clone();
    let state = AppState::new(config, gateway);
    let server = ApiServer::new(server_config, state);

    println!("🚀 Scopewise API listening on http://{}", server.bind_address());
    server.run().await?;
    Ok(())
}
