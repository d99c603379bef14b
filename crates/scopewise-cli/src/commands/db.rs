//! `scopewise init-db` command implementation.

use anyhow::{Context, Result};
use scopewise_core::ScopewiseConfig;
use scopewise_gateway::{PostgresGateway, Table};

/// Create every backend table and index that does not exist yet.
pub async fn init(config: &ScopewiseConfig) -> Result<()> {
    let target = config.database.redacted_connection_string();
    let gateway = PostgresGateway::connect(&config.database)
        .await
        .with_context(|| format!("Failed to connect to {}", target))?;
    gateway
        .init_schema()
        .await
        .context("Failed to create tables")?;

    println!("✅ Schema ready on {}", target);
    for table in Table::ALL {
        println!("   - {}", table);
    }
    Ok(())
}
