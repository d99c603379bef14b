use crate::{GatewayError, Row, SelectQuery, Table};
use async_trait::async_trait;
use uuid::Uuid;

/// Storage contract of the hosted backend.
///
/// Rows are opaque JSON objects keyed by a generated id. Implementations must
/// be shareable across tasks.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Store a new row. `data` must be a JSON object.
    async fn insert(&self, table: Table, data: serde_json::Value) -> Result<Row, GatewayError>;

    /// Rows matching `query`.
    async fn select(&self, table: Table, query: &SelectQuery) -> Result<Vec<Row>, GatewayError>;

    /// Shallow-merge `patch` into the row's data. `None` when the row does not exist.
    async fn update(
        &self,
        table: Table,
        id: Uuid,
        patch: serde_json::Value,
    ) -> Result<Option<Row>, GatewayError>;

    /// Remove a row. `false` when nothing was deleted.
    async fn delete(&self, table: Table, id: Uuid) -> Result<bool, GatewayError>;

    /// Fetch a single row by id.
    async fn get(&self, table: Table, id: Uuid) -> Result<Option<Row>, GatewayError>;
}
