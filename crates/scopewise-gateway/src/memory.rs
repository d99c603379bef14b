//! In-process gateway used by tests and CLI dry runs.

use crate::table::ensure_object;
use crate::{Direction, GatewayError, OrderBy, PersistenceGateway, Row, SelectQuery, Table};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

/// Rows kept in insertion order per table.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    tables: RwLock<HashMap<Table, Vec<Row>>>,
    fail_writes: AtomicBool,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent insert, update and delete fail with
    /// [`GatewayError::Unavailable`].
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of rows stored in `table`.
    pub fn len(&self, table: Table) -> usize {
        self.tables
            .read()
            .map(|tables| tables.get(&table).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    pub fn is_empty(&self, table: Table) -> bool {
        self.len(table) == 0
    }

    fn check_writable(&self) -> Result<(), GatewayError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(GatewayError::Unavailable(
                "writes are disabled on this gateway".to_string(),
            ));
        }
        Ok(())
    }
}

fn poisoned<T>(_: T) -> GatewayError {
    GatewayError::Unavailable("memory gateway lock poisoned".to_string())
}

/// Text form of a top-level key, the way Postgres `->>` renders it.
fn key_text(data: &serde_json::Value, key: &str) -> Option<String> {
    match data.get(key)? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[async_trait]
impl PersistenceGateway for MemoryGateway {
    async fn insert(&self, table: Table, data: serde_json::Value) -> Result<Row, GatewayError> {
        self.check_writable()?;
        ensure_object(&data)?;

        let row = Row {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            data,
        };
        let mut tables = self.tables.write().map_err(poisoned)?;
        tables.entry(table).or_default().push(row.clone());

        tracing::debug!(table = %table, id = %row.id, "Inserted row");
        Ok(row)
    }

    async fn select(&self, table: Table, query: &SelectQuery) -> Result<Vec<Row>, GatewayError> {
        let tables = self.tables.read().map_err(poisoned)?;
        let mut rows: Vec<(usize, Row)> = tables
            .get(&table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| query.matches(&row.data))
                    .cloned()
                    .enumerate()
                    .collect()
            })
            .unwrap_or_default();
        drop(tables);

        // Insertion sequence breaks created_at ties.
        match &query.order.by {
            OrderBy::CreatedAt => {
                rows.sort_by(|(ia, a), (ib, b)| a.created_at.cmp(&b.created_at).then(ia.cmp(ib)))
            }
            OrderBy::Key(key) => rows.sort_by(|(ia, a), (ib, b)| {
                let ka = key_text(&a.data, key);
                let kb = key_text(&b.data, key);
                // NULL sorts after every value.
                (ka.is_none(), ka).cmp(&(kb.is_none(), kb)).then(ia.cmp(ib))
            }),
        }
        if query.order.direction == Direction::Desc {
            rows.reverse();
        }

        let mut rows: Vec<Row> = rows.into_iter().map(|(_, row)| row).collect();
        if let Some(limit) = query.limit {
            rows.truncate(limit as usize);
        }
        Ok(rows)
    }

    async fn update(
        &self,
        table: Table,
        id: Uuid,
        patch: serde_json::Value,
    ) -> Result<Option<Row>, GatewayError> {
        self.check_writable()?;
        ensure_object(&patch)?;

        let mut tables = self.tables.write().map_err(poisoned)?;
        let Some(row) = tables
            .get_mut(&table)
            .and_then(|rows| rows.iter_mut().find(|row| row.id == id))
        else {
            return Ok(None);
        };

        if let (Some(target), serde_json::Value::Object(patch)) = (row.data.as_object_mut(), patch)
        {
            for (key, value) in patch {
                target.insert(key, value);
            }
        }
        tracing::debug!(table = %table, id = %id, "Updated row");
        Ok(Some(row.clone()))
    }

    async fn delete(&self, table: Table, id: Uuid) -> Result<bool, GatewayError> {
        self.check_writable()?;

        let mut tables = self.tables.write().map_err(poisoned)?;
        let Some(rows) = tables.get_mut(&table) else {
            return Ok(false);
        };
        let before = rows.len();
        rows.retain(|row| row.id != id);
        Ok(rows.len() < before)
    }

    async fn get(&self, table: Table, id: Uuid) -> Result<Option<Row>, GatewayError> {
        let tables = self.tables.read().map_err(poisoned)?;
        Ok(tables
            .get(&table)
            .and_then(|rows| rows.iter().find(|row| row.id == id))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_and_get() {
        let gateway = MemoryGateway::new();
        let row = gateway
            .insert(Table::ContactInquiries, json!({ "name": "Ada" }))
            .await
            .unwrap();

        let fetched = gateway.get(Table::ContactInquiries, row.id).await.unwrap();
        assert_eq!(fetched, Some(row));
        assert_eq!(gateway.len(Table::ContactInquiries), 1);
        assert!(gateway.is_empty(Table::Partners));
    }

    #[tokio::test]
    async fn test_insert_rejects_non_object() {
        let gateway = MemoryGateway::new();
        let err = gateway
            .insert(Table::Partners, json!(["not", "an", "object"]))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidRecord(_)));
    }

    #[tokio::test]
    async fn test_fail_writes_toggle() {
        let gateway = MemoryGateway::new();
        gateway.set_fail_writes(true);
        let err = gateway
            .insert(Table::CalculatorSubmissions, json!({}))
            .await
            .unwrap_err();
        assert!(err.is_transient());

        gateway.set_fail_writes(false);
        assert!(gateway.insert(Table::CalculatorSubmissions, json!({})).await.is_ok());
    }

    #[tokio::test]
    async fn test_order_by_key_puts_missing_last() {
        let gateway = MemoryGateway::new();
        for name in ["Charlie", "alpha-less", "Bravo"] {
            gateway.insert(Table::Partners, json!({ "name": name })).await.unwrap();
        }
        gateway.insert(Table::Partners, json!({ "other": 1 })).await.unwrap();

        let rows = gateway
            .select(
                Table::Partners,
                &SelectQuery::new().order_by(OrderBy::Key("name".to_string()), Direction::Asc),
            )
            .await
            .unwrap();
        let names: Vec<Option<&str>> = rows.iter().map(|r| r.data["name"].as_str()).collect();
        assert_eq!(names, vec![Some("Bravo"), Some("Charlie"), Some("alpha-less"), None]);
    }
}
