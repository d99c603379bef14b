//! Postgres gateway over a sqlx pool.
//!
//! Every table stores `(id uuid, created_at timestamptz, data jsonb)`.
//! Filters use jsonb containment, updates use `||` (shallow merge).

use crate::table::ensure_object;
use crate::{Direction, GatewayError, OrderBy, PersistenceGateway, Row, SelectQuery, Table};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scopewise_core::config::DatabaseConfig;
use sqlx::postgres::{PgArguments, PgPoolOptions, PgRow};
use sqlx::{Arguments, PgPool, Row as _};
use std::time::Duration;
use uuid::Uuid;

fn args_add<T>(args: &mut PgArguments, v: T) -> Result<(), GatewayError>
where
    T: Send + Sync + 'static,
    for<'q> T: sqlx::Encode<'q, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    args.add(v)
        .map_err(|e| GatewayError::Database(sqlx::Error::Encode(e)))
}

fn quote_ident(ident: &str) -> Result<String, GatewayError> {
    if ident.is_empty() {
        return Err(GatewayError::InvalidRecord("empty identifier".to_string()));
    }
    if !ident.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(GatewayError::InvalidRecord(format!(
            "invalid identifier '{}'",
            ident
        )));
    }
    Ok(format!("\"{}\"", ident))
}

fn row_from_pg(row: &PgRow) -> Result<Row, GatewayError> {
    Ok(Row {
        id: row.try_get::<Uuid, _>("id")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        data: row.try_get::<serde_json::Value, _>("data")?,
    })
}

pub struct PostgresGateway {
    pool: PgPool,
}

impl PostgresGateway {
    /// Connect using the database section of the configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, GatewayError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.pool.max_connections)
            .acquire_timeout(Duration::from_secs(config.pool.acquire_timeout_seconds))
            .connect(&config.connection_string())
            .await?;
        tracing::info!(
            database = %config.redacted_connection_string(),
            "Connected to Postgres"
        );
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create every table and its `created_at` index if missing.
    pub async fn init_schema(&self) -> Result<(), GatewayError> {
        for table in Table::ALL {
            let ident = quote_ident(table.as_str())?;
            let create = format!(
                "CREATE TABLE IF NOT EXISTS {} (\
                 id uuid PRIMARY KEY, \
                 created_at timestamptz NOT NULL DEFAULT now(), \
                 data jsonb NOT NULL DEFAULT '{{}}'::jsonb)",
                ident
            );
            sqlx::query(&create).execute(&self.pool).await?;

            let index = format!(
                "CREATE INDEX IF NOT EXISTS {} ON {} (created_at DESC)",
                quote_ident(&format!("{}_created_at_idx", table.as_str()))?,
                ident
            );
            sqlx::query(&index).execute(&self.pool).await?;
            tracing::debug!(table = %table, "Ensured table");
        }
        tracing::info!(tables = Table::ALL.len(), "Schema initialised");
        Ok(())
    }
}

#[async_trait]
impl PersistenceGateway for PostgresGateway {
    async fn insert(&self, table: Table, data: serde_json::Value) -> Result<Row, GatewayError> {
        ensure_object(&data)?;
        let sql = format!(
            "INSERT INTO {} (id, data) VALUES ($1, $2) RETURNING id, created_at, data",
            quote_ident(table.as_str())?
        );
        let rec = sqlx::query(&sql)
            .bind(Uuid::new_v4())
            .bind(sqlx::types::Json(data))
            .fetch_one(&self.pool)
            .await?;
        let row = row_from_pg(&rec)?;
        tracing::debug!(table = %table, id = %row.id, "Inserted row");
        Ok(row)
    }

    async fn select(&self, table: Table, query: &SelectQuery) -> Result<Vec<Row>, GatewayError> {
        let mut sql = format!(
            "SELECT id, created_at, data FROM {}",
            quote_ident(table.as_str())?
        );
        let mut args = PgArguments::default();
        let mut idx: usize = 1;

        if !query.filters.is_empty() {
            sql.push_str(&format!(" WHERE data @> ${}::jsonb", idx));
            args_add(
                &mut args,
                sqlx::types::Json(serde_json::Value::Object(query.filters.clone())),
            )?;
            idx += 1;
        }

        let direction = match query.order.direction {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        };
        match &query.order.by {
            OrderBy::CreatedAt => {
                sql.push_str(&format!(" ORDER BY created_at {}", direction));
            }
            OrderBy::Key(key) => {
                sql.push_str(&format!(
                    " ORDER BY data ->> ${} {}, created_at {}",
                    idx, direction, direction
                ));
                args_add(&mut args, key.clone())?;
                idx += 1;
            }
        }

        if let Some(limit) = query.limit {
            sql.push_str(&format!(" LIMIT ${}", idx));
            args_add(&mut args, i64::from(limit))?;
        }

        let recs = sqlx::query_with(&sql, args).fetch_all(&self.pool).await?;
        recs.iter().map(row_from_pg).collect()
    }

    async fn update(
        &self,
        table: Table,
        id: Uuid,
        patch: serde_json::Value,
    ) -> Result<Option<Row>, GatewayError> {
        ensure_object(&patch)?;
        let sql = format!(
            "UPDATE {} SET data = data || $1::jsonb WHERE id = $2 RETURNING id, created_at, data",
            quote_ident(table.as_str())?
        );
        let rec = sqlx::query(&sql)
            .bind(sqlx::types::Json(patch))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        rec.as_ref().map(row_from_pg).transpose()
    }

    async fn delete(&self, table: Table, id: Uuid) -> Result<bool, GatewayError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", quote_ident(table.as_str())?);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get(&self, table: Table, id: Uuid) -> Result<Option<Row>, GatewayError> {
        let sql = format!(
            "SELECT id, created_at, data FROM {} WHERE id = $1",
            quote_ident(table.as_str())?
        );
        let rec = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        rec.as_ref().map(row_from_pg).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("partners").unwrap(), "\"partners\"");
        assert!(quote_ident("").is_err());
        assert!(quote_ident("partners; drop table x").is_err());
    }

    #[test]
    fn test_table_names_are_valid_identifiers() {
        for table in Table::ALL {
            assert!(quote_ident(table.as_str()).is_ok());
        }
    }
}
