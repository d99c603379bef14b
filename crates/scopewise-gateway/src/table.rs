//! Tables, rows and select queries shared by every gateway.

use crate::GatewayError;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Backend tables. Every table has the same `{id, created_at, data}` shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    CalculatorSubmissions,
    ContactInquiries,
    PartnerApplications,
    Partners,
    PartnerInquiries,
}

impl Table {
    pub const ALL: &'static [Table] = &[
        Table::CalculatorSubmissions,
        Table::ContactInquiries,
        Table::PartnerApplications,
        Table::Partners,
        Table::PartnerInquiries,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Table::CalculatorSubmissions => "calculator_submissions",
            Table::ContactInquiries => "contact_inquiries",
            Table::PartnerApplications => "partner_applications",
            Table::Partners => "partners",
            Table::PartnerInquiries => "partner_inquiries",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One stored row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub data: serde_json::Value,
}

impl Row {
    /// Decode the JSON payload into a typed record.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, GatewayError> {
        serde_json::from_value(self.data.clone()).map_err(|e| {
            GatewayError::InvalidRecord(format!("row {} does not decode: {}", self.id, e))
        })
    }
}

/// Serialize a typed record into a storable JSON object.
pub fn to_record<T: Serialize>(value: &T) -> Result<serde_json::Value, GatewayError> {
    let data = serde_json::to_value(value)?;
    ensure_object(&data)?;
    Ok(data)
}

pub(crate) fn ensure_object(data: &serde_json::Value) -> Result<(), GatewayError> {
    if data.is_object() {
        Ok(())
    } else {
        Err(GatewayError::InvalidRecord(
            "payload must be a JSON object".to_string(),
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    #[default]
    Desc,
}

/// Sort key of a select.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderBy {
    #[default]
    CreatedAt,
    /// Text value of a top-level JSON key. Rows without the key sort as
    /// larger than any value.
    Key(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Order {
    pub by: OrderBy,
    pub direction: Direction,
}

/// Equality filters on top-level JSON keys, an order and an optional limit.
///
/// The default query returns every row, newest first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectQuery {
    pub filters: serde_json::Map<String, serde_json::Value>,
    pub order: Order,
    pub limit: Option<u32>,
}

impl SelectQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    pub fn order_by(mut self, by: OrderBy, direction: Direction) -> Self {
        self.order = Order { by, direction };
        self
    }

    pub fn oldest_first(self) -> Self {
        self.order_by(OrderBy::CreatedAt, Direction::Asc)
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether `data` satisfies every filter.
    pub fn matches(&self, data: &serde_json::Value) -> bool {
        self.filters
            .iter()
            .all(|(key, expected)| data.get(key) == Some(expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_table_names_round_trip() {
        for table in Table::ALL {
            assert_eq!(Table::from_name(table.as_str()), Some(*table));
        }
        assert_eq!(Table::from_name("users"), None);
    }

    #[test]
    fn test_select_query_matches() {
        let query = SelectQuery::new()
            .filter("status", "pending")
            .filter("premium", true);

        assert!(query.matches(&json!({ "status": "pending", "premium": true, "name": "x" })));
        assert!(!query.matches(&json!({ "status": "approved", "premium": true })));
        assert!(!query.matches(&json!({ "status": "pending" })));
        assert!(SelectQuery::new().matches(&json!({})));
    }

    #[test]
    fn test_to_record_rejects_non_objects() {
        assert!(to_record(&json!({ "a": 1 })).is_ok());
        let err = to_record(&vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidRecord(_)));
    }

    #[test]
    fn test_default_order_is_newest_first() {
        let query = SelectQuery::new();
        assert_eq!(query.order.by, OrderBy::CreatedAt);
        assert_eq!(query.order.direction, Direction::Desc);
        assert_eq!(query.limit, None);
    }
}
