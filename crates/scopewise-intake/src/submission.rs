//! Stored calculator submissions.

use chrono::{DateTime, Utc};
use scopewise_core::{CostBreakdown, Locale, RequirementsRecord};
use scopewise_gateway::{GatewayError, PersistenceGateway, Row, Table, to_record};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// One row of `calculator_submissions`: the record, its price and the locale
/// it was entered in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorSubmission {
    #[serde(flatten)]
    pub record: RequirementsRecord,
    pub estimated_costs: CostBreakdown,
    #[serde(default)]
    pub locale: Locale,
}

impl CalculatorSubmission {
    pub fn new(record: RequirementsRecord, estimated_costs: CostBreakdown, locale: Locale) -> Self {
        Self {
            record,
            estimated_costs,
            locale,
        }
    }
}

/// A decoded row with its generated id and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stored<T> {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub record: T,
}

impl<T: DeserializeOwned> Stored<T> {
    pub fn from_row(row: &Row) -> Result<Self, GatewayError> {
        Ok(Self {
            id: row.id,
            created_at: row.created_at,
            record: row.decode()?,
        })
    }
}

/// Insert a submission and wait for the result.
pub async fn store_submission(
    gateway: &dyn PersistenceGateway,
    submission: &CalculatorSubmission,
) -> Result<Row, GatewayError> {
    let row = gateway
        .insert(Table::CalculatorSubmissions, to_record(submission)?)
        .await?;
    tracing::info!(
        id = %row.id,
        company = %submission.record.contact.company_name,
        total = submission.estimated_costs.total,
        "Stored calculator submission"
    );
    Ok(row)
}

/// Insert a submission on a background task.
///
/// The caller owns the handle; dropping it detaches the task.
pub fn spawn_submission(
    gateway: Arc<dyn PersistenceGateway>,
    submission: CalculatorSubmission,
) -> JoinHandle<Result<Row, GatewayError>> {
    tokio::spawn(async move { store_submission(gateway.as_ref(), &submission).await })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::tests::complete_record;
    use scopewise_gateway::{MemoryGateway, SelectQuery};

    #[tokio::test]
    async fn test_submission_row_shape() {
        let gateway = MemoryGateway::new();
        let record = complete_record();
        let costs = scopewise_estimator::estimate(&record);
        let submission = CalculatorSubmission::new(record, costs, Locale::new("de"));

        let row = store_submission(&gateway, &submission).await.unwrap();
        assert_eq!(row.data["projectGoal"], "Consolidate reporting");
        assert_eq!(row.data["contact"]["companyName"], "Acme GmbH");
        assert_eq!(row.data["estimatedCosts"]["total"], costs.total);
        assert_eq!(row.data["locale"], "de");

        let stored: Stored<CalculatorSubmission> = Stored::from_row(&row).unwrap();
        assert_eq!(stored.id, row.id);
        assert_eq!(stored.record, submission);
    }

    #[tokio::test]
    async fn test_spawned_submission_settles() {
        let gateway = Arc::new(MemoryGateway::new());
        let submission = CalculatorSubmission::new(
            complete_record(),
            CostBreakdown::zero(),
            Locale::default(),
        );

        let handle = spawn_submission(gateway.clone(), submission);
        handle.await.unwrap().unwrap();

        let rows = gateway
            .select(Table::CalculatorSubmissions, &SelectQuery::new())
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
    }
}
