//! Partner directory listing and application review.

use crate::error::IntakeError;
use crate::submission::Stored;
use scopewise_core::{ApplicationStatus, MatchPreferences, Partner, PartnerApplication};
use scopewise_estimator::{ScoredPartner, rank_partners};
use scopewise_gateway::{GatewayError, PersistenceGateway, Row, SelectQuery, Table, to_record};
use serde_json::json;
use uuid::Uuid;

/// Decode a `partners` row. The row id is the partner id.
pub fn partner_from_row(row: &Row) -> Result<Partner, GatewayError> {
    let mut data = row.data.clone();
    if let Some(object) = data.as_object_mut() {
        object.insert("id".to_string(), json!(row.id));
    }
    serde_json::from_value(data).map_err(|e| {
        GatewayError::InvalidRecord(format!("partner row {} does not decode: {}", row.id, e))
    })
}

/// Every stored partner, approved or not. Rows that fail to decode are
/// skipped with a warning.
pub async fn load_partners(gateway: &dyn PersistenceGateway) -> Result<Vec<Partner>, IntakeError> {
    let rows = gateway.select(Table::Partners, &SelectQuery::new()).await?;
    let partners = rows
        .iter()
        .filter_map(|row| match partner_from_row(row) {
            Ok(partner) => Some(partner),
            Err(err) => {
                tracing::warn!(id = %row.id, error = %err, "Skipping malformed partner row");
                None
            }
        })
        .collect();
    Ok(partners)
}

/// Approved partners ranked against `preferences`.
pub async fn list_partners(
    gateway: &dyn PersistenceGateway,
    preferences: &MatchPreferences,
) -> Result<Vec<ScoredPartner>, IntakeError> {
    let partners = load_partners(gateway).await?;
    Ok(rank_partners(&partners, preferences))
}

/// Applications, newest first, optionally restricted to one status. Rows
/// that fail to decode are skipped with a warning.
pub async fn list_applications(
    gateway: &dyn PersistenceGateway,
    status: Option<ApplicationStatus>,
) -> Result<Vec<Stored<PartnerApplication>>, IntakeError> {
    let mut query = SelectQuery::new();
    if let Some(status) = status {
        query = query.filter("status", status.as_str());
    }
    let rows = gateway.select(Table::PartnerApplications, &query).await?;
    let applications = rows
        .iter()
        .filter_map(|row| match Stored::from_row(row) {
            Ok(stored) => Some(stored),
            Err(err) => {
                tracing::warn!(id = %row.id, error = %err, "Skipping malformed application row");
                None
            }
        })
        .collect();
    Ok(applications)
}

async fn pending_application(
    gateway: &dyn PersistenceGateway,
    id: Uuid,
) -> Result<PartnerApplication, IntakeError> {
    let row = gateway
        .get(Table::PartnerApplications, id)
        .await?
        .ok_or(IntakeError::NotFound {
            table: Table::PartnerApplications,
            id,
        })?;
    let application: PartnerApplication = row.decode()?;
    if application.status != ApplicationStatus::Pending {
        return Err(IntakeError::AlreadyReviewed {
            id,
            status: application.status,
        });
    }
    Ok(application)
}

async fn set_status(
    gateway: &dyn PersistenceGateway,
    id: Uuid,
    status: ApplicationStatus,
) -> Result<Stored<PartnerApplication>, IntakeError> {
    let row = gateway
        .update(
            Table::PartnerApplications,
            id,
            json!({ "status": status.as_str() }),
        )
        .await?
        .ok_or(IntakeError::NotFound {
            table: Table::PartnerApplications,
            id,
        })?;
    Ok(Stored::from_row(&row)?)
}

/// Mark a pending application approved and publish it as a partner.
pub async fn approve_application(
    gateway: &dyn PersistenceGateway,
    id: Uuid,
) -> Result<Partner, IntakeError> {
    let application = pending_application(gateway, id).await?;

    let mut data = to_record(&application.to_partner(Uuid::nil()))?;
    if let Some(object) = data.as_object_mut() {
        object.remove("id");
        object.insert("applicationId".to_string(), json!(id));
    }
    let row = gateway.insert(Table::Partners, data).await?;
    if let Err(err) = set_status(gateway, id, ApplicationStatus::Approved).await {
        // Unpublish so a retry does not list the partner twice.
        if let Err(cleanup) = gateway.delete(Table::Partners, row.id).await {
            tracing::error!(
                application_id = %id,
                partner_id = %row.id,
                error = %cleanup,
                "Failed to remove partner after approval failed"
            );
        }
        return Err(err);
    }

    let partner = partner_from_row(&row)?;
    tracing::info!(
        application_id = %id,
        partner_id = %partner.id,
        name = %partner.name,
        "Approved partner application"
    );
    Ok(partner)
}

/// Mark a pending application rejected.
pub async fn reject_application(
    gateway: &dyn PersistenceGateway,
    id: Uuid,
) -> Result<Stored<PartnerApplication>, IntakeError> {
    pending_application(gateway, id).await?;
    let stored = set_status(gateway, id, ApplicationStatus::Rejected).await?;
    tracing::info!(application_id = %id, "Rejected partner application");
    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::submit_partner_application;
    use pretty_assertions::assert_eq;
    use scopewise_core::Feature;
    use async_trait::async_trait;
    use scopewise_gateway::MemoryGateway;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Memory gateway whose updates can be switched off.
    #[derive(Default)]
    struct UpdateOutage {
        inner: MemoryGateway,
        down: AtomicBool,
    }

    #[async_trait]
    impl PersistenceGateway for UpdateOutage {
        async fn insert(&self, table: Table, data: serde_json::Value) -> Result<Row, GatewayError> {
            self.inner.insert(table, data).await
        }

        async fn select(&self, table: Table, query: &SelectQuery) -> Result<Vec<Row>, GatewayError> {
            self.inner.select(table, query).await
        }

        async fn update(
            &self,
            table: Table,
            id: Uuid,
            patch: serde_json::Value,
        ) -> Result<Option<Row>, GatewayError> {
            if self.down.load(Ordering::SeqCst) {
                return Err(GatewayError::Unavailable("update down".to_string()));
            }
            self.inner.update(table, id, patch).await
        }

        async fn delete(&self, table: Table, id: Uuid) -> Result<bool, GatewayError> {
            self.inner.delete(table, id).await
        }

        async fn get(&self, table: Table, id: Uuid) -> Result<Option<Row>, GatewayError> {
            self.inner.get(table, id).await
        }
    }

    fn application(name: &str) -> PartnerApplication {
        PartnerApplication {
            company_name: name.to_string(),
            contact_name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            services: vec![Feature::Lakehouse, Feature::BusinessIntelligence],
            industries: vec!["Retail".to_string()],
            languages: vec!["English".to_string()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_approve_publishes_partner() {
        let gateway = MemoryGateway::new();
        let row = submit_partner_application(&gateway, &application("Lakeside"))
            .await
            .unwrap();

        let partner = approve_application(&gateway, row.id).await.unwrap();
        assert_eq!(partner.name, "Lakeside");
        assert!(partner.approved);

        let listed = list_partners(&gateway, &MatchPreferences::default())
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].partner.id, partner.id);

        let approved = list_applications(&gateway, Some(ApplicationStatus::Approved))
            .await
            .unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].id, row.id);
    }

    #[tokio::test]
    async fn test_review_is_one_shot() {
        let gateway = MemoryGateway::new();
        let row = submit_partner_application(&gateway, &application("Once"))
            .await
            .unwrap();

        reject_application(&gateway, row.id).await.unwrap();
        let err = approve_application(&gateway, row.id).await.unwrap_err();
        assert!(matches!(
            err,
            IntakeError::AlreadyReviewed {
                status: ApplicationStatus::Rejected,
                ..
            }
        ));
        assert!(gateway.is_empty(Table::Partners));
    }

    #[tokio::test]
    async fn test_failed_approval_unpublishes_partner() {
        let gateway = UpdateOutage::default();
        let row = submit_partner_application(&gateway, &application("Dup"))
            .await
            .unwrap();

        gateway.down.store(true, Ordering::SeqCst);
        let err = approve_application(&gateway, row.id).await.unwrap_err();
        assert!(matches!(err, IntakeError::Gateway(GatewayError::Unavailable(_))));
        assert!(gateway.inner.is_empty(Table::Partners));

        gateway.down.store(false, Ordering::SeqCst);
        approve_application(&gateway, row.id).await.unwrap();

        let listed = list_partners(&gateway, &MatchPreferences::default())
            .await
            .unwrap();
        let names: Vec<&str> = listed.iter().map(|s| s.partner.name.as_str()).collect();
        assert_eq!(names, vec!["Dup"]);
    }

    #[tokio::test]
    async fn test_malformed_application_rows_are_skipped() {
        let gateway = MemoryGateway::new();
        gateway
            .insert(
                Table::PartnerApplications,
                json!({ "status": "pending", "services": "not-a-list" }),
            )
            .await
            .unwrap();
        submit_partner_application(&gateway, &application("Readable"))
            .await
            .unwrap();

        let all = list_applications(&gateway, None).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].record.company_name, "Readable");
    }

    #[tokio::test]
    async fn test_unknown_application() {
        let gateway = MemoryGateway::new();
        let err = reject_application(&gateway, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, IntakeError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_malformed_partner_rows_are_skipped() {
        let gateway = MemoryGateway::new();
        gateway
            .insert(Table::Partners, json!({ "services": "not-a-list" }))
            .await
            .unwrap();
        gateway
            .insert(Table::Partners, json!({ "name": "Valid", "approved": true }))
            .await
            .unwrap();

        let partners = load_partners(&gateway).await.unwrap();
        assert_eq!(partners.len(), 1);
        assert_eq!(partners[0].name, "Valid");
    }

    #[tokio::test]
    async fn test_pending_filter() {
        let gateway = MemoryGateway::new();
        let first = submit_partner_application(&gateway, &application("First"))
            .await
            .unwrap();
        submit_partner_application(&gateway, &application("Second"))
            .await
            .unwrap();
        reject_application(&gateway, first.id).await.unwrap();

        let pending = list_applications(&gateway, Some(ApplicationStatus::Pending))
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].record.company_name, "Second");

        let all = list_applications(&gateway, None).await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
