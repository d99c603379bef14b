//! API request and response types.

use chrono::{DateTime, Utc};
use scopewise_core::{
    ApplicationStatus, CostBreakdown, Feature, Locale, MatchPreferences, RequirementsRecord,
};
use scopewise_gateway::Row;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: String,
    pub version: String,
}

/// Body of `POST /api/submissions`: a record plus an optional locale.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    #[serde(flatten)]
    pub record: RequirementsRecord,
    #[serde(default)]
    pub locale: Option<Locale>,
}

/// Response of `POST /api/submissions`. The estimate is returned even when
/// storing failed.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub breakdown: CostBreakdown,
    pub stored: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
}

/// Body of `POST /api/share`.
#[derive(Debug, Deserialize)]
pub struct ShareRequest {
    #[serde(flatten)]
    pub record: RequirementsRecord,
    /// Recipient for the mailto link.
    #[serde(default)]
    pub to: String,
}

/// Row id and timestamp of something just stored.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<&Row> for CreatedResponse {
    fn from(row: &Row) -> Self {
        Self {
            id: row.id,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub deleted: bool,
}

/// Query of `GET /api/submissions`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u32>,
}

/// Query of `GET /api/partner-applications`.
#[derive(Debug, Default, Deserialize)]
pub struct ApplicationQuery {
    pub status: Option<ApplicationStatus>,
}

/// Query of `GET /api/partners`. `features` is a comma-separated list of
/// feature wire names, e.g. `lakehouse,dataWarehouse`.
#[derive(Debug, Default, Deserialize)]
pub struct PartnerQuery {
    pub features: Option<String>,
    pub industry: Option<String>,
    pub language: Option<String>,
}

impl PartnerQuery {
    /// Parse into match preferences. Fails on an unknown feature name.
    pub fn to_preferences(&self) -> Result<MatchPreferences, String> {
        let features = match &self.features {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(|name| {
                    Feature::from_wire(name).ok_or_else(|| format!("unknown feature '{}'", name))
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };
        Ok(MatchPreferences {
            features,
            industry: self.industry.clone(),
            language: self.language.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partner_query_parsing() {
        let query = PartnerQuery {
            features: Some("lakehouse, dataWarehouse,,".to_string()),
            industry: Some("Retail".to_string()),
            language: None,
        };
        let prefs = query.to_preferences().unwrap();
        assert_eq!(prefs.features, vec![Feature::Lakehouse, Feature::DataWarehouse]);
        assert_eq!(prefs.industry.as_deref(), Some("Retail"));

        let bad = PartnerQuery {
            features: Some("teleport".to_string()),
            ..Default::default()
        };
        assert_eq!(bad.to_preferences().unwrap_err(), "unknown feature 'teleport'");
    }

    #[test]
    fn test_submission_request_with_locale() {
        let request: SubmissionRequest = serde_json::from_str(
            r#"{"projectGoal":"Goal","features":{"lakehouse":true},"locale":"DE"}"#,
        )
        .unwrap();
        assert_eq!(request.record.project_goal, "Goal");
        assert_eq!(request.locale.as_ref().map(Locale::as_str), Some("de"));
    }
}
