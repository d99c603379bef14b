//! The requirements record collected by the wizard.
//!
//! The record is serialized with camelCase keys, which is also the shape
//! stored in the `calculator_submissions` table.

use crate::flags::{
    AnalyticsFlags, AuthenticationFlags, CustomDevelopmentFlags, DataSourceFlags, DataTypeFlags,
    FeatureFlags, GovernanceFlags,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Expected amount of data under management.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataVolume {
    #[default]
    Small,
    Medium,
    Large,
    Enterprise,
    /// A value this build does not recognise.
    #[serde(other)]
    Unknown,
}

impl DataVolume {
    pub fn label(self) -> &'static str {
        match self {
            DataVolume::Small => "Small (< 1 TB)",
            DataVolume::Medium => "Medium (1-10 TB)",
            DataVolume::Large => "Large (10-100 TB)",
            DataVolume::Enterprise => "Enterprise (> 100 TB)",
            DataVolume::Unknown => "Not specified",
        }
    }
}

/// Compute capacity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComputeTier {
    #[default]
    Basic,
    Standard,
    Premium,
    #[serde(other)]
    Unknown,
}

impl ComputeTier {
    pub fn label(self) -> &'static str {
        match self {
            ComputeTier::Basic => "Basic",
            ComputeTier::Standard => "Standard",
            ComputeTier::Premium => "Premium",
            ComputeTier::Unknown => "Not specified",
        }
    }
}

/// Geographic footprint of the deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeographicScope {
    #[default]
    Single,
    MultiRegion,
    Global,
    #[serde(other)]
    Unknown,
}

impl GeographicScope {
    pub fn label(self) -> &'static str {
        match self {
            GeographicScope::Single => "Single region",
            GeographicScope::MultiRegion => "Multi-region",
            GeographicScope::Global => "Global",
            GeographicScope::Unknown => "Not specified",
        }
    }
}

/// Hosting environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Environment {
    #[default]
    Cloud,
    Hybrid,
    OnPremises,
    MultiCloud,
    #[serde(other)]
    Unknown,
}

impl Environment {
    pub fn label(self) -> &'static str {
        match self {
            Environment::Cloud => "Cloud",
            Environment::Hybrid => "Hybrid",
            Environment::OnPremises => "On-premises",
            Environment::MultiCloud => "Multi-cloud",
            Environment::Unknown => "Not specified",
        }
    }
}

/// Uptime commitment, stored as the percentage string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UptimeTarget {
    #[default]
    #[serde(rename = "99.5")]
    Standard,
    #[serde(rename = "99.9")]
    High,
    #[serde(rename = "99.99")]
    Critical,
    #[serde(other)]
    Unknown,
}

impl UptimeTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            UptimeTarget::Standard => "99.5",
            UptimeTarget::High => "99.9",
            UptimeTarget::Critical => "99.99",
            UptimeTarget::Unknown => "unknown",
        }
    }
}

impl fmt::Display for UptimeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UptimeTarget::Unknown => f.write_str("not specified"),
            other => write!(f, "{}%", other.as_str()),
        }
    }
}

/// Service level expectations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlaRequirements {
    pub uptime: UptimeTarget,
    pub response_time: String,
    pub availability: String,
}

/// Backup and recovery objectives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackupRecovery {
    pub rto: String,
    pub rpo: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Scalability {
    pub growth_projections: String,
    pub expected_users: String,
    pub peak_load: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sustainability {
    pub goals: String,
    pub carbon_reporting: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VendorCriteria {
    pub criteria: String,
    pub support_expectations: String,
    pub certifications: String,
}

/// Who to get back to. Everything except `job_title` is required before
/// a submission is made.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactDetails {
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub job_title: String,
}

/// Everything the wizard collects about a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequirementsRecord {
    // Overview
    pub project_goal: String,
    pub project_scope: String,
    pub expected_outcome: String,
    pub industry: String,
    pub current_challenges: String,

    // Platform components
    pub features: FeatureFlags,

    // Data landscape
    pub data_volume: DataVolume,
    pub data_types: DataTypeFlags,
    pub data_sources: DataSourceFlags,

    pub governance: GovernanceFlags,
    pub analytics: AnalyticsFlags,

    // Compute
    pub compute_tier: ComputeTier,
    pub geographic_scope: GeographicScope,

    // Infrastructure
    pub environment: Environment,
    pub existing_infrastructure: String,
    pub preferred_regions: String,

    pub authentication: AuthenticationFlags,

    pub sla: SlaRequirements,
    pub backup: BackupRecovery,

    pub custom_development: CustomDevelopmentFlags,
    pub integrations: String,

    pub scalability: Scalability,
    pub sustainability: Sustainability,
    pub vendor: VendorCriteria,

    pub timeline: String,
    pub budget_range: String,

    pub contact: ContactDetails,
}

impl RequirementsRecord {
    /// A record with every field at its documented default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a record from JSON.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Parse a record from YAML.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Human-readable names of the selected platform components.
    pub fn selected_feature_labels(&self) -> Vec<&'static str> {
        self.features.enabled_labels()
    }
}

/// True when the string has non-whitespace content.
pub fn is_filled(value: &str) -> bool {
    !value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::Feature;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let record = RequirementsRecord::new();
        assert_eq!(record.data_volume, DataVolume::Small);
        assert_eq!(record.compute_tier, ComputeTier::Basic);
        assert_eq!(record.geographic_scope, GeographicScope::Single);
        assert_eq!(record.environment, Environment::Cloud);
        assert_eq!(record.sla.uptime, UptimeTarget::Standard);
        assert_eq!(record.features.count_enabled(), 0);
        assert!(record.contact.company_name.is_empty());
    }

    #[test]
    fn test_parse_camel_case_json() {
        let record = RequirementsRecord::from_json(
            r#"{
                "projectGoal": "Unify reporting",
                "features": { "lakehouse": true },
                "dataVolume": "enterprise",
                "geographicScope": "multi-region",
                "sla": { "uptime": "99.99" },
                "scalability": { "growthProjections": "3x in two years" },
                "contact": { "companyName": "Acme" }
            }"#,
        )
        .unwrap();

        assert_eq!(record.project_goal, "Unify reporting");
        assert!(record.features.get(Feature::Lakehouse));
        assert_eq!(record.data_volume, DataVolume::Enterprise);
        assert_eq!(record.geographic_scope, GeographicScope::MultiRegion);
        assert_eq!(record.sla.uptime, UptimeTarget::Critical);
        assert_eq!(record.scalability.growth_projections, "3x in two years");
        assert_eq!(record.contact.company_name, "Acme");
    }

    #[test]
    fn test_unrecognised_enum_values_become_unknown() {
        let record = RequirementsRecord::from_json(
            r#"{ "dataVolume": "galactic", "computeTier": "quantum", "sla": { "uptime": "100" } }"#,
        )
        .unwrap();
        assert_eq!(record.data_volume, DataVolume::Unknown);
        assert_eq!(record.compute_tier, ComputeTier::Unknown);
        assert_eq!(record.sla.uptime, UptimeTarget::Unknown);
    }

    #[test]
    fn test_parse_yaml() {
        let record = RequirementsRecord::from_yaml(
            "projectGoal: Migrate warehouse\nenvironment: on-premises\nfeatures:\n  dataWarehouse: true\n",
        )
        .unwrap();
        assert_eq!(record.environment, Environment::OnPremises);
        assert_eq!(record.selected_feature_labels(), vec!["Data Warehouse"]);
    }

    #[test]
    fn test_uptime_display() {
        assert_eq!(UptimeTarget::High.to_string(), "99.9%");
        assert_eq!(UptimeTarget::Unknown.to_string(), "not specified");
    }

    #[test]
    fn test_is_filled() {
        assert!(is_filled("x"));
        assert!(!is_filled("   \n"));
    }
}
