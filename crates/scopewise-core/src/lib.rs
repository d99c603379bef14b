//! # scopewise-core
//!
//! Shared types for every Scopewise crate:
//!
//! - [`RequirementsRecord`]: everything the wizard collects about a project
//! - the closed flag categories in [`flags`] (features, governance, ...)
//! - [`CostBreakdown`]: the priced result of a record
//! - partner directory and inbound form payloads in [`directory`]
//! - [`ScopewiseConfig`]: the YAML configuration

pub mod config;
pub mod cost;
pub mod directory;
pub mod flags;
pub mod locale;
pub mod requirements;

pub use config::{ConfigError, ScopewiseConfig};
pub use cost::{CostBreakdown, format_amount};
pub use directory::{
    ApplicationStatus, ContactInquiry, MatchPreferences, Partner, PartnerApplication,
    PartnerInquiry,
};
pub use flags::{
    AnalyticsCapability, AnalyticsFlags, AuthenticationFlags, AuthenticationMethod,
    CustomDevelopment, CustomDevelopmentFlags, DataSource, DataSourceFlags, DataType,
    DataTypeFlags, Feature, FeatureFlags, GovernanceCapability, GovernanceFlags,
};
pub use locale::Locale;
pub use requirements::{
    BackupRecovery, ComputeTier, ContactDetails, DataVolume, Environment, GeographicScope,
    RequirementsRecord, Scalability, SlaRequirements, Sustainability, UptimeTarget,
    VendorCriteria, is_filled,
};
