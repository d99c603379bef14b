//! Weighted multiplier cost model.
//!
//! The price of a record is the sum of the selected feature prices, scaled by
//! a fixed sequence of multipliers:
//!
//! 1. data volume, compute tier and geographic scope (lookup tables)
//! 2. one "density" multiplier per capability category, linear in the number
//!    of selected capabilities
//! 3. the SLA uptime commitment
//!
//! The scaled base is the infrastructure cost. Development and support are
//! fixed ratios of the same unrounded base. Each component is rounded on its
//! own, and `total` is the sum of the rounded components.

use scopewise_core::{
    ComputeTier, CostBreakdown, DataVolume, Feature, GeographicScope, RequirementsRecord,
    UptimeTarget,
};
use serde::Serialize;

/// Development effort as a ratio of the infrastructure base.
pub const DEVELOPMENT_RATIO: f64 = 1.8;
/// Yearly support as a ratio of the infrastructure base.
pub const SUPPORT_RATIO: f64 = 0.35;

/// Per-capability increments of the density multipliers.
pub const ANALYTICS_STEP: f64 = 0.25;
pub const GOVERNANCE_STEP: f64 = 0.2;
pub const AUTHENTICATION_STEP: f64 = 0.15;
pub const CUSTOM_DEVELOPMENT_STEP: f64 = 0.3;

pub fn data_volume_multiplier(volume: DataVolume) -> f64 {
    match volume {
        DataVolume::Small => 1.0,
        DataVolume::Medium => 1.5,
        DataVolume::Large => 2.5,
        DataVolume::Enterprise => 4.0,
        DataVolume::Unknown => 1.0,
    }
}

pub fn compute_multiplier(tier: ComputeTier) -> f64 {
    match tier {
        ComputeTier::Basic => 1.0,
        ComputeTier::Standard => 1.8,
        ComputeTier::Premium => 3.2,
        ComputeTier::Unknown => 1.0,
    }
}

pub fn geographic_multiplier(scope: GeographicScope) -> f64 {
    match scope {
        GeographicScope::Single => 1.0,
        GeographicScope::MultiRegion => 1.6,
        GeographicScope::Global => 2.4,
        GeographicScope::Unknown => 1.0,
    }
}

pub fn sla_multiplier(uptime: UptimeTarget) -> f64 {
    match uptime {
        UptimeTarget::Critical => 1.5,
        UptimeTarget::High => 1.2,
        UptimeTarget::Standard | UptimeTarget::Unknown => 1.0,
    }
}

/// `1 + step * count`.
pub fn density_multiplier(step: f64, selected: usize) -> f64 {
    1.0 + step * selected as f64
}

/// Every input of the formula, kept for explanations and the report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostFactors {
    /// Sum of the selected feature prices.
    pub feature_base: u32,
    pub data_volume: f64,
    pub compute: f64,
    pub geographic: f64,
    pub analytics: f64,
    pub governance: f64,
    pub authentication: f64,
    pub custom_development: f64,
    pub sla: f64,
    /// Unrounded infrastructure cost after every multiplier.
    pub scaled_base: f64,
}

impl CostFactors {
    /// Product of all multipliers.
    pub fn combined_multiplier(&self) -> f64 {
        self.data_volume
            * self.compute
            * self.geographic
            * self.analytics
            * self.governance
            * self.authentication
            * self.custom_development
            * self.sla
    }
}

/// Breakdown together with the factors that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    pub breakdown: CostBreakdown,
    pub factors: CostFactors,
}

/// Price a requirements record.
///
/// Pure and total: identical records always produce identical breakdowns.
pub fn estimate(record: &RequirementsRecord) -> CostBreakdown {
    estimate_with_details(record).breakdown
}

/// Price a requirements record and keep the intermediate factors.
pub fn estimate_with_details(record: &RequirementsRecord) -> Estimate {
    let feature_base: u32 = record
        .features
        .enabled()
        .into_iter()
        .map(Feature::price)
        .sum();

    let factors = CostFactors {
        feature_base,
        data_volume: data_volume_multiplier(record.data_volume),
        compute: compute_multiplier(record.compute_tier),
        geographic: geographic_multiplier(record.geographic_scope),
        analytics: density_multiplier(ANALYTICS_STEP, record.analytics.count_enabled()),
        governance: density_multiplier(GOVERNANCE_STEP, record.governance.count_enabled()),
        authentication: density_multiplier(
            AUTHENTICATION_STEP,
            record.authentication.count_enabled(),
        ),
        custom_development: density_multiplier(
            CUSTOM_DEVELOPMENT_STEP,
            record.custom_development.count_enabled(),
        ),
        sla: sla_multiplier(record.sla.uptime),
        scaled_base: 0.0,
    };

    // Applied one at a time, in the documented order.
    let mut base = f64::from(feature_base);
    for multiplier in [
        factors.data_volume,
        factors.compute,
        factors.geographic,
        factors.analytics,
        factors.governance,
        factors.authentication,
        factors.custom_development,
        factors.sla,
    ] {
        base *= multiplier;
    }

    let breakdown = CostBreakdown::from_components(
        round_units(base),
        round_units(base * DEVELOPMENT_RATIO),
        round_units(base * SUPPORT_RATIO),
    );

    tracing::debug!(
        feature_base,
        infrastructure = breakdown.infrastructure,
        total = breakdown.total,
        "Estimated project cost"
    );

    Estimate {
        breakdown,
        factors: CostFactors {
            scaled_base: base,
            ..factors
        },
    }
}

/// Round to whole currency units, halves away from zero.
fn round_units(value: f64) -> i64 {
    value.round() as i64
}
