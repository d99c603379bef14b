//! End-to-end wizard flow against the in-memory gateway.
//!
//! Run with: cargo test --package scopewise-intake --test wizard_flow

use pretty_assertions::assert_eq;
use scopewise_core::{
    AnalyticsCapability, AuthenticationMethod, ComputeTier, DataSource, DataVolume, Feature,
    Locale, UptimeTarget,
};
use scopewise_gateway::{MemoryGateway, PersistenceGateway, SelectQuery, Table};
use scopewise_intake::{Advance, CalculatorSubmission, Step, Stored, Wizard};
use std::sync::Arc;

/// Fill in whatever the current step asks for, the way a user would.
fn fill_step(wizard: &mut Wizard) {
    let step = wizard.step();
    let record = wizard.record_mut();
    match step {
        Step::Overview => {
            record.project_goal = "Replace the legacy warehouse".to_string();
            record.project_scope = "All finance data marts".to_string();
            record.expected_outcome = "Daily refreshed reporting".to_string();
            record.industry = "Retail".to_string();
        }
        Step::Components => {
            record.features.set(Feature::DataWarehouse, true);
            record.features.set(Feature::BusinessIntelligence, true);
        }
        Step::DataLandscape => {
            record.data_volume = DataVolume::Large;
            record.data_sources.set(DataSource::SaasApplications, true);
        }
        Step::Analytics => {
            record.analytics.set(AnalyticsCapability::Dashboards, true);
        }
        Step::Compute => record.compute_tier = ComputeTier::Standard,
        Step::AccessSecurity => {
            record.authentication.set(AuthenticationMethod::MultiFactor, true);
        }
        Step::Sla => record.sla.uptime = UptimeTarget::Critical,
        Step::VendorPlanning => record.timeline = "Within six months".to_string(),
        Step::Contact => {
            record.contact.company_name = "Corner Shop Ltd".to_string();
            record.contact.contact_name = "Riley".to_string();
            record.contact.email = "riley@cornershop.example".to_string();
            record.contact.phone = "+44 20 0000".to_string();
        }
        _ => {}
    }
}

#[tokio::test]
async fn test_wizard_happy_path_stores_one_submission() {
    let gateway = Arc::new(MemoryGateway::new());
    let mut wizard = Wizard::new(gateway.clone(), Locale::new("en"));

    let mut moves = 0;
    let breakdown = loop {
        fill_step(&mut wizard);
        match wizard.next().await {
            Advance::Moved(_) => moves += 1,
            Advance::Submitted { breakdown, .. } => break breakdown,
            other => panic!("unexpected {other:?} at {}", wizard.step()),
        }
    };

    assert_eq!(moves, 12);
    assert!(wizard.is_complete());
    assert!(breakdown.is_consistent());
    // (800 + 600) * 2.5 * 1.8 * 1.25 * 1.15 * 1.5
    assert_eq!(breakdown.infrastructure, 13_584);

    let rows = gateway
        .select(Table::CalculatorSubmissions, &SelectQuery::new())
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);

    let stored: Stored<CalculatorSubmission> = Stored::from_row(&rows[0]).unwrap();
    assert_eq!(stored.record.record, *wizard.record());
    assert_eq!(stored.record.estimated_costs, breakdown);
}

#[tokio::test]
async fn test_gating_blocks_each_required_step() {
    let gateway = Arc::new(MemoryGateway::new());
    let mut wizard = Wizard::new(gateway, Locale::default());

    while !wizard.step().is_terminal() {
        let step = wizard.step();
        if !step.is_optional() {
            assert!(
                matches!(wizard.next().await, Advance::Blocked(_)),
                "{step} should block while empty"
            );
            assert_eq!(wizard.step(), step);
        }
        fill_step(&mut wizard);
        wizard.next().await;
    }
    assert!(wizard.state().results_visible);
}
