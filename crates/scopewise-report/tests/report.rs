//! Report generation end to end.
//!
//! Run with: cargo test --package scopewise-report --test report

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use scopewise_core::{
    AuthenticationMethod, DataSource, DataType, Feature, GovernanceCapability,
    RequirementsRecord, config::ReportConfig,
};
use scopewise_report::{CONTENT_TYPE, ReportError, generate_report};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn full_record() -> RequirementsRecord {
    let mut r = RequirementsRecord::new();
    r.project_goal = "Consolidate finance and supply chain reporting".to_string();
    r.project_scope = "Twelve source systems across three business units".to_string();
    r.expected_outcome = "Daily refreshed dashboards".to_string();
    r.industry = "Manufacturing".to_string();
    r.current_challenges = "Spreadsheets everywhere. ".repeat(40);
    r.features = [Feature::Lakehouse, Feature::DataFactory, Feature::BusinessIntelligence]
        .into_iter()
        .collect();
    r.data_types.set(DataType::Structured, true);
    r.data_sources.set(DataSource::RelationalDatabases, true);
    r.governance.set(GovernanceCapability::Lineage, true);
    r.authentication.set(AuthenticationMethod::SingleSignOn, true);
    r.sla.response_time = "4 hours".to_string();
    r.backup.rto = "8 hours".to_string();
    r.scalability.expected_users = "2,000".to_string();
    r.vendor.criteria = "Local presence".to_string();
    r.integrations = "SAP, Salesforce".to_string();
    r.timeline = "Q3".to_string();
    r.budget_range = "250k - 500k".to_string();
    r.contact.company_name = "Northwind Traders".to_string();
    r.contact.contact_name = "Alex".to_string();
    r.contact.email = "alex@northwind.example".to_string();
    r.contact.phone = "+1 555 0100".to_string();
    r
}

#[test]
fn test_generate_full_report() {
    let record = full_record();
    let report = generate_report(&record, &ReportConfig::default(), date()).unwrap();

    assert_eq!(CONTENT_TYPE, "application/pdf");
    assert_eq!(report.file_name, "northwind-traders-requirements-report.pdf");
    assert_eq!(report.document_id, "SW-NORTHWIND-TRADERS-20261019");
    assert!(report.bytes.starts_with(b"%PDF-"));
    assert!(report.page_count >= 2, "cover page plus body");

    let parsed = lopdf::Document::load_mem(&report.bytes).unwrap();
    assert_eq!(parsed.get_pages().len(), report.page_count);

    // Everything filled in above, minus Customization and Sustainability.
    assert_eq!(
        report.sections,
        vec![
            "Executive Summary",
            "Platform Components",
            "Data Sources & Types",
            "Data Governance",
            "Compute & Performance",
            "Infrastructure & Environment",
            "Access & Security",
            "Service Level Agreement",
            "Scalability & Future Expansion",
            "Vendor Criteria",
            "Integrations",
            "Timeline",
            "Budget",
        ]
    );
}

#[test]
fn test_growth_projection_only_affects_its_subsection() {
    let mut record = full_record();
    record.scalability.growth_projections.clear();
    let sections = scopewise_report::report_sections(&record);
    let scalability = sections
        .iter()
        .find(|s| s.title == "Scalability & Future Expansion")
        .unwrap();
    let labels: Vec<&str> = scalability.subsections.iter().map(|s| s.label).collect();
    assert_eq!(labels, vec!["Expected Users"]);

    record.scalability.growth_projections = "Double within two years".to_string();
    let sections = scopewise_report::report_sections(&record);
    let scalability = sections
        .iter()
        .find(|s| s.title == "Scalability & Future Expansion")
        .unwrap();
    let labels: Vec<&str> = scalability.subsections.iter().map(|s| s.label).collect();
    assert_eq!(labels, vec!["Growth Projections", "Expected Users"]);
}

#[test]
fn test_empty_record_still_generates() {
    let report =
        generate_report(&RequirementsRecord::new(), &ReportConfig::default(), date()).unwrap();
    assert_eq!(report.file_name, "project-requirements-report.pdf");
    assert_eq!(report.document_id, "SW-PROJECT-20261019");
    assert!(report.page_count >= 2);
}

#[test]
fn test_hostile_text_is_tolerated() {
    let mut record = full_record();
    record.contact.company_name = "数据 \u{1b}[2J Ltd\n\n".to_string();
    record.project_goal = format!("{}\u{0}", "x".repeat(5000));

    let report = generate_report(&record, &ReportConfig::default(), date()).unwrap();
    assert_eq!(report.file_name, "2j-ltd-requirements-report.pdf");
    assert!(lopdf::Document::load_mem(&report.bytes).is_ok());
}

#[test]
fn test_report_error_messages() {
    assert_eq!(
        ReportError::Encode("boom".to_string()).to_string(),
        "PDF encoding failed: boom"
    );
}
