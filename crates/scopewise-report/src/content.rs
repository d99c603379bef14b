//! What goes into a requirements report, independent of how it is drawn.

use crate::document::{Document, DocumentBuilder, TableRow};
use crate::text::sanitize;
use chrono::NaiveDate;
use scopewise_core::{
    ComputeTier, DataVolume, Environment, GeographicScope, RequirementsRecord, UptimeTarget,
    config::ReportConfig, format_amount,
};
use scopewise_estimator::Estimate;

/// Body of a subsection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubsectionBody {
    Text(String),
    List(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subsection {
    pub label: &'static str,
    pub body: SubsectionBody,
}

impl Subsection {
    /// `None` when the value is blank once sanitized.
    fn text(label: &'static str, value: &str) -> Option<Self> {
        let value = sanitize(value);
        (!value.is_empty()).then_some(Self {
            label,
            body: SubsectionBody::Text(value),
        })
    }

    fn list(label: &'static str, items: Vec<&'static str>) -> Option<Self> {
        (!items.is_empty()).then(|| Self {
            label,
            body: SubsectionBody::List(items.into_iter().map(str::to_string).collect()),
        })
    }

    /// Enum choices are always shown unless the stored value was not recognised.
    fn choice(label: &'static str, value: &'static str, known: bool) -> Option<Self> {
        known.then(|| Self {
            label,
            body: SubsectionBody::Text(value.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub subsections: Vec<Subsection>,
}

/// Body section titles in report order.
pub const SECTION_TITLES: [&str; 16] = [
    "Executive Summary",
    "Platform Components",
    "Data Sources & Types",
    "Data Governance",
    "Analytics Capabilities",
    "Compute & Performance",
    "Infrastructure & Environment",
    "Access & Security",
    "Service Level Agreement",
    "Customization & Development",
    "Scalability & Future Expansion",
    "Sustainability",
    "Vendor Criteria",
    "Integrations",
    "Timeline",
    "Budget",
];

/// The body sections of a report. Empty subsections are dropped and a
/// section left without subsections is omitted.
pub fn report_sections(record: &RequirementsRecord) -> Vec<Section> {
    let r = record;
    let candidates: [Vec<Option<Subsection>>; 16] = [
        vec![
            Subsection::text("Project Goal", &r.project_goal),
            Subsection::text("Project Scope", &r.project_scope),
            Subsection::text("Expected Outcome", &r.expected_outcome),
            Subsection::text("Industry", &r.industry),
            Subsection::text("Current Challenges", &r.current_challenges),
        ],
        vec![Subsection::list(
            "Selected Components",
            r.features.enabled_labels(),
        )],
        vec![
            Subsection::choice(
                "Data Volume",
                r.data_volume.label(),
                r.data_volume != DataVolume::Unknown,
            ),
            Subsection::list("Data Types", r.data_types.enabled_labels()),
            Subsection::list("Data Sources", r.data_sources.enabled_labels()),
        ],
        vec![Subsection::list(
            "Governance Capabilities",
            r.governance.enabled_labels(),
        )],
        vec![Subsection::list(
            "Required Capabilities",
            r.analytics.enabled_labels(),
        )],
        vec![
            Subsection::choice(
                "Compute Tier",
                r.compute_tier.label(),
                r.compute_tier != ComputeTier::Unknown,
            ),
            Subsection::choice(
                "Geographic Scope",
                r.geographic_scope.label(),
                r.geographic_scope != GeographicScope::Unknown,
            ),
        ],
        vec![
            Subsection::choice(
                "Environment",
                r.environment.label(),
                r.environment != Environment::Unknown,
            ),
            Subsection::text("Existing Infrastructure", &r.existing_infrastructure),
            Subsection::text("Preferred Regions", &r.preferred_regions),
        ],
        vec![Subsection::list(
            "Authentication Methods",
            r.authentication.enabled_labels(),
        )],
        vec![
            uptime_subsection(r.sla.uptime),
            Subsection::text("Response Time", &r.sla.response_time),
            Subsection::text("Availability", &r.sla.availability),
            Subsection::text("Recovery Time Objective", &r.backup.rto),
            Subsection::text("Recovery Point Objective", &r.backup.rpo),
        ],
        vec![Subsection::list(
            "Custom Development",
            r.custom_development.enabled_labels(),
        )],
        vec![
            Subsection::text("Growth Projections", &r.scalability.growth_projections),
            Subsection::text("Expected Users", &r.scalability.expected_users),
            Subsection::text("Peak Load", &r.scalability.peak_load),
        ],
        vec![
            Subsection::text("Sustainability Goals", &r.sustainability.goals),
            r.sustainability
                .carbon_reporting
                .then(|| Subsection::text("Carbon Reporting", "Required"))
                .flatten(),
        ],
        vec![
            Subsection::text("Selection Criteria", &r.vendor.criteria),
            Subsection::text("Support Expectations", &r.vendor.support_expectations),
            Subsection::text("Certifications", &r.vendor.certifications),
        ],
        vec![Subsection::text("Integrations", &r.integrations)],
        vec![Subsection::text("Target Timeline", &r.timeline)],
        vec![Subsection::text("Budget Range", &r.budget_range)],
    ];

    SECTION_TITLES
        .iter()
        .zip(candidates)
        .filter_map(|(title, subsections)| {
            let subsections: Vec<Subsection> = subsections.into_iter().flatten().collect();
            (!subsections.is_empty()).then_some(Section {
                title: *title,
                subsections,
            })
        })
        .collect()
}

fn uptime_subsection(uptime: UptimeTarget) -> Option<Subsection> {
    (uptime != UptimeTarget::Unknown).then(|| Subsection {
        label: "Uptime Target",
        body: SubsectionBody::Text(uptime.to_string()),
    })
}

/// Company name for display, falling back to a neutral phrase.
pub fn display_company(record: &RequirementsRecord) -> String {
    let company = sanitize(&record.contact.company_name);
    if company.is_empty() {
        "Your project".to_string()
    } else {
        company
    }
}

/// Assemble the full report: cover page, body sections, cost breakdown and
/// next steps.
pub fn build_document(
    record: &RequirementsRecord,
    estimate: &Estimate,
    sections: &[Section],
    config: &ReportConfig,
    document_id: &str,
    date: NaiveDate,
) -> Document {
    let currency = config.currency_symbol.as_str();
    let breakdown = &estimate.breakdown;
    let company = display_company(record);

    let mut builder =
        DocumentBuilder::new(config.title.clone(), document_id).author(config.brand_name.clone());

    // Cover
    builder.title(
        config.title.clone(),
        Some(format!(
            "Prepared for {} on {}",
            company,
            date.format("%-d %B %Y")
        )),
    );
    builder.spacer(12.0);

    let contact = &record.contact;
    let details: Vec<(String, String)> = [
        ("Company", contact.company_name.as_str()),
        ("Contact", contact.contact_name.as_str()),
        ("Job title", contact.job_title.as_str()),
        ("Email", contact.email.as_str()),
        ("Phone", contact.phone.as_str()),
        ("Industry", record.industry.as_str()),
        ("Document", document_id),
    ]
    .into_iter()
    .filter(|(_, value)| !sanitize(value).is_empty())
    .map(|(label, value)| (label.to_string(), sanitize(value)))
    .collect();
    builder.info_box("Project details", details);
    builder.spacer(12.0);

    builder.callout(
        "Estimated total investment",
        format_amount(currency, breakdown.total),
        Some(format!(
            "About {} per month over the first year",
            format_amount(currency, breakdown.monthly)
        )),
    );
    builder.spacer(12.0);
    builder.paragraph(format!(
        "This report summarises the requirements captured for {} and an indicative \
         cost estimate prepared by {}. Figures are estimates and are refined during scoping.",
        company, config.brand_name
    ));
    builder.page_break();

    // Body
    for section in sections {
        builder.heading(section.title);
        for sub in &section.subsections {
            builder.subheading(sub.label);
            match &sub.body {
                SubsectionBody::Text(text) => builder.paragraph(text.clone()),
                SubsectionBody::List(items) => builder.bullets(items.iter().cloned()),
            };
        }
        builder.spacer(6.0);
    }

    // Cost breakdown
    builder.heading("Cost Breakdown");
    let row = |label: &str, amount: i64, highlighted: bool| TableRow {
        cells: vec![label.to_string(), format_amount(currency, amount)],
        highlighted,
    };
    builder.table(
        vec!["Component".to_string(), "Estimate".to_string()],
        vec![0.65, 0.35],
        vec![
            row("Infrastructure", breakdown.infrastructure, false),
            row("Development", breakdown.development, false),
            row("Support", breakdown.support, false),
            row("Monthly equivalent", breakdown.monthly, false),
            row("Total investment", breakdown.total, true),
        ],
    );
    let f = &estimate.factors;
    builder.paragraph(format!(
        "Selected components price at {} before scaling. Applied factors: data volume x{:.2}, \
         compute x{:.2}, geography x{:.2}, analytics x{:.2}, governance x{:.2}, \
         authentication x{:.2}, custom development x{:.2}, SLA x{:.2}.",
        format_amount(currency, i64::from(f.feature_base)),
        f.data_volume,
        f.compute,
        f.geographic,
        f.analytics,
        f.governance,
        f.authentication,
        f.custom_development,
        f.sla,
    ));
    builder.spacer(6.0);

    // Closing
    builder.heading("Next Steps");
    builder.paragraph(config.call_to_action.clone());
    builder.bullets([
        format!("Email: {}", config.contact_email),
        format!("Website: {}", config.website),
    ]);

    builder.build()
}
