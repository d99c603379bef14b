//! Email and social share templates for a finished estimate.

use crate::content::display_company;
use crate::text::sanitize;
use scopewise_core::{CostBreakdown, RequirementsRecord, config::ReportConfig, format_amount};
use serde::Serialize;

/// A prefilled email: subject line and plain-text body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailTemplate {
    pub subject: String,
    pub body: String,
}

/// Everything a results page needs to offer sharing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareBundle {
    pub email: EmailTemplate,
    pub mailto: String,
    pub social_post: String,
    pub linkedin_url: String,
    pub x_url: String,
}

fn feature_list(record: &RequirementsRecord) -> String {
    let labels = record.selected_feature_labels();
    if labels.is_empty() {
        "no platform components selected yet".to_string()
    } else {
        labels.join(", ")
    }
}

pub fn email_template(
    record: &RequirementsRecord,
    breakdown: &CostBreakdown,
    config: &ReportConfig,
) -> EmailTemplate {
    let company = display_company(record);
    let currency = config.currency_symbol.as_str();
    let industry = sanitize(&record.industry);

    let mut body = String::new();
    body.push_str("Hello,\n\n");
    body.push_str(&format!(
        "Here is the data platform estimate for {}.\n\n",
        company
    ));
    if !industry.is_empty() {
        body.push_str(&format!("Industry: {}\n", industry));
    }
    body.push_str(&format!("Components: {}\n", feature_list(record)));
    body.push_str(&format!(
        "Estimated total investment: {}\n",
        format_amount(currency, breakdown.total)
    ));
    body.push_str(&format!(
        "Monthly equivalent: {}\n\n",
        format_amount(currency, breakdown.monthly)
    ));
    body.push_str(&config.call_to_action);
    body.push_str(&format!(
        "\n\n{}\n{}\n{}\n",
        config.brand_name, config.contact_email, config.website
    ));

    EmailTemplate {
        subject: format!("Data platform estimate for {}", company),
        body,
    }
}

/// `mailto:` link with subject and body percent-encoded.
pub fn mailto_link(to: &str, template: &EmailTemplate) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        to.trim(),
        urlencoding::encode(&template.subject),
        urlencoding::encode(&template.body)
    )
}

/// Short text for LinkedIn or X.
pub fn social_post(
    record: &RequirementsRecord,
    breakdown: &CostBreakdown,
    config: &ReportConfig,
) -> String {
    format!(
        "We just scoped our data platform with {}: {} for an estimated {}. {}",
        config.brand_name,
        feature_list(record),
        format_amount(&config.currency_symbol, breakdown.total),
        config.website
    )
}

pub fn linkedin_share_url(url: &str) -> String {
    format!(
        "https://www.linkedin.com/sharing/share-offsite/?url={}",
        urlencoding::encode(url)
    )
}

pub fn x_share_url(text: &str, url: &str) -> String {
    format!(
        "https://twitter.com/intent/tweet?text={}&url={}",
        urlencoding::encode(text),
        urlencoding::encode(url)
    )
}

/// Build every share artefact at once. `to` may be empty.
pub fn share_bundle(
    record: &RequirementsRecord,
    breakdown: &CostBreakdown,
    config: &ReportConfig,
    to: &str,
) -> ShareBundle {
    let email = email_template(record, breakdown, config);
    let post = social_post(record, breakdown, config);
    ShareBundle {
        mailto: mailto_link(to, &email),
        linkedin_url: linkedin_share_url(&config.website),
        x_url: x_share_url(&post, &config.website),
        social_post: post,
        email,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scopewise_core::Feature;

    fn record() -> RequirementsRecord {
        let mut record = RequirementsRecord::new();
        record.contact.company_name = "Acme & Co".to_string();
        record.industry = "Retail".to_string();
        record.features.set(Feature::Lakehouse, true);
        record.features.set(Feature::DataWarehouse, true);
        record
    }

    #[test]
    fn test_email_template_content() {
        let breakdown = CostBreakdown::from_components(600, 1080, 210);
        let template = email_template(&record(), &breakdown, &ReportConfig::default());

        assert_eq!(template.subject, "Data platform estimate for Acme & Co");
        assert!(template.body.contains("Industry: Retail"));
        assert!(template.body.contains("Components: Lakehouse, Data Warehouse"));
        assert!(template.body.contains("Estimated total investment: € 1,890"));
        assert!(template.body.contains("Monthly equivalent: € 158"));
        assert!(template.body.contains(&ReportConfig::default().call_to_action));
    }

    #[test]
    fn test_mailto_is_percent_encoded() {
        let template = EmailTemplate {
            subject: "Estimate for Acme & Co".to_string(),
            body: "Line one\nTotal: € 5".to_string(),
        };
        assert_eq!(
            mailto_link(" cto@acme.example ", &template),
            "mailto:cto@acme.example?subject=Estimate%20for%20Acme%20%26%20Co\
             &body=Line%20one%0ATotal%3A%20%E2%82%AC%205"
        );
    }

    #[test]
    fn test_social_and_share_urls() {
        let config = ReportConfig::default();
        let breakdown = CostBreakdown::from_components(600, 1080, 210);
        let bundle = share_bundle(&record(), &breakdown, &config, "");

        assert!(bundle.social_post.contains("Lakehouse, Data Warehouse"));
        assert!(bundle.social_post.contains("€ 1,890"));
        assert_eq!(
            bundle.linkedin_url,
            "https://www.linkedin.com/sharing/share-offsite/?url=https%3A%2F%2Fscopewise.io"
        );
        assert!(bundle.x_url.starts_with("https://twitter.com/intent/tweet?text=We%20just"));
        assert!(bundle.mailto.starts_with("mailto:?subject="));
    }

    #[test]
    fn test_empty_record_still_reads_well() {
        let template = email_template(
            &RequirementsRecord::new(),
            &CostBreakdown::zero(),
            &ReportConfig::default(),
        );
        assert_eq!(template.subject, "Data platform estimate for Your project");
        assert!(!template.body.contains("Industry:"));
        assert!(template.body.contains("no platform components selected yet"));
    }
}
