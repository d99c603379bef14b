//! Branding and wording of generated reports and share templates.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Title on the cover page.
    #[serde(default = "default_title")]
    pub title: String,

    /// Company publishing the report.
    #[serde(default = "default_brand")]
    pub brand_name: String,

    /// Where prospects are told to reply.
    #[serde(default = "default_contact_email")]
    pub contact_email: String,

    #[serde(default = "default_website")]
    pub website: String,

    /// Currency symbol used for every amount.
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Closing call to action used in the report and the share templates.
    #[serde(default = "default_call_to_action")]
    pub call_to_action: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            brand_name: default_brand(),
            contact_email: default_contact_email(),
            website: default_website(),
            currency_symbol: default_currency(),
            call_to_action: default_call_to_action(),
        }
    }
}

fn default_title() -> String {
    "Data Platform Requirements Report".to_string()
}

fn default_brand() -> String {
    "Scopewise".to_string()
}

fn default_contact_email() -> String {
    "hello@scopewise.io".to_string()
}

fn default_website() -> String {
    "https://scopewise.io".to_string()
}

fn default_currency() -> String {
    "€".to_string()
}

fn default_call_to_action() -> String {
    "Book a free 30-minute scoping call and we will turn this estimate into a delivery plan."
        .to_string()
}
