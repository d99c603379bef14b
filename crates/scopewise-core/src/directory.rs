//! Partner directory and inbound form payloads.

use crate::flags::Feature;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An implementation partner listed in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Platform components the partner delivers.
    #[serde(default)]
    pub services: Vec<Feature>,
    #[serde(default)]
    pub industries: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub premium: bool,
    #[serde(default)]
    pub approved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
}

/// What a prospect is looking for in a partner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchPreferences {
    pub features: Vec<Feature>,
    pub industry: Option<String>,
    pub language: Option<String>,
}

/// A general contact request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInquiry {
    pub name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
    pub message: String,
}

/// Review state of a partner application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

/// A company asking to be listed in the directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartnerApplication {
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    pub website: String,
    pub services: Vec<Feature>,
    pub industries: Vec<String>,
    pub languages: Vec<String>,
    pub regions: Vec<String>,
    pub description: String,
    pub status: ApplicationStatus,
}

impl PartnerApplication {
    /// The directory entry published when the application is approved.
    pub fn to_partner(&self, id: Uuid) -> Partner {
        Partner {
            id,
            name: self.company_name.trim().to_string(),
            description: self.description.clone(),
            services: self.services.clone(),
            industries: self.industries.clone(),
            languages: self.languages.clone(),
            regions: self.regions.clone(),
            premium: false,
            approved: true,
            website: Some(self.website.clone()).filter(|w| !w.trim().is_empty()),
            contact_email: Some(self.email.clone()).filter(|e| !e.trim().is_empty()),
        }
    }
}

/// A prospect reaching out to one specific partner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartnerInquiry {
    pub partner_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub company: String,
    pub message: String,
}
