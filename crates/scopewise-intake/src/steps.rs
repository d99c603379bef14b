//! Wizard steps and their validation predicates.

use crate::error::ValidationError;
use scopewise_core::{RequirementsRecord, is_filled};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The screens of the requirements wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    Overview,
    Components,
    DataLandscape,
    Governance,
    Analytics,
    Compute,
    Infrastructure,
    AccessSecurity,
    Sla,
    Customization,
    ScalabilitySustainability,
    VendorPlanning,
    Contact,
    Results,
}

impl Step {
    pub const ALL: &'static [Step] = &[
        Step::Overview,
        Step::Components,
        Step::DataLandscape,
        Step::Governance,
        Step::Analytics,
        Step::Compute,
        Step::Infrastructure,
        Step::AccessSecurity,
        Step::Sla,
        Step::Customization,
        Step::ScalabilitySustainability,
        Step::VendorPlanning,
        Step::Contact,
        Step::Results,
    ];

    pub const COUNT: u8 = 14;

    pub fn first() -> Self {
        Step::Overview
    }

    /// 1-based position.
    pub fn number(self) -> u8 {
        Self::ALL
            .iter()
            .position(|s| *s == self)
            .map_or(0, |i| i as u8 + 1)
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.get(usize::from(number).checked_sub(1)?).copied()
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        Self::from_number(self.number().checked_sub(1)?)
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Overview => "Project overview",
            Step::Components => "Platform components",
            Step::DataLandscape => "Data landscape",
            Step::Governance => "Governance",
            Step::Analytics => "Analytics capabilities",
            Step::Compute => "Compute & scale",
            Step::Infrastructure => "Infrastructure & environment",
            Step::AccessSecurity => "Access & security",
            Step::Sla => "SLA & recovery",
            Step::Customization => "Customization & integrations",
            Step::ScalabilitySustainability => "Scalability & sustainability",
            Step::VendorPlanning => "Vendor, timeline & budget",
            Step::Contact => "Contact details",
            Step::Results => "Results",
        }
    }

    /// Last data-entry step. Leaving it submits the record.
    pub fn is_submission(self) -> bool {
        self == Step::Contact
    }

    pub fn is_terminal(self) -> bool {
        self == Step::Results
    }

    /// Steps whose content may be left untouched.
    pub fn is_optional(self) -> bool {
        matches!(
            self,
            Step::Governance
                | Step::Analytics
                | Step::Compute
                | Step::Infrastructure
                | Step::Sla
                | Step::Customization
                | Step::ScalabilitySustainability
                | Step::Results
        )
    }

    /// Wire names of the fields blocking this step. Empty when the step passes.
    pub fn missing_fields(self, record: &RequirementsRecord) -> Vec<&'static str> {
        match self {
            Step::Overview => blank(&[
                ("projectGoal", record.project_goal.as_str()),
                ("projectScope", record.project_scope.as_str()),
                ("expectedOutcome", record.expected_outcome.as_str()),
            ]),
            Step::Components if !record.features.any_enabled() => vec!["features"],
            Step::DataLandscape if !record.data_sources.any_enabled() => vec!["dataSources"],
            Step::AccessSecurity if !record.authentication.any_enabled() => {
                vec!["authentication"]
            }
            Step::VendorPlanning => blank(&[("timeline", record.timeline.as_str())]),
            Step::Contact => blank(&[
                ("contact.companyName", record.contact.company_name.as_str()),
                ("contact.contactName", record.contact.contact_name.as_str()),
                ("contact.email", record.contact.email.as_str()),
                ("contact.phone", record.contact.phone.as_str()),
            ]),
            _ => Vec::new(),
        }
    }

    /// Run the step's predicate.
    pub fn validate(self, record: &RequirementsRecord) -> Result<(), ValidationError> {
        let missing = self.missing_fields(record);
        if missing.is_empty() {
            return Ok(());
        }
        match self {
            Step::Components | Step::DataLandscape | Step::AccessSecurity => {
                Err(ValidationError::nothing_selected(missing[0]))
            }
            _ => Err(ValidationError::required_fields_missing(&missing)),
        }
    }
}

fn blank(fields: &[(&'static str, &str)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| !is_filled(value))
        .map(|(name, _)| *name)
        .collect()
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.title())
    }
}

/// Every predicate, in step order.
pub fn validate_record(record: &RequirementsRecord) -> Result<(), ValidationError> {
    let errors = Step::ALL
        .iter()
        .filter_map(|step| step.validate(record).err())
        .collect();
    match ValidationError::combine(errors) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Whether every step's predicate holds.
pub fn is_complete(record: &RequirementsRecord) -> bool {
    Step::ALL.iter().all(|step| step.missing_fields(record).is_empty())
}
