//! # scopewise-intake
//!
//! Everything that collects input from prospects and partners:
//!
//! - [`Wizard`]: the step-gated requirements wizard
//! - [`forms`]: contact, partner application and partner inquiry forms
//! - [`directory`]: partner listing and application review

pub mod directory;
pub mod error;
pub mod forms;
pub mod steps;
pub mod submission;
pub mod wizard;

pub use directory::{
    approve_application, list_applications, list_partners, load_partners, partner_from_row,
    reject_application,
};
pub use error::{IntakeError, ValidationError, ValidationErrorKind};
pub use forms::{
    is_valid_email, submit_contact_inquiry, submit_partner_application, submit_partner_inquiry,
};
pub use steps::{Step, is_complete, validate_record};
pub use submission::{CalculatorSubmission, Stored, spawn_submission, store_submission};
pub use wizard::{Advance, Wizard, WizardState};
