//! Validation and workflow errors.

use scopewise_core::ApplicationStatus;
use scopewise_gateway::{GatewayError, Table};
use std::fmt;
use uuid::Uuid;

/// Input rejected before anything is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    /// Wire names of the offending fields, e.g. `contact.email`.
    pub fields: Vec<String>,
    pub message: String,
}

impl ValidationError {
    pub fn new(
        kind: ValidationErrorKind,
        fields: Vec<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            fields,
            message: message.into(),
        }
    }

    /// One or more required text fields are blank.
    pub fn required_fields_missing(fields: &[&str]) -> Self {
        Self::new(
            ValidationErrorKind::RequiredFieldMissing,
            fields.iter().map(|f| f.to_string()).collect(),
            format!("Required fields are missing: {}", fields.join(", ")),
        )
    }

    /// A category needs at least one selection.
    pub fn nothing_selected(category: &str) -> Self {
        Self::new(
            ValidationErrorKind::NothingSelected,
            vec![category.to_string()],
            format!("Select at least one option in '{}'", category),
        )
    }

    pub fn invalid_email(field: &str, value: &str) -> Self {
        Self::new(
            ValidationErrorKind::InvalidEmail,
            vec![field.to_string()],
            format!("'{}' is not a valid email address", value),
        )
    }

    /// The wizard is already on its results step.
    pub fn terminal_step() -> Self {
        Self::new(
            ValidationErrorKind::TerminalStep,
            Vec::new(),
            "The results step has no next step",
        )
    }

    /// Merge several errors into one listing every field.
    pub fn combine(errors: Vec<ValidationError>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.into_iter().next(),
            _ => {
                let message = errors
                    .iter()
                    .map(|e| e.message.as_str())
                    .collect::<Vec<_>>()
                    .join("; ");
                let fields = errors.into_iter().flat_map(|e| e.fields).collect();
                Some(Self::new(ValidationErrorKind::Multiple, fields, message))
            }
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A required text field is blank.
    RequiredFieldMissing,
    /// A category needs at least one enabled flag.
    NothingSelected,
    /// Email does not look like `local@domain.tld`.
    InvalidEmail,
    /// `next` on the results step.
    TerminalStep,
    /// Several of the above.
    Multiple,
}

/// Errors of the intake workflows.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{table} row {id} not found")]
    NotFound { table: Table, id: Uuid },

    #[error("application {id} was already {}", .status.as_str())]
    AlreadyReviewed { id: Uuid, status: ApplicationStatus },

    #[error("partner {0} is not listed in the directory")]
    UnknownPartner(Uuid),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl IntakeError {
    /// Whether the caller sent something it can fix and resend.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            IntakeError::Validation(_)
                | IntakeError::NotFound { .. }
                | IntakeError::AlreadyReviewed { .. }
                | IntakeError::UnknownPartner(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields_message() {
        let err = ValidationError::required_fields_missing(&["projectGoal", "projectScope"]);
        assert_eq!(err.kind, ValidationErrorKind::RequiredFieldMissing);
        assert_eq!(err.fields, vec!["projectGoal", "projectScope"]);
        assert_eq!(
            err.to_string(),
            "Required fields are missing: projectGoal, projectScope"
        );
    }

    #[test]
    fn test_combine() {
        assert_eq!(ValidationError::combine(Vec::new()), None);

        let single = ValidationError::nothing_selected("features");
        assert_eq!(
            ValidationError::combine(vec![single.clone()]),
            Some(single.clone())
        );

        let combined = ValidationError::combine(vec![
            single,
            ValidationError::invalid_email("email", "nope"),
        ])
        .unwrap();
        assert_eq!(combined.kind, ValidationErrorKind::Multiple);
        assert_eq!(combined.fields, vec!["features", "email"]);
    }

    #[test]
    fn test_intake_error_classification() {
        let err: IntakeError = ValidationError::terminal_step().into();
        assert!(err.is_client_error());

        let err: IntakeError = GatewayError::Unavailable("down".to_string()).into();
        assert!(!err.is_client_error());
        assert_eq!(err.to_string(), "backend unavailable: down");
    }
}
