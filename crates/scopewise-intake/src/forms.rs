//! Contact, partner application and partner inquiry forms.
//!
//! Unlike the wizard, form errors are returned to the caller so the user can
//! correct and resubmit.

use crate::error::{IntakeError, ValidationError};
use scopewise_core::{
    ApplicationStatus, ContactInquiry, PartnerApplication, PartnerInquiry, is_filled,
};
use scopewise_gateway::{PersistenceGateway, Row, Table, to_record};

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Basic `local@domain.tld` shape check.
pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    match regex::Regex::new(EMAIL_PATTERN) {
        Ok(re) => re.is_match(value),
        Err(_) => {
            tracing::warn!("Invalid email pattern: {}", EMAIL_PATTERN);
            value.contains('@')
        }
    }
}

fn check(required: &[(&'static str, &str)], email: (&str, &str)) -> Result<(), ValidationError> {
    let missing: Vec<&str> = required
        .iter()
        .filter(|(_, value)| !is_filled(value))
        .map(|(name, _)| *name)
        .collect();

    let mut errors = Vec::new();
    if !missing.is_empty() {
        errors.push(ValidationError::required_fields_missing(&missing));
    }
    let (field, value) = email;
    if is_filled(value) && !is_valid_email(value) {
        errors.push(ValidationError::invalid_email(field, value));
    }

    match ValidationError::combine(errors) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

pub fn validate_contact_inquiry(inquiry: &ContactInquiry) -> Result<(), ValidationError> {
    check(
        &[
            ("name", inquiry.name.as_str()),
            ("email", inquiry.email.as_str()),
            ("message", inquiry.message.as_str()),
        ],
        ("email", inquiry.email.as_str()),
    )
}

pub fn validate_partner_application(
    application: &PartnerApplication,
) -> Result<(), ValidationError> {
    let fields = check(
        &[
            ("companyName", application.company_name.as_str()),
            ("contactName", application.contact_name.as_str()),
            ("email", application.email.as_str()),
        ],
        ("email", application.email.as_str()),
    );
    let services = if application.services.is_empty() {
        Err(ValidationError::nothing_selected("services"))
    } else {
        Ok(())
    };

    let errors = [fields, services].into_iter().filter_map(Result::err).collect();
    match ValidationError::combine(errors) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

pub fn validate_partner_inquiry(inquiry: &PartnerInquiry) -> Result<(), ValidationError> {
    let mut errors = Vec::new();
    if inquiry.partner_id.is_none() {
        errors.push(ValidationError::required_fields_missing(&["partnerId"]));
    }
    if let Err(err) = check(
        &[
            ("name", inquiry.name.as_str()),
            ("email", inquiry.email.as_str()),
            ("message", inquiry.message.as_str()),
        ],
        ("email", inquiry.email.as_str()),
    ) {
        errors.push(err);
    }
    match ValidationError::combine(errors) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

pub async fn submit_contact_inquiry(
    gateway: &dyn PersistenceGateway,
    inquiry: &ContactInquiry,
) -> Result<Row, IntakeError> {
    validate_contact_inquiry(inquiry)?;
    let row = gateway
        .insert(Table::ContactInquiries, to_record(inquiry)?)
        .await?;
    tracing::info!(id = %row.id, company = %inquiry.company, "Received contact inquiry");
    Ok(row)
}

/// Store a new application. Whatever status the caller sent, it starts
/// out pending.
pub async fn submit_partner_application(
    gateway: &dyn PersistenceGateway,
    application: &PartnerApplication,
) -> Result<Row, IntakeError> {
    validate_partner_application(application)?;
    let pending = PartnerApplication {
        status: ApplicationStatus::Pending,
        ..application.clone()
    };
    let row = gateway
        .insert(Table::PartnerApplications, to_record(&pending)?)
        .await?;
    tracing::info!(
        id = %row.id,
        company = %pending.company_name,
        "Received partner application"
    );
    Ok(row)
}

/// Store an inquiry addressed to a listed partner.
pub async fn submit_partner_inquiry(
    gateway: &dyn PersistenceGateway,
    inquiry: &PartnerInquiry,
) -> Result<Row, IntakeError> {
    validate_partner_inquiry(inquiry)?;
    let Some(partner_id) = inquiry.partner_id else {
        return Err(ValidationError::required_fields_missing(&["partnerId"]).into());
    };

    let listed = gateway
        .get(Table::Partners, partner_id)
        .await?
        .is_some_and(|row| row.data.get("approved") == Some(&serde_json::Value::Bool(true)));
    if !listed {
        return Err(IntakeError::UnknownPartner(partner_id));
    }

    let row = gateway
        .insert(Table::PartnerInquiries, to_record(inquiry)?)
        .await?;
    tracing::info!(id = %row.id, partner_id = %partner_id, "Received partner inquiry");
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrorKind;
    use pretty_assertions::assert_eq;
    use scopewise_core::Feature;
    use scopewise_gateway::MemoryGateway;
    use serde_json::json;

    fn inquiry() -> ContactInquiry {
        ContactInquiry {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            company: "Analytical Engines".to_string(),
            phone: String::new(),
            message: "We need a lakehouse".to_string(),
        }
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email(" ada.lovelace+leads@mail.example.co.uk "));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada example@x.io"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_contact_validation_lists_every_problem() {
        let bad = ContactInquiry {
            message: String::new(),
            email: "not-an-email".to_string(),
            ..inquiry()
        };
        let err = validate_contact_inquiry(&bad).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::Multiple);
        assert_eq!(err.fields, vec!["message", "email"]);
    }

    #[test]
    fn test_application_requires_a_service() {
        let app = PartnerApplication {
            company_name: "Lakeside".to_string(),
            contact_name: "Sam".to_string(),
            email: "sam@lakeside.dev".to_string(),
            ..Default::default()
        };
        let err = validate_partner_application(&app).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::NothingSelected);

        let app = PartnerApplication {
            services: vec![Feature::DataFactory],
            ..app
        };
        assert!(validate_partner_application(&app).is_ok());
    }

    #[tokio::test]
    async fn test_submit_contact_inquiry() {
        let gateway = MemoryGateway::new();
        let row = submit_contact_inquiry(&gateway, &inquiry()).await.unwrap();
        assert_eq!(row.data["company"], "Analytical Engines");

        let err = submit_contact_inquiry(&gateway, &ContactInquiry::default())
            .await
            .unwrap_err();
        assert!(err.is_client_error());
        assert_eq!(gateway.len(Table::ContactInquiries), 1);
    }

    #[tokio::test]
    async fn test_gateway_errors_surface() {
        let gateway = MemoryGateway::new();
        gateway.set_fail_writes(true);
        let err = submit_contact_inquiry(&gateway, &inquiry()).await.unwrap_err();
        assert!(matches!(err, IntakeError::Gateway(_)));
        assert!(!err.is_client_error());
    }

    #[tokio::test]
    async fn test_application_always_starts_pending() {
        let gateway = MemoryGateway::new();
        let app = PartnerApplication {
            company_name: "Lakeside".to_string(),
            contact_name: "Sam".to_string(),
            email: "sam@lakeside.dev".to_string(),
            services: vec![Feature::Lakehouse],
            status: ApplicationStatus::Approved,
            ..Default::default()
        };
        let row = submit_partner_application(&gateway, &app).await.unwrap();
        assert_eq!(row.data["status"], "pending");
    }

    #[tokio::test]
    async fn test_partner_inquiry_needs_listed_partner() {
        let gateway = MemoryGateway::new();
        let hidden = gateway
            .insert(Table::Partners, json!({ "name": "Hidden", "approved": false }))
            .await
            .unwrap();
        let listed = gateway
            .insert(Table::Partners, json!({ "name": "Listed", "approved": true }))
            .await
            .unwrap();

        let mut inquiry = PartnerInquiry {
            partner_id: Some(hidden.id),
            name: "Kim".to_string(),
            email: "kim@example.org".to_string(),
            company: String::new(),
            message: "Can you help?".to_string(),
        };
        let err = submit_partner_inquiry(&gateway, &inquiry).await.unwrap_err();
        assert!(matches!(err, IntakeError::UnknownPartner(id) if id == hidden.id));

        inquiry.partner_id = Some(listed.id);
        let row = submit_partner_inquiry(&gateway, &inquiry).await.unwrap();
        assert_eq!(row.data["partnerId"], listed.id.to_string());

        inquiry.partner_id = None;
        let err = submit_partner_inquiry(&gateway, &inquiry).await.unwrap_err();
        assert!(matches!(err, IntakeError::Validation(_)));
    }
}
