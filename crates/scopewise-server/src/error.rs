//! Error types for the HTTP API.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use scopewise_gateway::GatewayError;
use scopewise_intake::{IntakeError, ValidationError};
use scopewise_report::ReportError;
use serde_json::json;
use thiserror::Error;

/// Errors that can occur while serving a request.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to start the server.
    #[error("failed to start server: {0}")]
    StartupFailed(String),

    /// Missing or wrong admin token.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// No admin token is configured, so admin endpoints are off.
    #[error("admin endpoints are disabled")]
    AdminDisabled,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Intake(#[from] IntakeError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ValidationError> for ServerError {
    fn from(error: ValidationError) -> Self {
        ServerError::Intake(IntakeError::Validation(error))
    }
}

fn gateway_status(error: &GatewayError) -> StatusCode {
    if error.is_transient() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::AuthenticationFailed => StatusCode::UNAUTHORIZED,
            ServerError::AdminDisabled => StatusCode::FORBIDDEN,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Intake(e) => match e {
                IntakeError::Validation(_) => StatusCode::BAD_REQUEST,
                IntakeError::NotFound { .. } | IntakeError::UnknownPartner(_) => {
                    StatusCode::NOT_FOUND
                }
                IntakeError::AlreadyReviewed { .. } => StatusCode::CONFLICT,
                IntakeError::Gateway(g) => gateway_status(g),
            },
            ServerError::Gateway(e) => gateway_status(e),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Backend and generation details stay in the log.
        let body = match &self {
            ServerError::Intake(IntakeError::Validation(v)) => {
                json!({ "error": v.message, "fields": v.fields })
            }
            ServerError::Report(e) => {
                tracing::error!(error = %e, "Report generation failed");
                json!({ "error": "The report could not be generated. Please try again." })
            }
            ServerError::Gateway(e) | ServerError::Intake(IntakeError::Gateway(e)) => {
                tracing::error!(error = %e, "Storage request failed");
                json!({ "error": "The request could not be saved. Please try again." })
            }
            ServerError::Internal(e) => {
                tracing::error!(error = %e, "Internal error");
                json!({ "error": "internal error" })
            }
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
