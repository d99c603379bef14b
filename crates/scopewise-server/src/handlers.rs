//! Request handlers.

use crate::api_types::*;
use crate::auth::Admin;
use crate::error::ServerError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use scopewise_core::{
    ContactInquiry, Partner, PartnerApplication, PartnerInquiry, RequirementsRecord,
};
use scopewise_estimator::{Estimate, ScoredPartner};
use scopewise_gateway::{PersistenceGateway, SelectQuery, Table};
use scopewise_intake::{CalculatorSubmission, Stored};
use scopewise_report::ShareBundle;
use uuid::Uuid;

// =============================================================================
// Public endpoints
// =============================================================================

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        service: "scopewise-server".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn estimate(Json(record): Json<RequirementsRecord>) -> Json<Estimate> {
    Json(scopewise_estimator::estimate_with_details(&record))
}

/// Render the PDF report. Rendering is CPU-bound and runs off the async workers.
pub async fn report(
    State(state): State<AppState>,
    Json(record): Json<RequirementsRecord>,
) -> Result<Response, ServerError> {
    let config = state.report_config().clone();
    let today = chrono::Utc::now().date_naive();

    let rendered = tokio::task::spawn_blocking(move || {
        scopewise_report::generate_report(&record, &config, today)
    })
    .await
    .map_err(|e| ServerError::Internal(e.into()))??;

    let disposition = format!("attachment; filename=\"{}\"", rendered.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, scopewise_report::CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        rendered.bytes,
    )
        .into_response())
}

pub async fn share(
    State(state): State<AppState>,
    Json(request): Json<ShareRequest>,
) -> Json<ShareBundle> {
    let breakdown = scopewise_estimator::estimate(&request.record);
    Json(scopewise_report::share_bundle(
        &request.record,
        &breakdown,
        state.report_config(),
        &request.to,
    ))
}

/// Price and store a finished wizard run. Storage failures are logged and
/// the estimate is returned regardless.
pub async fn create_submission(
    State(state): State<AppState>,
    Json(request): Json<SubmissionRequest>,
) -> Json<SubmissionResponse> {
    let breakdown = scopewise_estimator::estimate(&request.record);
    let locale = request
        .locale
        .unwrap_or_else(|| state.default_locale().clone());
    let submission = CalculatorSubmission::new(request.record, breakdown, locale);

    let handle = scopewise_intake::spawn_submission(state.gateway_handle(), submission);
    let id = match handle.await {
        Ok(Ok(row)) => Some(row.id),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Failed to store calculator submission");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "Submission task failed");
            None
        }
    };

    Json(SubmissionResponse {
        breakdown,
        stored: id.is_some(),
        id,
    })
}

pub async fn create_contact(
    State(state): State<AppState>,
    Json(inquiry): Json<ContactInquiry>,
) -> Result<(StatusCode, Json<CreatedResponse>), ServerError> {
    let row = scopewise_intake::submit_contact_inquiry(state.gateway(), &inquiry).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse::from(&row))))
}

pub async fn create_application(
    State(state): State<AppState>,
    Json(application): Json<PartnerApplication>,
) -> Result<(StatusCode, Json<CreatedResponse>), ServerError> {
    let row = scopewise_intake::submit_partner_application(state.gateway(), &application).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse::from(&row))))
}

pub async fn list_partners(
    State(state): State<AppState>,
    Query(query): Query<PartnerQuery>,
) -> Result<Json<Vec<ScoredPartner>>, ServerError> {
    let preferences = query.to_preferences().map_err(ServerError::InvalidRequest)?;
    let partners = scopewise_intake::list_partners(state.gateway(), &preferences).await?;
    Ok(Json(partners))
}

pub async fn create_partner_inquiry(
    State(state): State<AppState>,
    Path(partner_id): Path<Uuid>,
    Json(mut inquiry): Json<PartnerInquiry>,
) -> Result<(StatusCode, Json<CreatedResponse>), ServerError> {
    inquiry.partner_id = Some(partner_id);
    let row = scopewise_intake::submit_partner_inquiry(state.gateway(), &inquiry).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse::from(&row))))
}

// =============================================================================
// Admin endpoints
// =============================================================================

/// Newest first. Rows that no longer decode are skipped.
pub async fn list_submissions(
    _admin: Admin,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Stored<CalculatorSubmission>>>, ServerError> {
    let mut select = SelectQuery::new();
    if let Some(limit) = query.limit {
        select = select.limit(limit);
    }
    let rows = state
        .gateway()
        .select(Table::CalculatorSubmissions, &select)
        .await?;

    let submissions = rows
        .iter()
        .filter_map(|row| match Stored::from_row(row) {
            Ok(stored) => Some(stored),
            Err(e) => {
                tracing::warn!(id = %row.id, error = %e, "Skipping unreadable submission");
                None
            }
        })
        .collect();
    Ok(Json(submissions))
}

pub async fn delete_submission(
    _admin: Admin,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, ServerError> {
    if state
        .gateway()
        .delete(Table::CalculatorSubmissions, id)
        .await?
    {
        tracing::info!(%id, "Deleted calculator submission");
        Ok(Json(DeletedResponse { deleted: true }))
    } else {
        Err(ServerError::NotFound(format!("submission {}", id)))
    }
}

pub async fn list_applications(
    _admin: Admin,
    State(state): State<AppState>,
    Query(query): Query<ApplicationQuery>,
) -> Result<Json<Vec<Stored<PartnerApplication>>>, ServerError> {
    let applications = scopewise_intake::list_applications(state.gateway(), query.status).await?;
    Ok(Json(applications))
}

pub async fn approve_application(
    _admin: Admin,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Partner>, ServerError> {
    let partner = scopewise_intake::approve_application(state.gateway(), id).await?;
    Ok(Json(partner))
}

pub async fn reject_application(
    _admin: Admin,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Stored<PartnerApplication>>, ServerError> {
    let application = scopewise_intake::reject_application(state.gateway(), id).await?;
    Ok(Json(application))
}
