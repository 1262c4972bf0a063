//! Axum route handlers for submitting and retrieving processed applications.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extractors::AuthUser;
use crate::models::request::{RequestRow, RequestSummaryRow};
use crate::pipeline::builder::build_resume;
use crate::pipeline::flows::{CreatedResume, ResumeDraft};
use crate::pipeline::orchestrator::{process_application, ApplicationInput, ProcessedApplication};
use crate::state::AppState;
use crate::validation::{validate_email, validate_name};

/// POST /api/v1/applications
///
/// Submits a resume + job description for processing. Identical resubmissions
/// by the same user are served from the stored request.
pub async fn handle_process_application(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(input): Json<ApplicationInput>,
) -> Result<Json<ProcessedApplication>, AppError> {
    if input.resume.trim().is_empty() {
        return Err(AppError::Validation("resume cannot be empty".to_string()));
    }
    if input.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let result = process_application(&state.db, state.flows.as_ref(), &user, input).await?;
    Ok(Json(result))
}

/// POST /api/v1/resumes
///
/// Builds a resume from scratch out of structured profile data. Output is
/// returned directly and never persisted.
pub async fn handle_create_resume(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Json(draft): Json<ResumeDraft>,
) -> Result<Json<CreatedResume>, AppError> {
    validate_name(&draft.personal_info.name)?;
    validate_email(&draft.personal_info.email)?;
    if draft.summary.trim().is_empty() {
        return Err(AppError::Validation("summary cannot be empty".to_string()));
    }

    let created = build_resume(state.flows.as_ref(), &draft).await?;
    Ok(Json(created))
}

/// GET /api/v1/applications
///
/// The caller's 20 most recent requests, newest first, trimmed for listing.
pub async fn handle_list_applications(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<RequestSummaryRow>>, AppError> {
    let summaries: Vec<RequestSummaryRow> = sqlx::query_as(
        r#"
        SELECT id, job_description, created_at
        FROM requests
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT 20
        "#,
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(summaries))
}

/// GET /api/v1/applications/:id
///
/// Full stored result, scoped to the owning user. A request owned by someone
/// else is indistinguishable from a missing one.
pub async fn handle_get_application(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(request_id): Path<Uuid>,
) -> Result<Json<RequestRow>, AppError> {
    let request: RequestRow =
        sqlx::query_as("SELECT * FROM requests WHERE id = $1 AND user_id = $2")
            .bind(request_id)
            .bind(user.id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request {request_id} not found")))?;

    Ok(Json(request))
}
