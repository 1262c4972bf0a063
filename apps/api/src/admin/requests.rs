//! Admin visibility into stored requests.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extractors::AdminUser;
use crate::state::AppState;

/// Listing row: generated bodies are large, so the dashboard only gets
/// identifying fields.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AdminRequestRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub request_hash: String,
    pub job_description: String,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// GET /api/v1/admin/requests
pub async fn handle_list_requests(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> Result<Json<Vec<AdminRequestRow>>, AppError> {
    let requests: Vec<AdminRequestRow> = sqlx::query_as(
        r#"
        SELECT id, user_id, request_hash, job_description, skills, created_at
        FROM requests
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(&state.db)
    .await?;
    Ok(Json(requests))
}

/// DELETE /api/v1/admin/requests/:id
pub async fn handle_delete_request(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(request_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM requests WHERE id = $1")
        .bind(request_id)
        .execute(&state.db)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::NotFound(format!(
            "Request {request_id} not found"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}
