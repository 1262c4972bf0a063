//! Public template catalog.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::models::template::TemplateRow;
use crate::state::AppState;

/// GET /api/v1/templates
/// All templates, newest first. No auth — the catalog is public.
pub async fn handle_list_templates(
    State(state): State<AppState>,
) -> Result<Json<Vec<TemplateRow>>, AppError> {
    let templates: Vec<TemplateRow> =
        sqlx::query_as("SELECT * FROM templates ORDER BY created_at DESC")
            .fetch_all(&state.db)
            .await?;
    Ok(Json(templates))
}
