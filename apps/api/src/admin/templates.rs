//! Admin template management.
//!
//! The "at most one default" invariant is maintained inside a single
//! transaction: clearing the flag on every other template and writing the
//! new row commit together or not at all.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extractors::AdminUser;
use crate::models::template::TemplateRow;
use crate::state::AppState;
use crate::validation::validate_url_field;

#[derive(Debug, Deserialize)]
pub struct TemplatePayload {
    pub name: String,
    pub description: String,
    pub image_url: String,
    #[serde(default)]
    pub image_hint: String,
    pub latex_code: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTemplateRequest {
    pub id: Uuid,
    #[serde(flatten)]
    pub payload: TemplatePayload,
}

fn validate_payload(payload: &TemplatePayload) -> Result<(), AppError> {
    if payload.name.trim().chars().count() < 2 {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if payload.description.trim().chars().count() < 10 {
        return Err(AppError::Validation("Description is required".to_string()));
    }
    validate_url_field("image_url", Some(payload.image_url.as_str()))?;
    if payload.image_url.is_empty() {
        return Err(AppError::Validation("image_url is required".to_string()));
    }
    if payload.latex_code.trim().chars().count() < 20 {
        return Err(AppError::Validation("LaTeX code is required".to_string()));
    }
    Ok(())
}

/// GET /api/v1/admin/templates
pub async fn handle_list_templates(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> Result<Json<Vec<TemplateRow>>, AppError> {
    let templates: Vec<TemplateRow> =
        sqlx::query_as("SELECT * FROM templates ORDER BY created_at DESC")
            .fetch_all(&state.db)
            .await?;
    Ok(Json(templates))
}

/// POST /api/v1/admin/templates
pub async fn handle_create_template(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Json(payload): Json<TemplatePayload>,
) -> Result<(StatusCode, Json<TemplateRow>), AppError> {
    validate_payload(&payload)?;

    let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM templates WHERE name = $1")
        .bind(payload.name.trim())
        .fetch_optional(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "Template with this name already exists".to_string(),
        ));
    }

    let mut tx = state.db.begin().await?;

    if payload.is_default {
        sqlx::query("UPDATE templates SET is_default = FALSE, updated_at = NOW() WHERE is_default")
            .execute(&mut *tx)
            .await?;
    }

    let template: TemplateRow = sqlx::query_as(
        r#"
        INSERT INTO templates
            (id, name, description, image_url, image_hint, latex_code, is_default)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(payload.name.trim())
    .bind(&payload.description)
    .bind(&payload.image_url)
    .bind(&payload.image_hint)
    .bind(&payload.latex_code)
    .bind(payload.is_default)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(template)))
}

/// PUT /api/v1/admin/templates
pub async fn handle_update_template(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Json(req): Json<UpdateTemplateRequest>,
) -> Result<Json<TemplateRow>, AppError> {
    validate_payload(&req.payload)?;

    let mut tx = state.db.begin().await?;

    if req.payload.is_default {
        sqlx::query(
            "UPDATE templates SET is_default = FALSE, updated_at = NOW() \
             WHERE is_default AND id <> $1",
        )
        .bind(req.id)
        .execute(&mut *tx)
        .await?;
    }

    let updated: Option<TemplateRow> = sqlx::query_as(
        r#"
        UPDATE templates SET
            name = $2,
            description = $3,
            image_url = $4,
            image_hint = $5,
            latex_code = $6,
            is_default = $7,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(req.id)
    .bind(req.payload.name.trim())
    .bind(&req.payload.description)
    .bind(&req.payload.image_url)
    .bind(&req.payload.image_hint)
    .bind(&req.payload.latex_code)
    .bind(req.payload.is_default)
    .fetch_optional(&mut *tx)
    .await?;

    let updated =
        updated.ok_or_else(|| AppError::NotFound(format!("Template {} not found", req.id)))?;

    tx.commit().await?;

    Ok(Json(updated))
}

/// DELETE /api/v1/admin/templates/:id
pub async fn handle_delete_template(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(template_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM templates WHERE id = $1")
        .bind(template_id)
        .execute(&state.db)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::NotFound(format!(
            "Template {template_id} not found"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> TemplatePayload {
        TemplatePayload {
            name: "Classic".to_string(),
            description: "A clean single-column layout".to_string(),
            image_url: "https://img.example.com/classic.png".to_string(),
            image_hint: "resume preview".to_string(),
            latex_code: "\\documentclass{article}\\begin{document}\\end{document}".to_string(),
            is_default: false,
        }
    }

    #[test]
    fn test_payload_accepts_valid_template() {
        assert!(validate_payload(&payload()).is_ok());
    }

    #[test]
    fn test_payload_rejects_short_fields() {
        let mut p = payload();
        p.name = "X".to_string();
        assert!(validate_payload(&p).is_err());

        let mut p = payload();
        p.description = "too short".to_string();
        assert!(validate_payload(&p).is_err());

        let mut p = payload();
        p.latex_code = "\\tiny".to_string();
        assert!(validate_payload(&p).is_err());
    }

    #[test]
    fn test_payload_rejects_bad_image_url() {
        let mut p = payload();
        p.image_url = "not-a-url".to_string();
        assert!(validate_payload(&p).is_err());

        let mut p = payload();
        p.image_url = String::new();
        assert!(validate_payload(&p).is_err());
    }

    #[test]
    fn test_update_request_flattens_payload() {
        let json = serde_json::json!({
            "id": Uuid::new_v4(),
            "name": "Modern",
            "description": "Two-column layout with sidebar",
            "image_url": "https://img.example.com/modern.png",
            "latex_code": "\\documentclass{article}\\begin{document}x\\end{document}",
            "is_default": true
        });
        let req: UpdateTemplateRequest = serde_json::from_value(json).unwrap();
        assert!(req.payload.is_default);
        assert_eq!(req.payload.image_hint, "");
    }
}
