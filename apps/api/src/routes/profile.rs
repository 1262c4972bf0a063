//! Authenticated profile read/update handlers.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::extractors::AuthUser;
use crate::models::user::UserRow;
use crate::state::AppState;
use crate::validation::{validate_bio, validate_name, validate_url_field};

/// GET /api/v1/me
pub async fn handle_get_profile(AuthUser(user): AuthUser) -> Json<UserRow> {
    Json(user)
}

/// Partial update: absent or blank fields keep their stored value.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
}

/// PUT /api/v1/me
pub async fn handle_update_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserRow>, AppError> {
    if let Some(name) = &req.name {
        validate_name(name)?;
    }
    validate_bio(req.bio.as_deref())?;
    validate_url_field("avatar_url", req.avatar_url.as_deref())?;
    validate_url_field("website", req.website.as_deref())?;
    validate_url_field("linkedin", req.linkedin.as_deref())?;

    let updated: UserRow = sqlx::query_as(
        r#"
        UPDATE users SET
            name = COALESCE($2, name),
            bio = COALESCE($3, bio),
            avatar_url = COALESCE($4, avatar_url),
            address = COALESCE($5, address),
            phone = COALESCE($6, phone),
            website = COALESCE($7, website),
            linkedin = COALESCE($8, linkedin),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(req.name.as_deref().map(str::trim))
    .bind(empty_to_null(req.bio))
    .bind(empty_to_null(req.avatar_url))
    .bind(empty_to_null(req.address))
    .bind(empty_to_null(req.phone))
    .bind(empty_to_null(req.website))
    .bind(empty_to_null(req.linkedin))
    .fetch_one(&state.db)
    .await?;

    Ok(Json(updated))
}

fn empty_to_null(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_to_null_filters_blank_strings() {
        assert_eq!(empty_to_null(Some("  ".to_string())), None);
        assert_eq!(empty_to_null(Some(String::new())), None);
        assert_eq!(
            empty_to_null(Some("https://ada.dev".to_string())),
            Some("https://ada.dev".to_string())
        );
        assert_eq!(empty_to_null(None), None);
    }
}
