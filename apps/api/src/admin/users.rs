//! Admin user management. Deleting a user cascades to their requests via
//! the foreign key.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::hash_password;
use crate::errors::AppError;
use crate::extractors::AdminUser;
use crate::models::user::UserRow;
use crate::state::AppState;
use crate::validation::{
    validate_email, validate_name, validate_password, validate_role, validate_url_field,
};

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    /// Absent or empty keeps the existing hash.
    pub password: Option<String>,
    pub avatar_url: Option<String>,
}

/// GET /api/v1/admin/users
pub async fn handle_list_users(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> Result<Json<Vec<UserRow>>, AppError> {
    let users: Vec<UserRow> = sqlx::query_as("SELECT * FROM users ORDER BY created_at DESC")
        .fetch_all(&state.db)
        .await?;
    Ok(Json(users))
}

/// POST /api/v1/admin/users
pub async fn handle_create_user(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserRow>), AppError> {
    validate_name(&req.name)?;
    validate_email(&req.email)?;
    validate_password(&req.password)?;
    validate_role(&req.role)?;
    validate_url_field("avatar_url", req.avatar_url.as_deref())?;

    let email = req.email.trim().to_lowercase();

    let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "User with this email already exists".to_string(),
        ));
    }

    let password_hash = hash_password(&req.password)?;

    let user: UserRow = sqlx::query_as(
        r#"
        INSERT INTO users (id, name, email, password_hash, role, avatar_url)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.name.trim())
    .bind(&email)
    .bind(&password_hash)
    .bind(&req.role)
    .bind(req.avatar_url.as_deref().filter(|v| !v.is_empty()))
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /api/v1/admin/users
pub async fn handle_update_user(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserRow>, AppError> {
    validate_name(&req.name)?;
    validate_email(&req.email)?;
    validate_role(&req.role)?;
    validate_url_field("avatar_url", req.avatar_url.as_deref())?;

    let new_hash = match req.password.as_deref() {
        Some(p) if !p.is_empty() => {
            validate_password(p)?;
            Some(hash_password(p)?)
        }
        _ => None,
    };

    let updated: Option<UserRow> = sqlx::query_as(
        r#"
        UPDATE users SET
            name = $2,
            email = $3,
            role = $4,
            password_hash = COALESCE($5, password_hash),
            avatar_url = COALESCE($6, avatar_url),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(req.id)
    .bind(req.name.trim())
    .bind(req.email.trim().to_lowercase())
    .bind(&req.role)
    .bind(new_hash)
    .bind(req.avatar_url.as_deref().filter(|v| !v.is_empty()))
    .fetch_optional(&state.db)
    .await?;

    let updated = updated.ok_or_else(|| AppError::NotFound(format!("User {} not found", req.id)))?;
    Ok(Json(updated))
}

/// DELETE /api/v1/admin/users/:id
pub async fn handle_delete_user(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&state.db)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::NotFound(format!("User {user_id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}
