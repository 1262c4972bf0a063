pub mod auth;
pub mod health;
pub mod profile;
pub mod templates;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::admin;
use crate::pipeline::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/v1/auth/signup", post(auth::handle_signup))
        .route("/api/v1/auth/login", post(auth::handle_login))
        // Profile
        .route(
            "/api/v1/me",
            get(profile::handle_get_profile).put(profile::handle_update_profile),
        )
        // Applications
        .route(
            "/api/v1/applications",
            post(handlers::handle_process_application).get(handlers::handle_list_applications),
        )
        .route(
            "/api/v1/applications/:id",
            get(handlers::handle_get_application),
        )
        // Resume builder
        .route("/api/v1/resumes", post(handlers::handle_create_resume))
        // Template catalog (public)
        .route("/api/v1/templates", get(templates::handle_list_templates))
        // Admin
        .route(
            "/api/v1/admin/users",
            get(admin::users::handle_list_users)
                .post(admin::users::handle_create_user)
                .put(admin::users::handle_update_user),
        )
        .route(
            "/api/v1/admin/users/:id",
            delete(admin::users::handle_delete_user),
        )
        .route(
            "/api/v1/admin/templates",
            get(admin::templates::handle_list_templates)
                .post(admin::templates::handle_create_template)
                .put(admin::templates::handle_update_template),
        )
        .route(
            "/api/v1/admin/templates/:id",
            delete(admin::templates::handle_delete_template),
        )
        .route(
            "/api/v1/admin/requests",
            get(admin::requests::handle_list_requests),
        )
        .route(
            "/api/v1/admin/requests/:id",
            delete(admin::requests::handle_delete_request),
        )
        .with_state(state)
}
