pub mod config;
pub mod db;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod seed;
pub mod services;
pub mod utils;

use axum::{
    extract::State,
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ServiceConfig;
use crate::db::MongoDb;
use crate::services::{
    AuthService, DepartmentService, OrganizationService, RoleService, TokenCodec, UserService,
};
use service_core::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub config: ServiceConfig,
    pub db: MongoDb,
    pub codec: TokenCodec,
    pub auth: AuthService,
    pub users: UserService,
    pub roles: RoleService,
    pub departments: DepartmentService,
    pub organizations: OrganizationService,
}

pub fn build_router(state: AppState) -> Router {
    // Everything except login, registration and health requires a valid
    // token.
    let protected = Router::new()
        .route(
            "/api/users",
            post(handlers::user::create).get(handlers::user::find_all),
        )
        .route(
            "/api/users/:id",
            get(handlers::user::get_by_id)
                .put(handlers::user::update)
                .delete(handlers::user::delete),
        )
        .route("/api/users/:id/password", put(handlers::user::update_password))
        .route("/api/org", get(handlers::organization::find_all))
        .route(
            "/api/org/:id",
            get(handlers::organization::get_by_id)
                .put(handlers::organization::update)
                .delete(handlers::organization::delete),
        )
        .route(
            "/api/department",
            post(handlers::department::create).get(handlers::department::find_all),
        )
        .route(
            "/api/department/:id",
            get(handlers::department::get_by_id)
                .put(handlers::department::update)
                .delete(handlers::department::delete),
        )
        .route(
            "/api/role",
            post(handlers::role::create).get(handlers::role::find_all),
        )
        .route(
            "/api/role/:id",
            get(handlers::role::get_by_id)
                .put(handlers::role::update)
                .delete(handlers::role::delete),
        )
        .layer(from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/login", post(handlers::auth::login))
        .route("/api/register/org", post(handlers::auth::register_org))
        .route(
            "/api/register/superuser",
            post(handlers::auth::register_superuser),
        )
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Service health check
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.db.health_check().await.map_err(|e| {
        tracing::error!(error = %e, "MongoDB health check failed");
        e
    })?;

    Ok(Json(serde_json::json!({
        "status": "healthy",
        "service": state.config.service_name,
        "version": state.config.service_version,
        "checks": {
            "mongodb": "up"
        }
    })))
}
