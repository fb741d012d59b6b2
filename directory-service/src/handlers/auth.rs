use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use service_core::error::AppError;

use crate::dtos::{LoginRequest, RegisterSuperuserRequest, RegistrationRequest};
use crate::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let token = state.auth.login(req).await?;
    Ok(Json(token))
}

pub async fn register_org(
    State(state): State<AppState>,
    Json(req): Json<RegistrationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let organization = state.auth.register_org(req).await?;
    Ok((StatusCode::CREATED, Json(organization)))
}

pub async fn register_superuser(
    State(state): State<AppState>,
    Json(req): Json<RegisterSuperuserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let superuser = state.auth.register_superuser(req).await?;
    Ok((StatusCode::CREATED, Json(superuser)))
}
