use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

use crate::dtos::{CreateRoleRequest, UpdateRoleRequest};
use crate::middleware::AuthUser;
use crate::AppState;

pub async fn create(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<CreateRoleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let role = state.roles.create(req, &claims).await?;
    Ok((StatusCode::CREATED, Json(role)))
}

pub async fn find_all(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let roles = state.roles.find_all(&claims).await?;
    Ok(Json(roles))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let role = state.roles.get_by_id(&id, &claims).await?;
    Ok(Json(role))
}

pub async fn update(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateRoleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let role = state.roles.update(&id, req, &claims).await?;
    Ok(Json(role))
}

pub async fn delete(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.roles.delete(&id, &claims).await?;
    Ok(StatusCode::NO_CONTENT)
}
