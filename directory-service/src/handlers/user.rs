use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

use crate::dtos::{CreateUserRequest, UpdatePasswordRequest, UpdateUserRequest};
use crate::middleware::AuthUser;
use crate::AppState;

pub async fn create(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.users.create(req, &claims).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn find_all(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let users = state.users.find_all(&claims).await?;
    Ok(Json(users))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.users.get_by_id(&id, &claims).await?;
    Ok(Json(user.sanitized()))
}

pub async fn update(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.users.update(&id, req, &claims).await?;
    Ok(Json(user))
}

pub async fn update_password(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdatePasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.users.update_password(&id, req, &claims).await?;
    Ok(Json(user))
}

pub async fn delete(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.users.delete(&id, &claims).await?;
    Ok(StatusCode::NO_CONTENT)
}
