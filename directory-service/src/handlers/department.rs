use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

use crate::dtos::{CreateDepartmentRequest, UpdateDepartmentRequest};
use crate::middleware::AuthUser;
use crate::AppState;

pub async fn create(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<CreateDepartmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let department = state.departments.create(req, &claims).await?;
    Ok((StatusCode::CREATED, Json(department)))
}

pub async fn find_all(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let departments = state.departments.find_all(&claims).await?;
    Ok(Json(departments))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let department = state.departments.get_by_id(&id, &claims).await?;
    Ok(Json(department))
}

pub async fn update(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateDepartmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let department = state.departments.update(&id, req, &claims).await?;
    Ok(Json(department))
}

pub async fn delete(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.departments.delete(&id, &claims).await?;
    Ok(StatusCode::NO_CONTENT)
}
