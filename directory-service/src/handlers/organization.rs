use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

use crate::dtos::UpdateOrganizationRequest;
use crate::middleware::AuthUser;
use crate::AppState;

pub async fn find_all(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let organizations = state.organizations.find_all().await?;
    Ok(Json(organizations))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let organization = state.organizations.get_by_id(&id).await?;
    Ok(Json(organization))
}

pub async fn update(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateOrganizationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let organization = state.organizations.update(&id, req, &claims).await?;
    Ok(Json(organization))
}

pub async fn delete(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.organizations.delete(&id, &claims).await?;
    Ok(StatusCode::NO_CONTENT)
}
