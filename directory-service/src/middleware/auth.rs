use anyhow::anyhow;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use service_core::error::AppError;

use crate::{models::AuthClaims, AppState};

/// Middleware requiring a valid token on every request it wraps.
///
/// The full Authorization header value (scheme marker included) goes to
/// the codec; decoded claims are stored in the request extensions for
/// handlers to pick up.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    let claims = state.codec.decode(header_value)?;
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Extractor to easily get claims in handlers
pub struct AuthUser(pub AuthClaims);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts.extensions.get::<AuthClaims>().ok_or_else(|| {
            AppError::InternalError(anyhow!("auth claims missing from request extensions"))
        })?;

        Ok(AuthUser(claims.clone()))
    }
}
