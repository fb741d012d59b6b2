//! Authorization checks over decoded claims.

use anyhow::anyhow;
use service_core::error::AppError;

use crate::models::AuthClaims;

/// Whether the named permission is present in the claims' permission set.
///
/// Exact name match over a flat set; no hierarchy, wildcard or negative
/// semantics. Superuser/org-admin short-circuits are the caller's job -
/// this function never inspects those flags.
pub fn is_granted(permission: &str, claims: &AuthClaims) -> bool {
    claims.permissions.iter().any(|p| p.name == permission)
}

/// The standard authorization gate: org admins pass unconditionally,
/// everyone else needs the named permission.
pub fn require_permission(claims: &AuthClaims, permission: &str) -> Result<(), AppError> {
    if !claims.is_org_admin && !is_granted(permission, claims) {
        return Err(AppError::Unauthorized(anyhow!("permission not granted")));
    }
    Ok(())
}
