use serde::Deserialize;
use validator::Validate;

use crate::models::Permission;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRoleRequest {
    #[validate(length(min = 1, message = "Role name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Department ID is required"))]
    pub department: String,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

/// Partial role update. A non-empty permission list fully replaces the
/// role's mapping after catalog validation.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRoleRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}
