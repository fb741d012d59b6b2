use serde::Deserialize;
use validator::Validate;

use crate::models::{Permission, UserDepartment, UserRole};

/// Request to create a user in the caller's organization. Role,
/// department and permission references are resolved against the catalogs
/// before anything is persisted.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "Firstname is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Lastname is required"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[serde(default)]
    pub roles: Vec<UserRole>,
    #[serde(default)]
    pub departments: Vec<UserDepartment>,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

/// Partial update of a user. Empty lists mean "leave the assignment
/// untouched"; a non-empty list triggers a full recompute of the derived
/// sets.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub roles: Vec<UserRole>,
    #[serde(default)]
    pub departments: Vec<UserDepartment>,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePasswordRequest {
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}
