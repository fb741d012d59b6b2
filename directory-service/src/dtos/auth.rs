use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Self-service registration of an organization together with its first
/// org-admin user.
#[derive(Debug, Deserialize, Validate)]
pub struct RegistrationRequest {
    #[validate(length(min = 1, message = "Organization name is required"))]
    pub org_name: String,
    #[serde(default)]
    pub website: String,
    #[validate(length(min = 1, message = "Firstname is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Lastname is required"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterSuperuserRequest {
    #[validate(length(min = 1, message = "Firstname is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Lastname is required"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Token issued after a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValueToken {
    pub value_token: String,
}
