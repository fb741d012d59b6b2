//! User model - organization-scoped accounts with resolved assignments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Permission, Status, UserDepartment, UserRole};
use crate::utils::generate_id;

/// User entity. The `roles`, `departments` and `permissions` sets are
/// fully recomputed against the catalogs whenever assignments are
/// submitted on create or update, never patched incrementally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub organization: String,
    #[serde(default)]
    pub departments: Vec<UserDepartment>,
    #[serde(default)]
    pub roles: Vec<UserRole>,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    pub status: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub is_org_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active user with a generated id and a pre-hashed
    /// password.
    pub fn new(
        organization: String,
        first_name: String,
        last_name: String,
        email: String,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: format!("U{}", generate_id(20)),
            first_name,
            last_name,
            email,
            password: password_hash,
            organization,
            departments: Vec::new(),
            roles: Vec::new(),
            permissions: Vec::new(),
            status: Status::Active.as_str().to_string(),
            is_active: true,
            is_superuser: false,
            is_org_admin: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Password-free projection returned by every handler.
    pub fn sanitized(&self) -> SanitizedUser {
        SanitizedUser {
            id: self.id.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            status: self.status.clone(),
            organization: self.organization.clone(),
            departments: self.departments.clone(),
            roles: self.roles.clone(),
            permissions: self.permissions.clone(),
            is_active: self.is_active,
            is_superuser: self.is_superuser,
            is_org_admin: self.is_org_admin,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// User projection without credentials.
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedUser {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub status: String,
    pub organization: String,
    pub departments: Vec<UserDepartment>,
    pub roles: Vec<UserRole>,
    pub permissions: Vec<Permission>,
    pub is_active: bool,
    pub is_superuser: bool,
    pub is_org_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The authenticated identity carried by a token.
///
/// Constructed fresh from a user at login, reconstructed from the payload
/// on every decode. Never persisted. `expiry` is stamped by the codec at
/// encode time; the value on freshly built claims is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthClaims {
    pub id: String,
    pub organization: String,
    pub is_superuser: bool,
    pub is_org_admin: bool,
    pub permissions: Vec<Permission>,
    #[serde(default)]
    pub expiry: i64,
}

impl From<&User> for AuthClaims {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            organization: user.organization.clone(),
            is_superuser: user.is_superuser,
            is_org_admin: user.is_org_admin,
            permissions: user.permissions.clone(),
            expiry: 0,
        }
    }
}
