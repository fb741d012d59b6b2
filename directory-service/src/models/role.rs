//! Role model - organization-scoped roles owned by a department.
//!
//! Roles are persisted split in two collections: the `role` collection
//! holds the role record without permissions, the `role_permission`
//! collection holds the role's permission mapping. The mapping is a
//! full-replace attribute on every update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use super::{Permission, Status};
use crate::utils::generate_id;

/// Role entity. `permissions` is only populated when the caller asked for
/// the mapping to be attached; catalog reads return it empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub organization: String,
    pub department: String,
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    pub status: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// Create a new active role with a generated id, owned by the given
    /// department.
    pub fn new(
        organization: String,
        department: String,
        name: String,
        permissions: Vec<Permission>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: format!("ROLE{}", generate_id(17)),
            organization,
            department,
            name,
            permissions,
            status: Status::Active.as_str().to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// The role record as stored in the `role` collection, without the
    /// permission mapping.
    pub fn without_permissions(&self) -> Role {
        Role {
            permissions: Vec::new(),
            ..self.clone()
        }
    }

    /// The role's permission mapping as stored in the `role_permission`
    /// collection.
    pub fn permission_mapping(&self) -> RolePermissions {
        RolePermissions {
            role_id: self.id.clone(),
            organization: self.organization.clone(),
            permissions: self.permissions.clone(),
        }
    }
}

/// Role-to-permission mapping record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolePermissions {
    pub role_id: String,
    pub organization: String,
    pub permissions: Vec<Permission>,
}

/// Role association stored on a user. The display name is denormalized
/// from the catalog at resolution time.
///
/// Identity is the role id: equality and hashing ignore the display name
/// so resolved sets dedup by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRole {
    pub role_id: String,
    #[serde(default)]
    pub role_name: String,
}

impl UserRole {
    pub fn new(role_id: impl Into<String>) -> Self {
        Self {
            role_id: role_id.into(),
            role_name: String::new(),
        }
    }
}

impl PartialEq for UserRole {
    fn eq(&self, other: &Self) -> bool {
        self.role_id == other.role_id
    }
}

impl Eq for UserRole {}

impl Hash for UserRole {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.role_id.hash(state);
    }
}
