//! Department model - organization-scoped grouping for roles and users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use super::Status;
use crate::utils::generate_id;

/// Department entity (organization-scoped).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: String,
    pub organization: String,
    pub name: String,
    pub status: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Department {
    /// Create a new active department with a generated id.
    pub fn new(organization: String, name: String) -> Self {
        let now = Utc::now();
        Self {
            id: format!("DEPT{}", generate_id(17)),
            organization,
            name,
            status: Status::Active.as_str().to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Department association stored on a user. The display name is
/// denormalized from the catalog at resolution time.
///
/// Identity is the department id: equality and hashing ignore the display
/// name so resolved sets dedup by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDepartment {
    pub department_id: String,
    #[serde(default)]
    pub department_name: String,
}

impl UserDepartment {
    pub fn new(department_id: impl Into<String>) -> Self {
        Self {
            department_id: department_id.into(),
            department_name: String::new(),
        }
    }
}

impl PartialEq for UserDepartment {
    fn eq(&self, other: &Self) -> bool {
        self.department_id == other.department_id
    }
}

impl Eq for UserDepartment {}

impl Hash for UserDepartment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.department_id.hash(state);
    }
}
