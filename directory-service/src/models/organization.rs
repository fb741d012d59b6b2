//! Organization model - the tenant boundary for every other entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Status;
use crate::utils::generate_id;

/// Organization entity. The id doubles as the tenant key carried by users,
/// departments, roles and auth claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub website: String,
    pub status: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Organization {
    /// Create a new active organization with a generated id.
    pub fn new(name: String, website: String) -> Self {
        let now = Utc::now();
        Self {
            id: format!("{}{}", name.trim().to_uppercase(), generate_id(10)),
            name,
            website,
            status: Status::Active.as_str().to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
