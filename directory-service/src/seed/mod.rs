//! Base permission catalog seeding.
//!
//! Permissions are immutable reference data: created once, get-or-create
//! on every seeded startup, never updated afterwards.

use anyhow::anyhow;
use mongodb::bson::doc;
use serde::Deserialize;
use service_core::error::AppError;

use crate::db::MongoDb;
use crate::models::Permission;

const BASE_PERMISSIONS: &str = include_str!("base_permissions.json");

#[derive(Debug, Deserialize)]
struct SeedCatalog {
    permissions: Vec<Permission>,
}

/// Load the embedded base catalog into the permission collection,
/// skipping entries already present.
pub async fn add_permissions(db: &MongoDb) -> Result<(), AppError> {
    let catalog: SeedCatalog = serde_json::from_str(BASE_PERMISSIONS)
        .map_err(|e| AppError::InternalError(anyhow!("invalid seed catalog: {e}")))?;

    let mut added = 0usize;
    let mut existing = 0usize;
    for permission in &catalog.permissions {
        if get_or_create(db, permission).await? {
            added += 1;
        } else {
            existing += 1;
        }
    }

    tracing::info!(added, existing, "permission catalog seeded");
    Ok(())
}

async fn get_or_create(db: &MongoDb, permission: &Permission) -> Result<bool, AppError> {
    let found = db
        .permissions()
        .find_one(doc! { "name": &permission.name }, None)
        .await?;
    if found.is_some() {
        return Ok(false);
    }

    db.permissions().insert_one(permission, None).await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_catalog_parses() {
        let catalog: SeedCatalog = serde_json::from_str(BASE_PERMISSIONS).unwrap();
        assert!(!catalog.permissions.is_empty());
        assert!(catalog
            .permissions
            .contains(&Permission::new("CanReadUser")));
    }
}
