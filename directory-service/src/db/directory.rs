//! Read-only catalog access used by permission and role resolution.

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::doc;
use service_core::error::AppError;

use super::MongoDb;
use crate::models::{Department, Permission, Role, RolePermissions, Status};

/// Read-only source of the canonical entity catalogs.
///
/// Every resolution call fetches fresh catalog data; implementations must
/// not cache, so staleness behavior stays identical across deployments.
#[async_trait]
pub trait Directory: Send + Sync {
    /// The global permission catalog.
    async fn find_all_permissions(&self) -> Result<Vec<Permission>, AppError>;

    /// An organization's active roles, without their permission mappings.
    async fn find_roles(&self, organization: &str) -> Result<Vec<Role>, AppError>;

    /// An organization's role-to-permission mapping table.
    async fn find_role_permissions(
        &self,
        organization: &str,
    ) -> Result<Vec<RolePermissions>, AppError>;

    /// An organization's active departments.
    async fn find_departments(&self, organization: &str) -> Result<Vec<Department>, AppError>;
}

/// Catalog reads backed by the directory's own MongoDB collections.
#[derive(Clone)]
pub struct MongoDirectory {
    db: MongoDb,
}

impl MongoDirectory {
    pub fn new(db: MongoDb) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Directory for MongoDirectory {
    async fn find_all_permissions(&self) -> Result<Vec<Permission>, AppError> {
        let cursor = self.db.permissions().find(doc! {}, None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_roles(&self, organization: &str) -> Result<Vec<Role>, AppError> {
        let filter = doc! {
            "status": Status::Active.as_str(),
            "organization": organization,
        };
        let cursor = self.db.roles().find(filter, None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_role_permissions(
        &self,
        organization: &str,
    ) -> Result<Vec<RolePermissions>, AppError> {
        let filter = doc! { "organization": organization };
        let cursor = self.db.role_permissions().find(filter, None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_departments(&self, organization: &str) -> Result<Vec<Department>, AppError> {
        let filter = doc! {
            "status": Status::Active.as_str(),
            "organization": organization,
        };
        let cursor = self.db.departments().find(filter, None).await?;
        Ok(cursor.try_collect().await?)
    }
}
