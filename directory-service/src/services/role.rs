//! Role management.
//!
//! Roles persist split across the `role` and `role_permission`
//! collections; the permission mapping is fully replaced on every update
//! that carries permissions.

use anyhow::anyhow;
use chrono::Utc;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, to_bson};
use service_core::error::AppError;
use validator::Validate;

use crate::db::MongoDb;
use crate::dtos::{CreateRoleRequest, UpdateRoleRequest};
use crate::models::{AuthClaims, Role, Status};
use crate::services::access::require_permission;
use crate::services::{DepartmentService, PermissionResolver};

#[derive(Clone)]
pub struct RoleService {
    db: MongoDb,
    resolver: PermissionResolver,
    departments: DepartmentService,
}

impl RoleService {
    pub fn new(db: MongoDb, resolver: PermissionResolver, departments: DepartmentService) -> Self {
        Self {
            db,
            resolver,
            departments,
        }
    }

    pub async fn create(&self, req: CreateRoleRequest, au: &AuthClaims) -> Result<Role, AppError> {
        req.validate()?;
        require_permission(au, "CanCreateRole")?;

        // The owning department fixes the role's organization.
        let department = self.departments.get_by_id(&req.department, au).await?;

        let mut role = Role::new(
            department.organization,
            department.id,
            req.name,
            req.permissions,
        );

        if !role.permissions.is_empty() {
            role.permissions = self.resolver.assign_role_permissions(&role).await?;
        }

        self.db
            .roles()
            .insert_one(role.without_permissions(), None)
            .await?;
        self.db
            .role_permissions()
            .insert_one(role.permission_mapping(), None)
            .await?;
        tracing::info!(role = %role.id, organization = %role.organization, "role created");

        Ok(role)
    }

    pub async fn find_all(&self, au: &AuthClaims) -> Result<Vec<Role>, AppError> {
        require_permission(au, "CanReadRole")?;

        let filter = doc! {
            "organization": &au.organization,
            "status": Status::Active.as_str(),
        };
        Ok(self.db.roles().find(filter, None).await?.try_collect().await?)
    }

    pub async fn get_by_id(&self, id: &str, au: &AuthClaims) -> Result<Role, AppError> {
        require_permission(au, "CanReadRole")?;

        let mut role = self
            .db
            .roles()
            .find_one(doc! { "id": id, "organization": &au.organization }, None)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow!("role not found")))?;

        if let Some(mapping) = self
            .db
            .role_permissions()
            .find_one(doc! { "role_id": id }, None)
            .await?
        {
            role.permissions = mapping.permissions;
        }

        Ok(role)
    }

    pub async fn update(
        &self,
        id: &str,
        req: UpdateRoleRequest,
        au: &AuthClaims,
    ) -> Result<Role, AppError> {
        require_permission(au, "CanUpdateRole")?;

        let mut current = self.get_by_id(id, au).await?;

        if !req.name.is_empty() {
            current.name = req.name;
        }

        if !req.permissions.is_empty() {
            let requested = Role {
                permissions: req.permissions,
                ..current.clone()
            };
            current.permissions = self.resolver.assign_role_permissions(&requested).await?;
        }

        current.updated_at = Utc::now();

        self.db
            .roles()
            .update_one(
                doc! { "id": &current.id },
                doc! { "$set": {
                    "name": &current.name,
                    "status": &current.status,
                    "is_active": current.is_active,
                    "updated_at": to_bson(&current.updated_at).map_err(anyhow::Error::new)?,
                }},
                None,
            )
            .await?;
        self.db
            .role_permissions()
            .update_one(
                doc! { "role_id": &current.id },
                doc! { "$set": {
                    "permissions": to_bson(&current.permissions).map_err(anyhow::Error::new)?,
                }},
                None,
            )
            .await?;

        Ok(current)
    }

    pub async fn delete(&self, id: &str, au: &AuthClaims) -> Result<(), AppError> {
        require_permission(au, "CanDeleteRole")?;

        self.db.roles().delete_one(doc! { "id": id }, None).await?;
        self.db
            .role_permissions()
            .delete_one(doc! { "role_id": id }, None)
            .await?;
        tracing::info!(role = %id, "role deleted");

        Ok(())
    }
}
