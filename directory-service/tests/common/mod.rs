//! Test fixtures: in-memory catalog implementations of the Directory
//! trait.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use service_core::error::AppError;

use directory_service::db::Directory;
use directory_service::models::{
    Department, Permission, Role, RolePermissions, Status, User, UserDepartment, UserRole,
};

/// Catalog data served straight from memory, filtered per organization
/// like the Mongo-backed implementation.
#[derive(Default)]
pub struct InMemoryDirectory {
    pub permissions: Vec<Permission>,
    pub roles: Vec<Role>,
    pub role_permissions: Vec<RolePermissions>,
    pub departments: Vec<Department>,
}

#[async_trait]
impl Directory for InMemoryDirectory {
    async fn find_all_permissions(&self) -> Result<Vec<Permission>, AppError> {
        Ok(self.permissions.clone())
    }

    async fn find_roles(&self, organization: &str) -> Result<Vec<Role>, AppError> {
        Ok(self
            .roles
            .iter()
            .filter(|r| r.organization == organization)
            .cloned()
            .collect())
    }

    async fn find_role_permissions(
        &self,
        organization: &str,
    ) -> Result<Vec<RolePermissions>, AppError> {
        Ok(self
            .role_permissions
            .iter()
            .filter(|rp| rp.organization == organization)
            .cloned()
            .collect())
    }

    async fn find_departments(&self, organization: &str) -> Result<Vec<Department>, AppError> {
        Ok(self
            .departments
            .iter()
            .filter(|d| d.organization == organization)
            .cloned()
            .collect())
    }
}

/// Directory whose every read fails, for error propagation tests.
pub struct FailingDirectory;

#[async_trait]
impl Directory for FailingDirectory {
    async fn find_all_permissions(&self) -> Result<Vec<Permission>, AppError> {
        Err(unavailable())
    }

    async fn find_roles(&self, _organization: &str) -> Result<Vec<Role>, AppError> {
        Err(unavailable())
    }

    async fn find_role_permissions(
        &self,
        _organization: &str,
    ) -> Result<Vec<RolePermissions>, AppError> {
        Err(unavailable())
    }

    async fn find_departments(&self, _organization: &str) -> Result<Vec<Department>, AppError> {
        Err(unavailable())
    }
}

fn unavailable() -> AppError {
    AppError::DatabaseError(anyhow::anyhow!("directory unavailable"))
}

pub fn permission(name: &str) -> Permission {
    Permission::new(name)
}

pub fn catalog_role(id: &str, organization: &str, department: &str, name: &str) -> Role {
    let now = Utc::now();
    Role {
        id: id.to_string(),
        organization: organization.to_string(),
        department: department.to_string(),
        name: name.to_string(),
        permissions: Vec::new(),
        status: Status::Active.as_str().to_string(),
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn catalog_department(id: &str, organization: &str, name: &str) -> Department {
    let now = Utc::now();
    Department {
        id: id.to_string(),
        organization: organization.to_string(),
        name: name.to_string(),
        status: Status::Active.as_str().to_string(),
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn mapping(role_id: &str, organization: &str, permissions: &[&str]) -> RolePermissions {
    RolePermissions {
        role_id: role_id.to_string(),
        organization: organization.to_string(),
        permissions: permissions.iter().copied().map(Permission::new).collect(),
    }
}

/// A user in the given organization carrying the requested references,
/// before any resolution has run.
pub fn requesting_user(
    organization: &str,
    roles: Vec<UserRole>,
    departments: Vec<UserDepartment>,
    permissions: Vec<Permission>,
) -> User {
    let mut user = User::new(
        organization.to_string(),
        "Test".to_string(),
        "User".to_string(),
        "test.user@example.com".to_string(),
        "not-a-real-hash".to_string(),
    );
    user.roles = roles;
    user.departments = departments;
    user.permissions = permissions;
    user
}
