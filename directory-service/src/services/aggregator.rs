//! Role and department aggregation.
//!
//! Resolves a user's requested role references into canonical roles and
//! derives department and permission assignments transitively through
//! them. Every call fetches fresh catalog data from the Directory; a
//! fetch failure aborts the whole resolution chain.

use std::collections::HashSet;
use std::sync::Arc;

use service_core::error::AppError;

use crate::db::Directory;
use crate::models::{Department, Permission, Role, User, UserDepartment, UserRole};
use crate::services::resolver;

#[derive(Clone)]
pub struct RoleDepartmentAggregator {
    directory: Arc<dyn Directory>,
}

impl RoleDepartmentAggregator {
    pub fn new(directory: Arc<dyn Directory>) -> Self {
        Self { directory }
    }

    /// Resolve the user's requested roles against the organization's role
    /// catalog and derive department and permission assignments from the
    /// surviving roles.
    ///
    /// The returned permission list is the raw union over all valid roles
    /// and may contain duplicates; callers dedup before persisting.
    pub async fn assign_user_roles(
        &self,
        user: &User,
    ) -> Result<(Vec<UserRole>, Vec<UserDepartment>, Vec<Permission>), AppError> {
        let catalog = self.directory.find_roles(&user.organization).await?;

        let valid = validate_roles(&user.roles, &catalog);
        let roles = dedup_roles(valid);

        let departments = role_departments(&roles, &catalog);
        let permissions = self.role_permission_union(&roles, &user.organization).await?;

        Ok((roles, departments, permissions))
    }

    /// Resolve the user's requested departments against the organization's
    /// department catalog, attaching canonical names and deduping by id.
    pub async fn assign_user_departments(
        &self,
        user: &User,
    ) -> Result<Vec<UserDepartment>, AppError> {
        let catalog = self.directory.find_departments(&user.organization).await?;
        Ok(dedup_departments(validate_departments(
            &user.departments,
            &catalog,
        )))
    }

    /// Resolve the user's directly requested permissions against the
    /// global permission catalog, independent of any role.
    pub async fn assign_user_permissions(&self, user: &User) -> Result<Vec<Permission>, AppError> {
        let catalog = self.directory.find_all_permissions().await?;
        let valid = resolver::validate_permissions(&user.permissions, &catalog);
        Ok(resolver::dedup_permissions(valid))
    }

    /// Union of the permission mappings of every resolved role. Not
    /// deduplicated here.
    async fn role_permission_union(
        &self,
        roles: &[UserRole],
        organization: &str,
    ) -> Result<Vec<Permission>, AppError> {
        let mappings = self.directory.find_role_permissions(organization).await?;

        let mut union = Vec::new();
        for role in roles {
            for mapping in &mappings {
                if role.role_id == mapping.role_id {
                    union.extend(mapping.permissions.iter().cloned());
                }
            }
        }

        Ok(union)
    }
}

/// Keep only role references whose id appears in the catalog, attaching
/// the canonical display name to each survivor.
fn validate_roles(requested: &[UserRole], catalog: &[Role]) -> Vec<UserRole> {
    let mut valid = Vec::new();
    for reference in requested {
        if let Some(role) = catalog.iter().find(|r| r.id == reference.role_id) {
            valid.push(UserRole {
                role_id: reference.role_id.clone(),
                role_name: role.name.clone(),
            });
        }
    }
    valid
}

fn dedup_roles(list: Vec<UserRole>) -> Vec<UserRole> {
    let set: HashSet<UserRole> = list.into_iter().collect();
    set.into_iter().collect()
}

/// One department assignment per resolved role, deduped by department id
/// when roles share a department. Display names are left for the
/// department resolution pass to attach.
fn role_departments(roles: &[UserRole], catalog: &[Role]) -> Vec<UserDepartment> {
    let mut departments = Vec::new();
    for reference in roles {
        if let Some(role) = catalog.iter().find(|r| r.id == reference.role_id) {
            departments.push(UserDepartment::new(role.department.clone()));
        }
    }
    dedup_departments(departments)
}

/// Keep only department references whose id appears in the catalog,
/// attaching the canonical display name to each survivor.
fn validate_departments(
    requested: &[UserDepartment],
    catalog: &[Department],
) -> Vec<UserDepartment> {
    let mut valid = Vec::new();
    for reference in requested {
        if let Some(department) = catalog.iter().find(|d| d.id == reference.department_id) {
            valid.push(UserDepartment {
                department_id: reference.department_id.clone(),
                department_name: department.name.clone(),
            });
        }
    }
    valid
}

fn dedup_departments(list: Vec<UserDepartment>) -> Vec<UserDepartment> {
    let set: HashSet<UserDepartment> = list.into_iter().collect();
    set.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;
    use chrono::Utc;

    fn catalog_role(id: &str, department: &str, name: &str) -> Role {
        let now = Utc::now();
        Role {
            id: id.to_string(),
            organization: "ORG1".to_string(),
            department: department.to_string(),
            name: name.to_string(),
            permissions: Vec::new(),
            status: Status::Active.as_str().to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn catalog_department(id: &str, name: &str) -> Department {
        let now = Utc::now();
        Department {
            id: id.to_string(),
            organization: "ORG1".to_string(),
            name: name.to_string(),
            status: Status::Active.as_str().to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn validate_roles_attaches_canonical_names() {
        let catalog = vec![catalog_role("R1", "D1", "Accountant")];
        let requested = vec![UserRole::new("R1"), UserRole::new("R2")];

        let valid = validate_roles(&requested, &catalog);
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].role_id, "R1");
        assert_eq!(valid[0].role_name, "Accountant");
    }

    #[test]
    fn dedup_roles_collapses_by_id() {
        let deduped = dedup_roles(vec![
            UserRole::new("R1"),
            UserRole::new("R1"),
            UserRole::new("R2"),
        ]);
        assert_eq!(deduped.len(), 2);
    }

    #[test]
    fn roles_sharing_a_department_yield_one_assignment() {
        let catalog = vec![
            catalog_role("R1", "D1", "Accountant"),
            catalog_role("R2", "D1", "Auditor"),
        ];
        let roles = vec![UserRole::new("R1"), UserRole::new("R2")];

        let departments = role_departments(&roles, &catalog);
        assert_eq!(departments.len(), 1);
        assert_eq!(departments[0].department_id, "D1");
    }

    #[test]
    fn validate_departments_attaches_canonical_names() {
        let catalog = vec![catalog_department("D1", "Finance")];
        let requested = vec![UserDepartment::new("D1"), UserDepartment::new("D9")];

        let valid = validate_departments(&requested, &catalog);
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].department_name, "Finance");
    }
}
