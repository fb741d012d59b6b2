//! Role, department and permission resolution against in-memory catalogs.

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use common::{
    catalog_department, catalog_role, mapping, permission, requesting_user, FailingDirectory,
    InMemoryDirectory,
};
use directory_service::models::{Permission, UserDepartment, UserRole};
use directory_service::services::{
    dedup_permissions, resolve_user_assignments, RoleDepartmentAggregator,
};
use service_core::error::AppError;

fn org1_directory() -> InMemoryDirectory {
    InMemoryDirectory {
        permissions: vec![
            permission("CanReadUser"),
            permission("CanCreateUser"),
            permission("CanReadRole"),
        ],
        roles: vec![
            catalog_role("R1", "ORG1", "D1", "Accountant"),
            catalog_role("R2", "ORG1", "D1", "Auditor"),
            catalog_role("R3", "ORG1", "D2", "Recruiter"),
        ],
        role_permissions: vec![
            mapping("R1", "ORG1", &["CanReadUser", "CanCreateUser"]),
            mapping("R2", "ORG1", &["CanReadUser"]),
            mapping("R3", "ORG1", &["CanReadRole"]),
        ],
        departments: vec![
            catalog_department("D1", "ORG1", "Finance"),
            catalog_department("D2", "ORG1", "People"),
        ],
    }
}

fn aggregator(directory: InMemoryDirectory) -> RoleDepartmentAggregator {
    RoleDepartmentAggregator::new(Arc::new(directory))
}

fn permission_names(permissions: &[Permission]) -> HashSet<String> {
    permissions.iter().map(|p| p.name.clone()).collect()
}

#[tokio::test]
async fn role_assignment_derives_department_and_permissions() {
    let aggregator = aggregator(org1_directory());
    let user = requesting_user("ORG1", vec![UserRole::new("R1")], vec![], vec![]);

    let (roles, departments, permissions) = aggregator.assign_user_roles(&user).await.unwrap();

    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].role_id, "R1");
    assert_eq!(roles[0].role_name, "Accountant");

    assert_eq!(departments.len(), 1);
    assert_eq!(departments[0].department_id, "D1");

    assert_eq!(
        permission_names(&permissions),
        HashSet::from(["CanReadUser".to_string(), "CanCreateUser".to_string()])
    );
}

#[tokio::test]
async fn duplicate_role_references_collapse() {
    let aggregator = aggregator(org1_directory());
    let user = requesting_user(
        "ORG1",
        vec![UserRole::new("R1"), UserRole::new("R1")],
        vec![],
        vec![],
    );

    let (roles, _, _) = aggregator.assign_user_roles(&user).await.unwrap();
    assert_eq!(roles.len(), 1);
}

#[tokio::test]
async fn roles_sharing_a_department_yield_single_assignment() {
    let aggregator = aggregator(org1_directory());
    let user = requesting_user(
        "ORG1",
        vec![UserRole::new("R1"), UserRole::new("R2")],
        vec![],
        vec![],
    );

    let (_, departments, _) = aggregator.assign_user_roles(&user).await.unwrap();
    assert_eq!(departments.len(), 1);
    assert_eq!(departments[0].department_id, "D1");
}

#[tokio::test]
async fn unknown_role_reference_is_dropped() {
    let aggregator = aggregator(org1_directory());
    let user = requesting_user(
        "ORG1",
        vec![UserRole::new("R1"), UserRole::new("R99")],
        vec![],
        vec![],
    );

    let (roles, _, _) = aggregator.assign_user_roles(&user).await.unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].role_id, "R1");
}

#[tokio::test]
async fn role_permission_union_is_raw_until_caller_dedups() {
    let aggregator = aggregator(org1_directory());
    // R1 and R2 both grant CanReadUser.
    let user = requesting_user(
        "ORG1",
        vec![UserRole::new("R1"), UserRole::new("R2")],
        vec![],
        vec![],
    );

    let (_, _, permissions) = aggregator.assign_user_roles(&user).await.unwrap();
    assert_eq!(permissions.len(), 3);

    let deduped = dedup_permissions(permissions);
    assert_eq!(
        permission_names(&deduped),
        HashSet::from(["CanReadUser".to_string(), "CanCreateUser".to_string()])
    );
}

#[tokio::test]
async fn department_resolution_attaches_names_and_dedups() {
    let aggregator = aggregator(org1_directory());
    let user = requesting_user(
        "ORG1",
        vec![],
        vec![
            UserDepartment::new("D1"),
            UserDepartment::new("D1"),
            UserDepartment::new("D404"),
        ],
        vec![],
    );

    let departments = aggregator.assign_user_departments(&user).await.unwrap();
    assert_eq!(departments.len(), 1);
    assert_eq!(departments[0].department_id, "D1");
    assert_eq!(departments[0].department_name, "Finance");
}

#[tokio::test]
async fn direct_permission_resolution_drops_unknown_names() {
    let aggregator = aggregator(org1_directory());
    let user = requesting_user(
        "ORG1",
        vec![],
        vec![],
        vec![permission("CanReadUser"), permission("CanFlyPlane")],
    );

    let permissions = aggregator.assign_user_permissions(&user).await.unwrap();
    assert_eq!(
        permission_names(&permissions),
        HashSet::from(["CanReadUser".to_string()])
    );
}

#[tokio::test]
async fn catalog_fetch_failure_aborts_resolution() {
    let aggregator = RoleDepartmentAggregator::new(Arc::new(FailingDirectory));
    let user = requesting_user("ORG1", vec![UserRole::new("R1")], vec![], vec![]);

    let err = aggregator.assign_user_roles(&user).await.unwrap_err();
    assert!(matches!(err, AppError::DatabaseError(_)));
}

#[tokio::test]
async fn cross_organization_roles_are_invisible() {
    let mut directory = org1_directory();
    directory
        .roles
        .push(catalog_role("R9", "ORG2", "D9", "Outsider"));
    let aggregator = aggregator(directory);

    let user = requesting_user("ORG1", vec![UserRole::new("R9")], vec![], vec![]);
    let (roles, departments, permissions) = aggregator.assign_user_roles(&user).await.unwrap();

    assert!(roles.is_empty());
    assert!(departments.is_empty());
    assert!(permissions.is_empty());
}

#[tokio::test]
async fn composition_roles_overwrite_explicit_grants() {
    let aggregator = aggregator(org1_directory());
    // Explicit CanReadRole is valid on its own, but the role list wins.
    let mut user = requesting_user(
        "ORG1",
        vec![UserRole::new("R1")],
        vec![],
        vec![permission("CanReadRole")],
    );

    resolve_user_assignments(&aggregator, &mut user).await.unwrap();

    assert_eq!(
        permission_names(&user.permissions),
        HashSet::from(["CanReadUser".to_string(), "CanCreateUser".to_string()])
    );
    // Derived departments were re-validated and carry catalog names.
    assert_eq!(user.departments.len(), 1);
    assert_eq!(user.departments[0].department_name, "Finance");
}

#[tokio::test]
async fn composition_without_roles_keeps_explicit_grants() {
    let aggregator = aggregator(org1_directory());
    let mut user = requesting_user(
        "ORG1",
        vec![],
        vec![UserDepartment::new("D2")],
        vec![permission("CanReadRole"), permission("CanFlyPlane")],
    );

    resolve_user_assignments(&aggregator, &mut user).await.unwrap();

    assert_eq!(
        permission_names(&user.permissions),
        HashSet::from(["CanReadRole".to_string()])
    );
    assert_eq!(user.departments.len(), 1);
    assert_eq!(user.departments[0].department_name, "People");
}

#[tokio::test]
async fn composition_dedups_role_permission_union() {
    let aggregator = aggregator(org1_directory());
    let mut user = requesting_user(
        "ORG1",
        vec![UserRole::new("R1"), UserRole::new("R2")],
        vec![],
        vec![],
    );

    resolve_user_assignments(&aggregator, &mut user).await.unwrap();

    // The raw union carried CanReadUser twice; the permission pass
    // collapses it.
    assert_eq!(user.permissions.len(), 2);
    assert_eq!(
        permission_names(&user.permissions),
        HashSet::from(["CanReadUser".to_string(), "CanCreateUser".to_string()])
    );
}
