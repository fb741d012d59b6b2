//! Permission resolution against the global catalog.

use std::collections::HashSet;
use std::sync::Arc;

use service_core::error::AppError;

use crate::db::Directory;
use crate::models::{Permission, Role};

/// Keep only requested permissions whose name appears in the catalog.
///
/// Unknown names are silently dropped, never stored. Duplicates survive;
/// deduplication is a separate step. Result order is unspecified - compare
/// as a set.
pub fn validate_permissions(requested: &[Permission], catalog: &[Permission]) -> Vec<Permission> {
    let known: HashSet<&str> = catalog.iter().map(|p| p.name.as_str()).collect();
    requested
        .iter()
        .filter(|p| known.contains(p.name.as_str()))
        .cloned()
        .collect()
}

/// Collapse a permission list to unique-by-name entries. Result order is
/// unspecified - compare as a set.
pub fn dedup_permissions(list: Vec<Permission>) -> Vec<Permission> {
    let set: HashSet<Permission> = list.into_iter().collect();
    set.into_iter().collect()
}

/// Resolves requested permission sets against the Directory's global
/// permission catalog.
#[derive(Clone)]
pub struct PermissionResolver {
    directory: Arc<dyn Directory>,
}

impl PermissionResolver {
    pub fn new(directory: Arc<dyn Directory>) -> Self {
        Self { directory }
    }

    /// Resolve a role's requested permissions: fetch the global catalog,
    /// drop unknown names, dedup by name. A catalog fetch failure
    /// propagates unchanged.
    pub async fn assign_role_permissions(&self, role: &Role) -> Result<Vec<Permission>, AppError> {
        let catalog = self.directory.find_all_permissions().await?;
        let valid = validate_permissions(&role.permissions, &catalog);
        Ok(dedup_permissions(valid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perms(names: &[&str]) -> Vec<Permission> {
        names.iter().copied().map(Permission::new).collect()
    }

    fn as_set(list: Vec<Permission>) -> HashSet<Permission> {
        list.into_iter().collect()
    }

    #[test]
    fn validate_keeps_only_catalog_members() {
        let requested = perms(&["A", "B", "D"]);
        let catalog = perms(&["A", "B", "C"]);

        let valid = validate_permissions(&requested, &catalog);
        assert_eq!(as_set(valid), as_set(perms(&["A", "B"])));
    }

    #[test]
    fn validate_empty_request_yields_empty() {
        let catalog = perms(&["A", "B"]);
        assert!(validate_permissions(&[], &catalog).is_empty());
    }

    #[test]
    fn validate_drops_unknown_permission() {
        let requested = perms(&["CanReadUser", "CanFlyPlane"]);
        let catalog = perms(&["CanReadUser"]);

        let valid = validate_permissions(&requested, &catalog);
        assert_eq!(as_set(valid), as_set(perms(&["CanReadUser"])));
    }

    #[test]
    fn validate_preserves_duplicates() {
        let requested = perms(&["A", "A", "B"]);
        let catalog = perms(&["A", "B"]);

        assert_eq!(validate_permissions(&requested, &catalog).len(), 3);
    }

    #[test]
    fn dedup_collapses_by_name() {
        let deduped = dedup_permissions(perms(&["A", "B", "A", "A", "C"]));

        assert_eq!(deduped.len(), 3);
        assert_eq!(as_set(deduped), as_set(perms(&["A", "B", "C"])));
    }

    #[test]
    fn dedup_is_idempotent() {
        let once = dedup_permissions(perms(&["A", "B", "A"]));
        let twice = dedup_permissions(once.clone());

        assert_eq!(as_set(once), as_set(twice));
    }
}
