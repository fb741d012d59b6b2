//! Permission model - immutable, name-identified reference data.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A named permission from the global catalog.
///
/// Two permissions are the same permission iff their names are equal, so
/// equality and hashing are keyed on the name alone. This is what makes
/// `HashSet<Permission>` behave as a set-by-name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Permission {
    pub name: String,
}

impl Permission {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl PartialEq for Permission {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Permission {}

impl Hash for Permission {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
