//! Lookups against the user, role, and permission directory.
//!
//! The auth core only reads the directory. [`Directory`] bundles the three
//! lookups so services can be wired from either the Postgres repositories
//! or the in-memory implementation. [`DirectorySeeder`] is the only writer.

pub mod lookup;
pub mod memory;
pub mod postgres;
pub mod seed;
pub mod writer;

use std::sync::Arc;

pub use lookup::{RoleAssignmentLookup, RolePermissionLookup, UserLookup};
pub use memory::InMemoryDirectory;
pub use postgres::PostgresDirectoryWriter;
pub use seed::{AdminAccount, AdminOutcome, DirectorySeeder, SeedReport};
pub use writer::DirectoryWriter;

/// The three directory lookups the auth core consumes.
#[derive(Debug, Clone)]
pub struct Directory {
    /// User by email.
    pub users: Arc<dyn UserLookup>,
    /// Roles assigned to a subject.
    pub role_assignments: Arc<dyn RoleAssignmentLookup>,
    /// Permissions granted to a role.
    pub role_permissions: Arc<dyn RolePermissionLookup>,
}

impl Directory {
    /// Uses one value for all three lookups.
    pub fn from_shared<T>(source: Arc<T>) -> Self
    where
        T: UserLookup + RoleAssignmentLookup + RolePermissionLookup,
    {
        Self {
            users: source.clone(),
            role_assignments: source.clone(),
            role_permissions: source,
        }
    }
}
