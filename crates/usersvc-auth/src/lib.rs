//! # usersvc-auth
//!
//! Authentication and authorization core for usersvc.
//!
//! ## Modules
//!
//! - `directory`: lookup traits for users, role assignments, and role grants, plus seeding
//! - `jwt`: access/refresh token issuance and verification
//! - `password`: peppered Argon2id hashing with a separately stored salt
//! - `session`: session records in the credential store; login, refresh, logout
//! - `guard`: per-request bearer authentication and the combined access gate
//! - `rbac`: role-to-permission evaluation

pub mod directory;
pub mod guard;
pub mod jwt;
pub mod password;
pub mod rbac;
pub mod services;
pub mod session;

mod error;

#[cfg(test)]
pub(crate) mod testing;

pub use directory::{
    AdminAccount, AdminOutcome, Directory, DirectorySeeder, DirectoryWriter, InMemoryDirectory,
    PostgresDirectoryWriter, RoleAssignmentLookup, RolePermissionLookup, SeedReport, UserLookup,
};
pub use guard::{AccessGate, AuthenticatedSession, Principal, RequestAuthenticator};
pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder, TokenPair, TokenType};
pub use password::{HashedPassword, PasswordHasher};
pub use rbac::PermissionEvaluator;
pub use services::AuthServices;
pub use session::{SessionManager, SessionStore};
