//! Repositories for the user, role, and permission tables.
//!
//! Request paths only read; the write methods exist for seeding.

pub mod permission;
pub mod role;
pub mod role_permission;
pub mod user;
pub mod user_role;

pub use permission::PermissionRepository;
pub use role::RoleRepository;
pub use role_permission::RolePermissionRepository;
pub use user::UserRepository;
pub use user_role::UserRoleRepository;
