//! rolemask - Minimal in-memory role registry with bitmask permissions
//!
//! - Permissions: single-bit `u64` flags, built once from a bit index
//! - Roles: opaque string keys
//! - Registry: role → OR of granted permissions, behind one reader/writer lock
//!
//! Hierarchies, inheritance, wildcards and persistence are left to callers.

pub mod constants;
pub mod error;
pub mod permission;
pub mod role;
pub mod roles;
pub mod tx;

pub use constants::*;
pub use error::{RolesError, Result};
pub use permission::Permission;
pub use role::Role;
pub use roles::Roles;
pub use tx::RolesTx;
