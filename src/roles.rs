//! Role registry
//!
//! Maps each role to the OR of the permission bits granted to it. One
//! reader/writer lock guards the whole map:
//! - `has_permission`, `get_role_value` and the inspection calls take the shared lock
//! - `assign_permissions` and `withdraw_permissions` hold the exclusive lock for
//!   the entire read-merge-write, so concurrent writers to one role never lose updates

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use parking_lot::RwLock;

use crate::constants::NO_PERMISSIONS;
use crate::error::Result;
use crate::permission::Permission;
use crate::role::Role;
use crate::tx::RolesTx;

pub(crate) type RoleMap = HashMap<Role, u64>;

/// OR `mask` into the role's bitset, creating the entry if needed. Returns the new bitset.
pub(crate) fn merge(map: &mut RoleMap, role: Role, mask: u64) -> u64 {
    let v = match map.entry(role) {
        Entry::Occupied(e) => e.into_mut(),
        Entry::Vacant(e) => {
            log::debug!("new role entry {}", e.key());
            e.insert(NO_PERMISSIONS)
        }
    };
    *v |= mask;
    *v
}

/// Clear `mask` from an existing role's bitset. Unknown roles are left absent.
pub(crate) fn clear(map: &mut RoleMap, role: &str, mask: u64) -> Option<u64> {
    let v = map.get_mut(role)?;
    *v &= !mask;
    Some(*v)
}

#[inline]
pub(crate) fn lookup(map: &RoleMap, role: &str) -> u64 {
    map.get(role).copied().unwrap_or(NO_PERMISSIONS)
}

#[inline]
pub(crate) fn holds(map: &RoleMap, role: &str, permission: Permission) -> bool {
    match map.get(role) {
        Some(v) => v & permission.value() == permission.value(),
        None => false,
    }
}

/// Concurrency-safe role → permission bitset registry
///
/// Share one instance per permission domain, by reference or `Arc`.
///
/// ```
/// use rolemask::{Permission, Role, Roles};
///
/// const READ: Permission = Permission::new(0);
/// const WRITE: Permission = Permission::new(1);
/// const EDITOR: Role = Role::from_static("editor");
///
/// let roles = Roles::new();
/// roles.assign_permissions(EDITOR, [READ, WRITE]);
/// roles.withdraw_permissions("editor", [WRITE]);
///
/// assert!(roles.has_permission("editor", READ));
/// assert!(!roles.has_permission("editor", WRITE));
/// assert_eq!(roles.get_role_value("nobody"), 0);
/// ```
#[derive(Debug, Default)]
pub struct Roles {
    map: RwLock<RoleMap>,
}

impl Roles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with room for `capacity` roles before reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        Roles {
            map: RwLock::new(HashMap::with_capacity(capacity)),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Check whether `role` holds `permission`. False for roles never assigned anything.
    pub fn has_permission(&self, role: impl AsRef<str>, permission: Permission) -> bool {
        holds(&self.map.read(), role.as_ref(), permission)
    }

    /// Current bitset of `role`, 0 if it has no entry
    pub fn get_role_value(&self, role: impl AsRef<str>) -> u64 {
        lookup(&self.map.read(), role.as_ref())
    }

    /// Permissions currently held by `role`, lowest base first
    pub fn permissions(&self, role: impl AsRef<str>) -> Vec<Permission> {
        Permission::from_mask(self.get_role_value(role)).collect()
    }

    /// Every role with an entry, sorted. Includes roles withdrawn back to 0.
    pub fn roles(&self) -> Vec<Role> {
        let mut r: Vec<Role> = self.map.read().keys().cloned().collect();
        r.sort();
        r
    }

    /// Number of role entries
    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Grant `permissions` to `role` (OR with existing bitset).
    ///
    /// Idempotent: repeating a permission, in one call or across calls, has no further effect.
    pub fn assign_permissions<I>(&self, role: impl Into<Role>, permissions: I)
    where
        I: IntoIterator<Item = Permission>,
    {
        let role = role.into();
        let mask = Permission::union(permissions);
        let mut map = self.map.write();
        let v = merge(&mut map, role.clone(), mask);
        drop(map);
        log::trace!("assign {:#x} to {}: now {:#x}", mask, role, v);
    }

    /// Withdraw `permissions` from `role`.
    ///
    /// Permissions the role does not hold are ignored; a role with no entry is untouched.
    pub fn withdraw_permissions<I>(&self, role: impl AsRef<str>, permissions: I)
    where
        I: IntoIterator<Item = Permission>,
    {
        let role = role.as_ref();
        let mask = Permission::union(permissions);
        let v = clear(&mut self.map.write(), role, mask);
        match v {
            Some(v) => log::trace!("withdraw {:#x} from {}: now {:#x}", mask, role, v),
            None => log::trace!("withdraw {:#x} from unknown role {}", mask, role),
        }
    }

    /// Run `f` with the write lock held, so every change it makes is seen at once.
    ///
    /// The writes are kept only if `f` returns `Ok`. On `Err`, or if `f` panics,
    /// they are rolled back before the lock is released. Other callers block
    /// until the transaction ends. Do not call back into this registry from
    /// inside `f`; use the `RolesTx` handle instead.
    pub fn transact<T, F: FnOnce(&mut RolesTx<'_>) -> Result<T>>(&self, f: F) -> Result<T> {
        let mut tx = RolesTx::new(self.map.write());
        let r = f(&mut tx)?;
        let writes = tx.commit();
        log::trace!("transaction committed {} writes", writes);
        Ok(r)
    }
}
