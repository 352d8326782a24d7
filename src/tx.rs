//! Transaction handle for batched writes
//!
//! Writes land in the live map while the write guard is held, and each one
//! records the role's prior bitset. Unless the transaction commits, dropping
//! the handle (on `Err` or on panic) restores those values in reverse order
//! before the guard is released.

use parking_lot::RwLockWriteGuard;

use crate::permission::Permission;
use crate::role::Role;
use crate::roles::{clear, holds, lookup, merge, RoleMap};

/// Exclusive access to a registry for the lifetime of a `Roles::transact` closure
pub struct RolesTx<'a> {
    map: RwLockWriteGuard<'a, RoleMap>,
    undo: Vec<(Role, Option<u64>)>,
    committed: bool,
}

impl<'a> RolesTx<'a> {
    #[inline]
    pub(crate) fn new(map: RwLockWriteGuard<'a, RoleMap>) -> Self {
        RolesTx { map, undo: Vec::new(), committed: false }
    }

    /// Keep every write. Returns the number of writes applied.
    #[inline]
    pub(crate) fn commit(mut self) -> usize {
        self.committed = true;
        self.undo.len()
    }

    /// Grant permissions (OR with existing bitset). Returns the new bitset.
    pub fn assign<I>(&mut self, role: impl Into<Role>, permissions: I) -> u64
    where
        I: IntoIterator<Item = Permission>,
    {
        let role = role.into();
        let prior = self.map.get(role.as_str()).copied();
        self.undo.push((role.clone(), prior));
        merge(&mut self.map, role, Permission::union(permissions))
    }

    /// Withdraw permissions. Returns the new bitset, or `None` if the role has no entry.
    pub fn withdraw<I>(&mut self, role: impl AsRef<str>, permissions: I) -> Option<u64>
    where
        I: IntoIterator<Item = Permission>,
    {
        let (key, prior) = self.map.get_key_value(role.as_ref())?;
        let entry = (key.clone(), Some(*prior));
        self.undo.push(entry);
        clear(&mut self.map, role.as_ref(), Permission::union(permissions))
    }

    /// Bitset as seen inside this transaction
    #[inline]
    pub fn get_role_value(&self, role: impl AsRef<str>) -> u64 {
        lookup(&self.map, role.as_ref())
    }

    #[inline]
    pub fn has_permission(&self, role: impl AsRef<str>, permission: Permission) -> bool {
        holds(&self.map, role.as_ref(), permission)
    }

    fn rollback(&mut self) {
        while let Some((role, prior)) = self.undo.pop() {
            match prior {
                Some(v) => {
                    self.map.insert(role, v);
                }
                None => {
                    self.map.remove(role.as_str());
                }
            }
        }
    }
}

impl Drop for RolesTx<'_> {
    fn drop(&mut self) {
        if !self.committed && !self.undo.is_empty() {
            log::debug!("transaction aborted, rolling back {} writes", self.undo.len());
            self.rollback();
        }
    }
}
