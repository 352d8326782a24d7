//! Single-bit permission values
//!
//! A `Permission` always carries exactly one set bit. The field is private and
//! the constructors below are the only way to obtain one, so a role bitset can
//! never be polluted with a multi-bit or zero "permission".

use std::fmt;

use crate::constants::PERMISSION_BITS;
use crate::error::{RolesError, Result};

/// An immutable single-bit capability flag
///
/// ```
/// use rolemask::Permission;
///
/// const READ: Permission = Permission::new(0);
/// const WRITE: Permission = Permission::new(1);
///
/// assert_eq!(READ.value(), 1);
/// assert_eq!(WRITE.value(), 2);
/// assert_eq!(Permission::union([READ, WRITE]), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Permission(u64);

impl Permission {
    /// Create a permission with value `2^base`.
    ///
    /// Panics if `base` is 64 or more. In a `const` item this is a compile error.
    #[inline]
    pub const fn new(base: u32) -> Self {
        assert!(base < PERMISSION_BITS, "permission base must be below 64");
        Permission(1 << base)
    }

    /// Create a permission with value `2^base`, rejecting out-of-range exponents
    pub fn try_new(base: u32) -> Result<Self> {
        if base >= PERMISSION_BITS {
            return Err(RolesError::base_out_of_range(base));
        }
        Ok(Permission(1 << base))
    }

    /// The bit flag
    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// The exponent this permission was built from
    #[inline]
    pub const fn base(self) -> u32 {
        self.0.trailing_zeros()
    }

    /// Bitwise OR of all given permissions (0 for none)
    #[inline]
    pub fn union<I: IntoIterator<Item = Permission>>(permissions: I) -> u64 {
        permissions.into_iter().fold(0, |acc, p| acc | p.0)
    }

    /// Every permission whose bit is set in `mask`, lowest base first
    pub fn from_mask(mask: u64) -> impl Iterator<Item = Permission> {
        (0..PERMISSION_BITS)
            .filter(move |b| mask & (1u64 << b) != 0)
            .map(|b| Permission(1u64 << b))
    }
}

impl From<Permission> for u64 {
    #[inline]
    fn from(p: Permission) -> u64 {
        p.0
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "perm:{}", self.base())
    }
}
