//! Bitset constants

/// Number of distinct permission bits a role bitset can hold
pub const PERMISSION_BITS: u32 = u64::BITS;

/// Bitset of a role with nothing granted (or never seen)
pub const NO_PERMISSIONS: u64 = 0;

/// Bitset with every permission bit set
pub const ALL_PERMISSIONS: u64 = u64::MAX;
