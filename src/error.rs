//! Error types for rolemask

use crate::constants::PERMISSION_BITS;

/// The main error type for rolemask operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolesError(pub String);

impl std::fmt::Display for RolesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for RolesError {}

impl RolesError {
    pub(crate) fn base_out_of_range(base: u32) -> Self {
        RolesError(format!("permission base {} out of range 0..{}", base, PERMISSION_BITS))
    }
}

/// Result type alias for rolemask operations
pub type Result<T> = std::result::Result<T, RolesError>;
