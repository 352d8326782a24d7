//! Role identifiers

use std::borrow::{Borrow, Cow};
use std::fmt;

/// Opaque role identifier, used only as a registry key
///
/// Static names cost nothing to build, so roles can be declared as constants:
///
/// ```
/// use rolemask::Role;
///
/// const EDITOR: Role = Role::from_static("editor");
/// assert_eq!(EDITOR, Role::from("editor".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub const fn from_static(name: &'static str) -> Self {
        Role(Cow::Borrowed(name))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Role {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for Role {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Copies the name; use `Role::from_static` for names known at compile time.
impl From<&str> for Role {
    fn from(s: &str) -> Self {
        Role(Cow::Owned(s.to_owned()))
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Role(Cow::Owned(s))
    }
}

impl From<&Role> for Role {
    fn from(r: &Role) -> Self {
        r.clone()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
