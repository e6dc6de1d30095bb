//! Owner identities for logger handles.
//!
//! An owner identity is the stable key that scopes a logger handle, analogous
//! to a component or module name. Two call sites using the same identity and
//! severity observe the same cached handle.

use std::borrow::Cow;
use std::fmt;

/// The stable identifier a logger handle is bound to.
///
/// Usually a fully-qualified type name (via [`Owner::of`]) or an explicit
/// component name. Also used as the default `target` field of audit records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Owner(Cow<'static, str>);

impl Owner {
    /// Create an owner from an explicit name.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Owner(name.into())
    }

    /// Create an owner from a type, using its fully-qualified name.
    ///
    /// # Examples
    /// ```
    /// use logward::Owner;
    ///
    /// struct UserService;
    /// let owner = Owner::of::<UserService>();
    /// assert!(owner.as_str().ends_with("UserService"));
    /// ```
    pub fn of<T: ?Sized>() -> Self {
        Owner(Cow::Borrowed(std::any::type_name::<T>()))
    }

    /// The identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Owner {
    fn from(name: &'static str) -> Self {
        Owner(Cow::Borrowed(name))
    }
}

impl From<String> for Owner {
    fn from(name: String) -> Self {
        Owner(Cow::Owned(name))
    }
}
