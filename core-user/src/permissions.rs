//! Permission tags and the permission set type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Enumerated permission tags with their stable bitmask values.
///
/// Values match the server's wire format and must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum Permission {
    /// Full administrative access; implies every other permission
    Admin = 2,
    ManageSettings = 4,
    ManageUsers = 8,
    ManageRequests = 16,
    Request = 32,
    Vote = 64,
    AutoApprove = 128,
    ManageIssues = 1024,
    ViewIssues = 2048,
}

impl Permission {
    /// The bitmask value of this permission
    pub const fn bit(self) -> u32 {
        self as u32
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Admin => "admin",
            Permission::ManageSettings => "manage_settings",
            Permission::ManageUsers => "manage_users",
            Permission::ManageRequests => "manage_requests",
            Permission::Request => "request",
            Permission::Vote => "vote",
            Permission::AutoApprove => "auto_approve",
            Permission::ManageIssues => "manage_issues",
            Permission::ViewIssues => "view_issues",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user's permission set, backed by the server's bitmask.
///
/// [`Admin`](Permission::Admin) implies every other permission, so
/// [`contains`](PermissionSet::contains) and the combinator checks return
/// true for any requirement once the admin bit is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(u32);

impl PermissionSet {
    /// The empty set
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Build a set from the server's raw bitmask.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw bitmask
    pub const fn bits(&self) -> u32 {
        self.0
    }

    pub fn insert(&mut self, permission: Permission) {
        self.0 |= permission.bit();
    }

    pub fn remove(&mut self, permission: Permission) {
        self.0 &= !permission.bit();
    }

    fn is_admin(&self) -> bool {
        self.0 & Permission::Admin.bit() != 0
    }

    /// Whether the set grants the given permission.
    pub fn contains(&self, permission: Permission) -> bool {
        self.is_admin() || self.0 & permission.bit() != 0
    }

    /// Whether the set grants every listed permission.
    ///
    /// Vacuously true for an empty list.
    pub fn has_all(&self, permissions: &[Permission]) -> bool {
        permissions.iter().all(|p| self.contains(*p))
    }

    /// Whether the set grants at least one listed permission.
    ///
    /// False for an empty list.
    pub fn has_any(&self, permissions: &[Permission]) -> bool {
        permissions.iter().any(|p| self.contains(*p))
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        let mut set = Self::empty();
        for permission in iter {
            set.insert(permission);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_grants_nothing() {
        let set = PermissionSet::empty();
        assert!(!set.contains(Permission::Request));
        assert!(!set.has_any(&[Permission::Admin, Permission::ManageUsers]));
    }

    #[test]
    fn test_insert_and_remove() {
        let mut set = PermissionSet::empty();
        set.insert(Permission::ManageUsers);
        assert!(set.contains(Permission::ManageUsers));

        set.remove(Permission::ManageUsers);
        assert!(!set.contains(Permission::ManageUsers));
    }

    #[test]
    fn test_has_all() {
        let set: PermissionSet = [Permission::Request, Permission::Vote].into_iter().collect();

        assert!(set.has_all(&[Permission::Request, Permission::Vote]));
        assert!(!set.has_all(&[Permission::Request, Permission::ManageUsers]));
        assert!(set.has_all(&[]));
    }

    #[test]
    fn test_has_any() {
        let set: PermissionSet = [Permission::Request].into_iter().collect();

        assert!(set.has_any(&[Permission::Request, Permission::ManageUsers]));
        assert!(!set.has_any(&[Permission::Vote, Permission::ManageUsers]));
        assert!(!set.has_any(&[]));
    }

    #[test]
    fn test_admin_implies_everything() {
        let set = PermissionSet::from_bits(Permission::Admin.bit());

        assert!(set.contains(Permission::ManageUsers));
        assert!(set.has_all(&[
            Permission::ManageSettings,
            Permission::ManageRequests,
            Permission::ViewIssues,
        ]));
    }

    #[test]
    fn test_bitmask_round_trip() {
        let set = PermissionSet::from_bits(
            Permission::Request.bit() | Permission::AutoApprove.bit(),
        );
        assert_eq!(set.bits(), 160);

        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "160");

        let back: PermissionSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn test_permission_wire_names() {
        let json = serde_json::to_string(&Permission::ManageUsers).unwrap();
        assert_eq!(json, "\"MANAGE_USERS\"");
    }
}
