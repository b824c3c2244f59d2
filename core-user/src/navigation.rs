//! Permission-gated navigation.
//!
//! Each entry declares zero or more required permissions and a combinator.
//! Visibility is a pure function of the current permission set, evaluated
//! fresh per call.

use crate::permissions::{Permission, PermissionSet};

/// How multiple required permissions combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Every listed permission is required
    And,
    /// Any one listed permission suffices
    Or,
}

/// A navigation entry's permission requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub permissions: Vec<Permission>,
    pub combinator: Combinator,
}

impl Requirement {
    /// Require all of the listed permissions.
    pub fn all(permissions: impl Into<Vec<Permission>>) -> Self {
        Self {
            permissions: permissions.into(),
            combinator: Combinator::And,
        }
    }

    /// Require any one of the listed permissions.
    pub fn any(permissions: impl Into<Vec<Permission>>) -> Self {
        Self {
            permissions: permissions.into(),
            combinator: Combinator::Or,
        }
    }

    /// Evaluate this requirement against a permission set.
    ///
    /// An empty permission list is satisfied by anyone.
    pub fn satisfied_by(&self, permissions: &PermissionSet) -> bool {
        if self.permissions.is_empty() {
            return true;
        }

        match self.combinator {
            Combinator::And => permissions.has_all(&self.permissions),
            Combinator::Or => permissions.has_any(&self.permissions),
        }
    }
}

/// A sidebar navigation entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    /// Stable identifier, also used to highlight the active entry
    pub slug: &'static str,
    pub label: &'static str,
    pub href: &'static str,
    /// `None` means visible to everyone
    pub requirement: Option<Requirement>,
}

impl NavItem {
    pub fn visible_to(&self, permissions: &PermissionSet) -> bool {
        match &self.requirement {
            Some(requirement) => requirement.satisfied_by(permissions),
            None => true,
        }
    }
}

/// Filter a menu down to the entries the user may see.
pub fn visible_items<'a>(items: &'a [NavItem], permissions: &PermissionSet) -> Vec<&'a NavItem> {
    items
        .iter()
        .filter(|item| item.visible_to(permissions))
        .collect()
}

/// The application's default sidebar.
pub fn default_menu() -> Vec<NavItem> {
    vec![
        NavItem {
            slug: "discover",
            label: "Discover",
            href: "/",
            requirement: None,
        },
        NavItem {
            slug: "requests",
            label: "Requests",
            href: "/requests",
            requirement: None,
        },
        NavItem {
            slug: "issues",
            label: "Issues",
            href: "/issues",
            requirement: Some(Requirement::any(vec![
                Permission::ManageIssues,
                Permission::ViewIssues,
            ])),
        },
        NavItem {
            slug: "users",
            label: "Users",
            href: "/users",
            requirement: Some(Requirement::all(vec![Permission::ManageUsers])),
        },
        NavItem {
            slug: "settings",
            label: "Settings",
            href: "/settings",
            requirement: Some(Requirement::all(vec![Permission::ManageSettings])),
        },
    ]
}
