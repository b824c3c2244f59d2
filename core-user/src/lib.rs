//! # User Context Module
//!
//! Permission tags, the permission set type, and the permission-gated
//! navigation filter.
//!
//! ## Overview
//!
//! The server reports a user's permissions as a bitmask; this crate gives the
//! mask a typed surface ([`PermissionSet`]) and evaluates navigation
//! visibility against it ([`navigation::visible_items`]). Everything here is
//! pure and stateless: visibility is recomputed from the current permission
//! set on every call, never cached.

pub mod navigation;
pub mod permissions;

pub use navigation::{Combinator, NavItem, Requirement};
pub use permissions::{Permission, PermissionSet};
