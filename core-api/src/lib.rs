//! # Media-Request Server API Client
//!
//! Typed client for the media-request server's Jellyfin settings and sync
//! endpoints.
//!
//! ## Overview
//!
//! This crate owns the wire contract:
//! - Data model for settings snapshots, libraries and scan status (`models`)
//! - The [`SettingsApi`] trait, the seam the view-model layer is written and
//!   tested against (`client`)
//! - [`JellyfinSettingsClient`], the HTTP implementation over the
//!   `bridge-traits` transport
//! - Error classification by server-supplied discriminant (`error`)
//!
//! The server is authoritative for everything it reports; this client never
//! computes scan progress itself and never caches across calls.

pub mod client;
pub mod error;
pub mod models;

pub use client::{JellyfinSettingsClient, SettingsApi};
pub use error::{ApiError, Result, SyncFailure};
pub use models::{
    JellyfinSettings, JellyfinSettingsUpdate, Library, ScanControl, SyncStatus,
};
