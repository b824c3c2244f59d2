//! # Settings View-Model Layer
//!
//! View-models for the media-server settings page, recomputed from the latest
//! fetched snapshots. No reactive framework is assumed; callers render
//! whatever these types report and drive them from user interactions.
//!
//! ## Components
//!
//! - **Settings Controller** (`controller`): snapshot cache with revalidation,
//!   library enablement toggling, library discovery with error
//!   classification, and atomic settings submission
//! - **Settings Form** (`form`): field container with relaxed
//!   host\[:port\]\[/path\] validation gating submission
//! - **Scan Monitor** (`scan`): cancellable fixed-interval poll of the
//!   background scan, exposed as a watch channel plus a render model
//!
//! State mutations always end in a re-fetch from the server; nothing here
//! trusts optimistic local state.

pub mod controller;
pub mod error;
pub mod form;
pub mod scan;

pub use controller::SettingsController;
pub use error::{Result, SettingsError};
pub use form::{FormField, SettingsForm};
pub use scan::{ScanMonitor, ScanView};
