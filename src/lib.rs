//! Workspace facade crate.
//!
//! Re-exports the client-core crates so host applications can depend on
//! `requestarr` alone and enable the documented features without wiring each
//! crate individually. The `desktop` feature (default) pulls in the
//! reqwest-backed HTTP bridge.

pub use bridge_traits;
pub use core_api;
pub use core_runtime;
pub use core_settings;
pub use core_user;

#[cfg(feature = "desktop")]
pub use bridge_desktop;
