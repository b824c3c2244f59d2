//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the client core:
//! - Logging and tracing infrastructure
//! - Client configuration management
//! - Notice broadcasting (the toast/notification sink)
//!
//! ## Overview
//!
//! This crate contains the runtime utilities the other modules depend on. It
//! establishes the logging conventions, the configuration builder, and the
//! notice channel through which fetch logic reports user-facing outcomes
//! without knowing anything about presentation.

pub mod config;
pub mod error;
pub mod logging;
pub mod notices;

pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, Result};
pub use notices::{Notice, NoticeBus, NoticeSeverity, NoticeStream};
