//! # Host Bridge Traits
//!
//! Platform abstraction traits implemented by each host environment.
//!
//! ## Overview
//!
//! This crate defines the contract between the client core and
//! platform-specific implementations. The core never talks to the network
//! directly; it goes through the [`HttpClient`](http::HttpClient) trait so the
//! fetch logic stays independently testable and hosts can swap in their own
//! transport.
//!
//! ## Traits
//!
//! - [`HttpClient`](http::HttpClient) - Async HTTP operations with retry and TLS
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type.
//! Implementations should convert transport-specific errors into it and keep
//! the messages actionable.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` bounds so they can be shared across
//! async tasks behind an `Arc`.

pub mod error;
pub mod http;

pub use error::BridgeError;

// Re-export commonly used types
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, RetryPolicy};
