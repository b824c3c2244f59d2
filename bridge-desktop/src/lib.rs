//! # Desktop Bridge Implementations
//!
//! Native implementations of the `bridge-traits` contracts for desktop and
//! server hosts. Currently this is the reqwest-backed HTTP client.

pub mod http;

pub use http::ReqwestHttpClient;
