//! HTTP API layer.
//!
//! Translates requests into service calls and formats responses according
//! to the public contract.
//!
//! # Modules
//!
//! - [`dto`] - Request/response bodies
//! - [`handlers`] - Endpoint handlers
//! - [`middleware`] - Tracing, CORS and rate limiting layers

pub mod dto;
pub mod handlers;
pub mod middleware;
