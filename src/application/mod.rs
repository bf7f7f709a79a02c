//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Input validation, code generation and persistence
//! - [`services::resolve_service::ResolveService`] - Cache-assisted lookup with expiry checks

pub mod services;
