//! Utility functions shared by services and handlers.
//!
//! - [`code_generator`] - Short code generation and shape checks
//! - [`url_validator`] - Target URL validation

pub mod code_generator;
pub mod url_validator;
