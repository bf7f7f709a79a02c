//! Core domain entities.
//!
//! - [`ShortLink`] - A stored code → URL mapping
//! - [`NewLink`] - Input for creating a mapping

pub mod link;

pub use link::{NewLink, ShortLink};
