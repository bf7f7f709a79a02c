//! Business logic services for the application layer.

pub mod link_service;
pub mod resolve_service;

pub use link_service::LinkService;
pub use resolve_service::{Resolution, ResolveService};
