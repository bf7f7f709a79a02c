//! Domain layer containing the short-link model and storage contracts.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository traits define contracts implemented by
//! [`crate::infrastructure`]; business rules live in
//! [`crate::application::services`].
//!
//! # Modules
//!
//! - [`entities`] - Core data structures ([`entities::ShortLink`], [`entities::NewLink`])
//! - [`repositories`] - The mapping store contract
//! - [`clock`] - Time source used for creation stamps and expiry checks

pub mod clock;
pub mod entities;
pub mod repositories;
