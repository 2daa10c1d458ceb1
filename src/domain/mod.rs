//! Domain layer containing business entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Storage trait definitions
//!
//! The domain layer has no dependencies on the HTTP or persistence layers.
//! Repository traits are implemented by [`crate::infrastructure::persistence`].

pub mod entities;
pub mod repositories;
