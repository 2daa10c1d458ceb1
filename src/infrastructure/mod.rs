//! Infrastructure layer for external integrations.
//!
//! Implements the storage contracts defined by the domain layer.
//!
//! - [`persistence`] - In-memory and PostgreSQL mapping stores

pub mod persistence;
