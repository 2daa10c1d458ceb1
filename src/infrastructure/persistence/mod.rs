//! Mapping store implementations.
//!
//! - [`InMemoryMappingStore`] - Process-local store, the default backend
//! - [`PgMappingStore`] - PostgreSQL store via SQLx, schema in `migrations/`

pub mod memory_mapping_store;
pub mod pg_mapping_store;

pub use memory_mapping_store::InMemoryMappingStore;
pub use pg_mapping_store::PgMappingStore;
