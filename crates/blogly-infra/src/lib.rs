//! # Blogly Infrastructure
//!
//! Concrete implementations of the repository ports defined in `blogly-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL storage via SeaORM
//!
//! The in-memory store is always available.

pub mod database;
pub mod memory;

pub use database::DatabaseConfig;
pub use memory::InMemoryStore;
