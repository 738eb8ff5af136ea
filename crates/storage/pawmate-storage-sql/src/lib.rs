//! Pawmate SQL Storage
//!
//! Store adapters for PostgreSQL (hosted backend) and SQLite (local
//! development and tests). Both implement [`pawmate_core::PetStore`] with
//! the same concurrency contract: idempotent lazy-create via
//! `ON CONFLICT DO NOTHING`, last-write-wins stat upserts, and
//! conflict-as-no-op achievement inserts.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Re-exports
pub use pawmate_core;

pub mod postgres;
pub mod sqlite;

// Re-export adapters
pub use postgres::PostgresAdapter;
pub use sqlite::SqliteAdapter;
