//! Pawmate Core
//!
//! Shared types and interfaces for the pet well-being engine:
//!
//! - Domain types: stat vector, mood labels, interactions, achievements
//! - The [`PetStore`] persistence interface (adapters live in
//!   `pawmate-storage-sql`)
//! - Achievement catalog loading (JSON file or builtin seed set)
//! - Environment/configuration helpers
//! - Testing utilities, including an in-memory store

#![warn(missing_docs)]
#![warn(clippy::all)]

// Re-export commonly used types
pub use uuid::Uuid;

pub mod catalog;
pub mod config;
pub mod error;
pub mod store;
pub mod testing;
pub mod types;

pub use catalog::AchievementCatalog;
pub use config::{
    get_env_bool, get_env_int, get_env_or, get_required_env, load_env, load_env_from_path,
    validate_env,
};
pub use error::{PawmateError, Result};
pub use store::PetStore;
pub use types::*;
