//! Pawmate Engine
//!
//! The pet well-being simulation and achievement-unlock engine:
//!
//! - **Mood classifier**: pure stat-vector → mood-label function
//! - **Transition calculator**: pure application of per-interaction deltas
//!   with mandatory clamping
//! - **Achievement evaluator**: pure catalog scan against a live vector
//! - **[`PetCareService`]**: the orchestrator, and the only component that
//!   touches a [`pawmate_core::PetStore`]
//!
//! # Example
//!
//! ```rust,ignore
//! use pawmate_core::{catalog::builtin, testing::MemoryStore, InteractionKind};
//! use pawmate_engine::PetCareService;
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryStore::new());
//! let service = PetCareService::new(store, builtin::default_catalog());
//! let result = service.apply_interaction(pet_id, InteractionKind::Pat).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod achievements;
pub mod mood;
pub mod service;
pub mod transition;

pub use achievements::evaluate_unlocks;
pub use mood::{classify_mood, mood_score};
pub use service::{PetCareConfig, PetCareService};
pub use transition::{compute_transition, Transition};
