//! Persistence interface for pet state
//!
//! The engine is the only component that calls this trait; the pure
//! simulation functions never touch a store. Adapters live in
//! `pawmate-storage-sql`; an in-memory implementation for tests lives in
//! [`crate::testing`].

use crate::types::{MoodHistoryEntry, Pet, PetStats, UnlockedAchievement, UUID};
use crate::Result;
use async_trait::async_trait;
use std::collections::HashSet;

/// Storage operations required by the interaction engine
///
/// Concurrency contract:
/// - `get_or_create_stats` is idempotent: a duplicate create racing this
///   call resolves by re-reading the winner's row, never by erroring.
/// - `save_stats` is a last-write-wins upsert keyed by `pet_id`.
/// - `insert_unlocked` treats a `(pet_id, achievement_id)` uniqueness
///   conflict as success and reports it by returning `false`.
#[async_trait]
pub trait PetStore: Send + Sync {
    /// Whether the pet record exists upstream
    async fn pet_exists(&self, pet_id: UUID) -> Result<bool>;

    /// Idempotently upsert a pet record (callers and tests; lifecycle is
    /// owned upstream)
    async fn ensure_pet(&self, pet: &Pet) -> Result<()>;

    /// Read the stat vector, if one has been created
    async fn get_stats(&self, pet_id: UUID) -> Result<Option<PetStats>>;

    /// Read the stat vector, lazily creating the default vector on first
    /// access
    async fn get_or_create_stats(&self, pet_id: UUID) -> Result<PetStats>;

    /// Persist the full stat vector (last-write-wins by `pet_id`)
    async fn save_stats(&self, stats: &PetStats) -> Result<()>;

    /// Append one mood-history sample
    async fn append_mood_history(&self, entry: &MoodHistoryEntry) -> Result<()>;

    /// Read mood-history samples, newest first
    async fn mood_history(&self, pet_id: UUID, limit: usize) -> Result<Vec<MoodHistoryEntry>>;

    /// Ids of every achievement this pet has unlocked
    async fn unlocked_achievement_ids(&self, pet_id: UUID) -> Result<HashSet<String>>;

    /// Full unlock records for this pet, oldest first
    async fn unlocked_achievements(&self, pet_id: UUID) -> Result<Vec<UnlockedAchievement>>;

    /// Insert an unlock record
    ///
    /// Returns `true` if the row was inserted, `false` if the pet already
    /// had this achievement (concurrent call won the race).
    async fn insert_unlocked(&self, unlock: &UnlockedAchievement) -> Result<bool>;
}
