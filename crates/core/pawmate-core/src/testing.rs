//! Testing utilities
//!
//! An in-memory [`PetStore`] plus fixture helpers, used by the engine's
//! unit tests and usable by downstream crates. The store honors the same
//! concurrency contract as the SQL adapters: idempotent lazy-create and
//! conflict-as-no-op unlock inserts.

use crate::store::PetStore;
use crate::types::{MoodHistoryEntry, Pet, PetStats, UnlockedAchievement, UUID};
use crate::{PawmateError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

/// In-memory pet store
#[derive(Default)]
pub struct MemoryStore {
    pets: RwLock<HashMap<UUID, Pet>>,
    stats: RwLock<HashMap<UUID, PetStats>>,
    history: RwLock<Vec<MoodHistoryEntry>>,
    unlocked: RwLock<HashMap<(UUID, String), UnlockedAchievement>>,
    fail_saves: AtomicBool,
    fail_history: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `save_stats` fail
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `append_mood_history` fail
    pub fn fail_history(&self, fail: bool) {
        self.fail_history.store(fail, Ordering::SeqCst);
    }

    /// Number of mood-history rows across all pets
    pub fn history_len(&self) -> usize {
        self.history.read().unwrap().len()
    }
}

#[async_trait]
impl PetStore for MemoryStore {
    async fn pet_exists(&self, pet_id: UUID) -> Result<bool> {
        Ok(self.pets.read().unwrap().contains_key(&pet_id))
    }

    async fn ensure_pet(&self, pet: &Pet) -> Result<()> {
        self.pets.write().unwrap().insert(pet.id, pet.clone());
        Ok(())
    }

    async fn get_stats(&self, pet_id: UUID) -> Result<Option<PetStats>> {
        Ok(self.stats.read().unwrap().get(&pet_id).cloned())
    }

    async fn get_or_create_stats(&self, pet_id: UUID) -> Result<PetStats> {
        let now = chrono::Utc::now().timestamp();
        let mut stats = self.stats.write().unwrap();
        Ok(stats
            .entry(pet_id)
            .or_insert_with(|| PetStats::with_defaults(pet_id, now))
            .clone())
    }

    async fn save_stats(&self, stats: &PetStats) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(PawmateError::database("save_stats failure injected"));
        }
        self.stats
            .write()
            .unwrap()
            .insert(stats.pet_id, stats.clone());
        Ok(())
    }

    async fn append_mood_history(&self, entry: &MoodHistoryEntry) -> Result<()> {
        if self.fail_history.load(Ordering::SeqCst) {
            return Err(PawmateError::database("history failure injected"));
        }
        self.history.write().unwrap().push(entry.clone());
        Ok(())
    }

    async fn mood_history(&self, pet_id: UUID, limit: usize) -> Result<Vec<MoodHistoryEntry>> {
        let history = self.history.read().unwrap();
        let mut entries: Vec<_> = history
            .iter()
            .filter(|e| e.pet_id == pet_id)
            .cloned()
            .collect();
        entries.sort_by_key(|e| std::cmp::Reverse(e.recorded_at));
        entries.truncate(limit);
        Ok(entries)
    }

    async fn unlocked_achievement_ids(&self, pet_id: UUID) -> Result<HashSet<String>> {
        Ok(self
            .unlocked
            .read()
            .unwrap()
            .keys()
            .filter(|(id, _)| *id == pet_id)
            .map(|(_, achievement_id)| achievement_id.clone())
            .collect())
    }

    async fn unlocked_achievements(&self, pet_id: UUID) -> Result<Vec<UnlockedAchievement>> {
        let unlocked = self.unlocked.read().unwrap();
        let mut rows: Vec<_> = unlocked
            .values()
            .filter(|u| u.pet_id == pet_id)
            .cloned()
            .collect();
        rows.sort_by_key(|u| u.achieved_at);
        Ok(rows)
    }

    async fn insert_unlocked(&self, unlock: &UnlockedAchievement) -> Result<bool> {
        let mut unlocked = self.unlocked.write().unwrap();
        let key = (unlock.pet_id, unlock.achievement_id.clone());
        if unlocked.contains_key(&key) {
            return Ok(false);
        }
        unlocked.insert(key, unlock.clone());
        Ok(true)
    }
}

/// Create a pet fixture and register it in the store
pub async fn create_test_pet(store: &MemoryStore) -> Pet {
    let pet = Pet::new("Mochi", "cat", chrono::Utc::now().timestamp());
    store.ensure_pet(&pet).await.unwrap();
    pet
}
