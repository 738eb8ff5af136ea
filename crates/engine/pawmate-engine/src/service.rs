//! Interaction orchestration
//!
//! The service is the only component that touches the store. One call runs:
//! load (or lazily create) stats, compute the pure transition, persist,
//! sample mood history on a band change, evaluate and record achievement
//! unlocks, and return the outcome. The pure calculators stay store-free so
//! they can be unit tested without a database fixture.

use crate::achievements::evaluate_unlocks;
use crate::transition::compute_transition;
use pawmate_core::catalog::{builtin, AchievementCatalog};
use pawmate_core::config::get_env_int;
use pawmate_core::store::PetStore;
use pawmate_core::types::{
    InteractionKind, InteractionResult, MoodHistoryEntry, PetStats, UnlockedAchievement, UUID,
};
use pawmate_core::{PawmateError, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Configuration for the pet-care service
#[derive(Debug, Clone)]
pub struct PetCareConfig {
    /// Optional path to a JSON achievement catalog; builtin seed set when
    /// unset
    pub catalog_path: Option<String>,

    /// Default page size for mood-history reads
    pub history_limit: usize,
}

impl Default for PetCareConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            history_limit: 50,
        }
    }
}

impl PetCareConfig {
    /// Build configuration from `PAWMATE_*` environment variables
    pub fn from_env() -> Self {
        Self {
            catalog_path: std::env::var("PAWMATE_CATALOG_PATH").ok(),
            history_limit: get_env_int("PAWMATE_HISTORY_LIMIT", 50),
        }
    }
}

/// The pet-care service
///
/// Cheap to clone behind `Arc` fields; one instance serves every pet.
pub struct PetCareService {
    store: Arc<dyn PetStore>,
    catalog: AchievementCatalog,
    config: PetCareConfig,
}

impl PetCareService {
    /// Create a service with the default configuration
    pub fn new(store: Arc<dyn PetStore>, catalog: AchievementCatalog) -> Self {
        Self::with_config(store, catalog, PetCareConfig::default())
    }

    /// Create a service with explicit configuration
    pub fn with_config(
        store: Arc<dyn PetStore>,
        catalog: AchievementCatalog,
        config: PetCareConfig,
    ) -> Self {
        info!(
            "Pet-care service ready with {} achievement definitions",
            catalog.len()
        );
        Self {
            store,
            catalog,
            config,
        }
    }

    /// Create a service from environment configuration
    ///
    /// Loads the catalog from `PAWMATE_CATALOG_PATH` when set, otherwise
    /// uses the builtin seed set.
    pub fn from_env(store: Arc<dyn PetStore>) -> Result<Self> {
        let config = PetCareConfig::from_env();
        let catalog = match &config.catalog_path {
            Some(path) => AchievementCatalog::load_from_file(path)?,
            None => builtin::default_catalog(),
        };
        Ok(Self::with_config(store, catalog, config))
    }

    /// The catalog this service evaluates
    pub fn catalog(&self) -> &AchievementCatalog {
        &self.catalog
    }

    /// Apply one interaction to a pet
    ///
    /// Fails with `NotFound` when the pet has no upstream record and with
    /// `Persistence` when the stats write or an unlock insert fails. A
    /// failed mood-history append is logged and does not fail the call.
    pub async fn apply_interaction(
        &self,
        pet_id: UUID,
        kind: InteractionKind,
    ) -> Result<InteractionResult> {
        if !self.store.pet_exists(pet_id).await? {
            return Err(PawmateError::not_found(format!("pet {pet_id}")));
        }

        // 1. Load current stats, creating the default vector on first access.
        let current = self.store.get_or_create_stats(pet_id).await?;

        // 2. Pure transition.
        let now = chrono::Utc::now().timestamp();
        let transition = compute_transition(&current, kind, now);
        debug!(
            pet = %pet_id,
            interaction = %kind,
            mood_before = %transition.mood_before,
            mood_after = %transition.mood_after,
            "interaction applied"
        );

        // 3. Persist. Fatal on failure; nothing further runs.
        self.store
            .save_stats(&transition.stats)
            .await
            .map_err(|e| PawmateError::persistence("save_stats", e.to_string()))?;

        // 4. Sample mood history on a band change only. Best-effort.
        if transition.mood_changed() {
            let entry = MoodHistoryEntry::from_stats(&transition.stats, now);
            if let Err(e) = self.store.append_mood_history(&entry).await {
                warn!(pet = %pet_id, error = %e, "mood history append failed, continuing");
            }
        }

        // 5-6. Evaluate the catalog against the persisted vector and record
        // unlocks. A uniqueness conflict means a concurrent call already
        // recorded (and reported) the unlock.
        let already_unlocked = self.store.unlocked_achievement_ids(pet_id).await?;
        let satisfied = evaluate_unlocks(
            &transition.stats,
            self.catalog.definitions(),
            &already_unlocked,
        );

        let mut newly_unlocked = Vec::new();
        for definition in satisfied {
            let unlock = UnlockedAchievement::new(pet_id, definition, now);
            match self.store.insert_unlocked(&unlock).await {
                Ok(true) => {
                    info!(
                        pet = %pet_id,
                        achievement = %definition.id,
                        "achievement unlocked"
                    );
                    newly_unlocked.push(definition.clone());
                }
                Ok(false) => {
                    debug!(
                        pet = %pet_id,
                        achievement = %definition.id,
                        "achievement already unlocked by a concurrent call"
                    );
                }
                Err(e) => {
                    return Err(PawmateError::persistence("insert_unlocked", e.to_string()));
                }
            }
        }

        Ok(InteractionResult {
            stats: transition.stats,
            mood_before: transition.mood_before,
            mood_after: transition.mood_after,
            newly_unlocked,
        })
    }

    /// Read a pet's current stat vector without applying a transition
    ///
    /// Creates the default vector on first access, like any other read.
    pub async fn get_stats(&self, pet_id: UUID) -> Result<PetStats> {
        if !self.store.pet_exists(pet_id).await? {
            return Err(PawmateError::not_found(format!("pet {pet_id}")));
        }
        self.store.get_or_create_stats(pet_id).await
    }

    /// Read mood-history samples, newest first
    pub async fn mood_history(
        &self,
        pet_id: UUID,
        limit: Option<usize>,
    ) -> Result<Vec<MoodHistoryEntry>> {
        self.store
            .mood_history(pet_id, limit.unwrap_or(self.config.history_limit))
            .await
    }

    /// Read a pet's unlock records, oldest first
    pub async fn unlocked_achievements(
        &self,
        pet_id: UUID,
    ) -> Result<Vec<UnlockedAchievement>> {
        self.store.unlocked_achievements(pet_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawmate_core::testing::{create_test_pet, MemoryStore};
    use pawmate_core::types::{MoodLabel, Rarity, UnlockCondition};

    fn single_rule_catalog() -> AchievementCatalog {
        AchievementCatalog::from_definitions(vec![pawmate_core::types::AchievementDefinition {
            id: "first_pat".to_string(),
            name: "Gentle Touch".to_string(),
            description: String::new(),
            icon: String::new(),
            category: "care".to_string(),
            rarity: Rarity::Common,
            unlock_condition: UnlockCondition::FirstPat,
            display_order: 1,
        }])
    }

    #[tokio::test]
    async fn test_pat_on_fresh_pet() {
        let store = Arc::new(MemoryStore::new());
        let pet = create_test_pet(&store).await;
        let service = PetCareService::new(store.clone(), builtin::default_catalog());

        let result = service
            .apply_interaction(pet.id, InteractionKind::Pat)
            .await
            .unwrap();

        assert_eq!(result.stats.happiness, 90);
        assert_eq!(result.stats.affection_level, 60);
        assert_eq!(result.stats.energy, 75);
        assert_eq!(result.stats.total_pats, 1);
        assert_eq!(result.mood_before, MoodLabel::Happy);
        assert_eq!(result.mood_after, MoodLabel::Ecstatic);

        let ids: Vec<_> = result
            .newly_unlocked
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(ids, vec!["first_pat"]);

        // The band changed, so exactly one history sample was written with
        // post-transition values.
        let history = service.mood_history(pet.id, None).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].mood, MoodLabel::Ecstatic);
        assert_eq!(history[0].happiness, 90);
    }

    #[tokio::test]
    async fn test_unlock_is_not_rereturned() {
        let store = Arc::new(MemoryStore::new());
        let pet = create_test_pet(&store).await;
        let service = PetCareService::new(store, single_rule_catalog());

        let first = service
            .apply_interaction(pet.id, InteractionKind::Pat)
            .await
            .unwrap();
        assert_eq!(first.newly_unlocked.len(), 1);

        let second = service
            .apply_interaction(pet.id, InteractionKind::Pat)
            .await
            .unwrap();
        assert!(second.newly_unlocked.is_empty());

        let unlocked = service.unlocked_achievements(pet.id).await.unwrap();
        assert_eq!(unlocked.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_pet_fails() {
        let store = Arc::new(MemoryStore::new());
        let service = PetCareService::new(store, builtin::default_catalog());

        let err = service
            .apply_interaction(uuid::Uuid::new_v4(), InteractionKind::Feed)
            .await
            .unwrap_err();
        assert!(matches!(err, PawmateError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_save_failure_aborts_the_call() {
        let store = Arc::new(MemoryStore::new());
        let pet = create_test_pet(&store).await;
        let service = PetCareService::new(store.clone(), single_rule_catalog());

        store.fail_saves(true);
        let err = service
            .apply_interaction(pet.id, InteractionKind::Pat)
            .await
            .unwrap_err();

        match err {
            PawmateError::Persistence { operation, .. } => assert_eq!(operation, "save_stats"),
            other => panic!("unexpected error: {other}"),
        }

        // No downstream side effects.
        assert_eq!(store.history_len(), 0);
        assert!(service
            .unlocked_achievements(pet.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_history_failure_is_nonfatal() {
        let store = Arc::new(MemoryStore::new());
        let pet = create_test_pet(&store).await;
        let service = PetCareService::new(store.clone(), single_rule_catalog());

        store.fail_history(true);
        let result = service
            .apply_interaction(pet.id, InteractionKind::Pat)
            .await
            .unwrap();

        // Achievement evaluation still ran.
        assert_eq!(result.newly_unlocked.len(), 1);
        assert_eq!(store.history_len(), 0);
    }

    #[tokio::test]
    async fn test_get_stats_creates_defaults_without_mutation() {
        let store = Arc::new(MemoryStore::new());
        let pet = create_test_pet(&store).await;
        let service = PetCareService::new(store, builtin::default_catalog());

        let stats = service.get_stats(pet.id).await.unwrap();
        assert_eq!(stats.happiness, 75);
        assert_eq!(stats.total_pats, 0);
        assert_eq!(stats.current_mood, MoodLabel::Happy);

        // Reads do not transition.
        let again = service.get_stats(pet.id).await.unwrap();
        assert_eq!(again.total_pats, 0);
    }

    #[tokio::test]
    async fn test_concurrent_pats_on_fresh_pet() {
        let store = Arc::new(MemoryStore::new());
        let pet_id = create_test_pet(&store).await.id;
        let service = Arc::new(PetCareService::new(store.clone(), single_rule_catalog()));

        let a = {
            let service = service.clone();
            tokio::spawn(async move { service.apply_interaction(pet_id, InteractionKind::Pat).await })
        };
        let b = {
            let service = service.clone();
            tokio::spawn(async move { service.apply_interaction(pet_id, InteractionKind::Pat).await })
        };

        let a = a.await.unwrap().unwrap();
        let b = b.await.unwrap().unwrap();

        // One stats row; total_pats lands between 1 and 2 (a lost update on
        // the shared base read is the accepted bound).
        let stats = service.get_stats(pet_id).await.unwrap();
        assert!((1..=2).contains(&stats.total_pats));

        // Exactly one call reports the unlock.
        let reported = a.newly_unlocked.len() + b.newly_unlocked.len();
        assert_eq!(reported, 1);
    }
}
