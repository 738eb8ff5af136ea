//! Achievement catalog types
//!
//! Definitions are supplied externally (JSON catalog or the builtin seed
//! set) and are read-only to this core. Each definition carries exactly one
//! unlock condition; unlocked rows are append-only and unique per
//! `(pet_id, achievement_id)`.

use crate::types::pet::PetStats;
use crate::types::UUID;
use serde::{Deserialize, Serialize};

/// Achievement rarity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    /// Baseline tier
    Common,
    /// Slightly harder to earn
    Uncommon,
    /// Notable milestone
    Rare,
    /// Major milestone
    Epic,
    /// Top tier
    Legendary,
}

/// Lifetime counter referenced by a `counter` condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CounterField {
    /// `total_pats`
    TotalPats,
    /// `total_feeds`
    TotalFeeds,
    /// `total_plays`
    TotalPlays,
    /// `total_baths`
    TotalBaths,
}

impl CounterField {
    /// Read the matching counter from a stat vector
    pub fn read(&self, stats: &PetStats) -> u32 {
        match self {
            CounterField::TotalPats => stats.total_pats,
            CounterField::TotalFeeds => stats.total_feeds,
            CounterField::TotalPlays => stats.total_plays,
            CounterField::TotalBaths => stats.total_baths,
        }
    }
}

/// Bounded stat referenced by a `stat` condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoundedField {
    /// `happiness`
    Happiness,
    /// `hunger`
    Hunger,
    /// `energy`
    Energy,
    /// `cleanliness`
    Cleanliness,
    /// `health`
    Health,
    /// `affection_level`
    AffectionLevel,
}

impl BoundedField {
    /// Read the matching bounded stat from a stat vector
    pub fn read(&self, stats: &PetStats) -> i32 {
        match self {
            BoundedField::Happiness => stats.happiness,
            BoundedField::Hunger => stats.hunger,
            BoundedField::Energy => stats.energy,
            BoundedField::Cleanliness => stats.cleanliness,
            BoundedField::Health => stats.health,
            BoundedField::AffectionLevel => stats.affection_level,
        }
    }
}

/// Unlock rule attached to an achievement definition
///
/// Closed set of condition kinds; catalog entries with a tag this build
/// does not know deserialize to [`UnlockCondition::Unknown`], which never
/// satisfies, so newer catalogs stay loadable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UnlockCondition {
    /// A lifetime counter reached `value`
    Counter {
        /// Counter to compare
        stat: CounterField,
        /// Inclusive threshold
        value: u32,
    },
    /// A bounded stat reached `value`
    Stat {
        /// Stat to compare
        stat: BoundedField,
        /// Inclusive threshold
        value: i32,
    },
    /// Every stat is at least `value` (hunger at most `100 - value`)
    AllStats {
        /// Inclusive threshold
        value: i32,
    },
    /// First pat ever
    FirstPat,
    /// First feed ever
    FirstFeed,
    /// First play ever
    FirstPlay,
    /// First bath ever
    FirstBath,
    /// Forward-compatible catch-all; never satisfied
    #[serde(other)]
    Unknown,
}

impl UnlockCondition {
    /// Test this condition against a live stat vector
    pub fn is_satisfied(&self, stats: &PetStats) -> bool {
        match self {
            UnlockCondition::Counter { stat, value } => stat.read(stats) >= *value,
            UnlockCondition::Stat { stat, value } => stat.read(stats) >= *value,
            UnlockCondition::AllStats { value } => {
                // Hunger is a deficit, so the check inverts for it.
                stats.happiness >= *value
                    && stats.hunger <= 100 - *value
                    && stats.energy >= *value
                    && stats.cleanliness >= *value
                    && stats.health >= *value
                    && stats.affection_level >= *value
            }
            UnlockCondition::FirstPat => stats.total_pats >= 1,
            UnlockCondition::FirstFeed => stats.total_feeds >= 1,
            UnlockCondition::FirstPlay => stats.total_plays >= 1,
            UnlockCondition::FirstBath => stats.total_baths >= 1,
            UnlockCondition::Unknown => false,
        }
    }
}

/// A named, catalog-supplied unlock rule
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementDefinition {
    /// Stable catalog identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Display description
    pub description: String,
    /// Icon reference for the client
    pub icon: String,
    /// Grouping label (e.g. "care", "bond")
    pub category: String,
    /// Rarity tier
    pub rarity: Rarity,
    /// Unlock rule
    pub unlock_condition: UnlockCondition,
    /// Catalog ordering key
    pub display_order: i32,
}

/// Permanent record that a pet satisfied a rule at least once
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockedAchievement {
    /// Row identifier
    pub id: UUID,
    /// Owning pet
    pub pet_id: UUID,
    /// Catalog id of the satisfied definition
    pub achievement_id: String,
    /// Category copied from the definition
    pub achievement_category: String,
    /// Unlock timestamp (unix seconds)
    pub achieved_at: i64,
}

impl UnlockedAchievement {
    /// Record an unlock of `definition` for `pet_id`
    pub fn new(pet_id: UUID, definition: &AchievementDefinition, now: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            pet_id,
            achievement_id: definition.id.clone(),
            achievement_category: definition.category.clone(),
            achieved_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> PetStats {
        PetStats::with_defaults(uuid::Uuid::new_v4(), 0)
    }

    #[test]
    fn test_condition_tagged_serde() {
        let condition: UnlockCondition =
            serde_json::from_str(r#"{"type":"counter","stat":"totalPats","value":100}"#).unwrap();
        assert_eq!(
            condition,
            UnlockCondition::Counter {
                stat: CounterField::TotalPats,
                value: 100
            }
        );

        let condition: UnlockCondition = serde_json::from_str(r#"{"type":"first_bath"}"#).unwrap();
        assert_eq!(condition, UnlockCondition::FirstBath);
    }

    #[test]
    fn test_unknown_condition_type_is_tolerated() {
        let condition: UnlockCondition =
            serde_json::from_str(r#"{"type":"seasonal_event"}"#).unwrap();
        assert_eq!(condition, UnlockCondition::Unknown);
        assert!(!condition.is_satisfied(&stats()));
    }

    #[test]
    fn test_counter_condition() {
        let mut s = stats();
        let condition = UnlockCondition::Counter {
            stat: CounterField::TotalFeeds,
            value: 3,
        };

        assert!(!condition.is_satisfied(&s));
        s.total_feeds = 3;
        assert!(condition.is_satisfied(&s));
    }

    #[test]
    fn test_first_interaction_conditions() {
        let mut s = stats();
        assert!(!UnlockCondition::FirstPat.is_satisfied(&s));
        s.total_pats = 1;
        assert!(UnlockCondition::FirstPat.is_satisfied(&s));
    }

    #[test]
    fn test_all_stats_inverts_hunger() {
        let mut s = stats();
        s.happiness = 90;
        s.energy = 90;
        s.cleanliness = 90;
        s.health = 90;
        s.affection_level = 90;
        s.hunger = 15;

        let condition = UnlockCondition::AllStats { value: 80 };
        assert!(condition.is_satisfied(&s));

        // Hunger above 100 - value fails even with every other stat maxed.
        s.hunger = 25;
        assert!(!condition.is_satisfied(&s));
    }

    #[test]
    fn test_stat_condition_threshold_inclusive() {
        let mut s = stats();
        s.affection_level = 100;
        let condition = UnlockCondition::Stat {
            stat: BoundedField::AffectionLevel,
            value: 100,
        };
        assert!(condition.is_satisfied(&s));
    }
}
