//! Core domain types

use uuid::Uuid;

/// UUID type (re-export for convenience)
pub type UUID = Uuid;

pub mod achievement;
pub mod interaction;
pub mod pet;

pub use achievement::{
    AchievementDefinition, BoundedField, CounterField, Rarity, UnlockCondition,
    UnlockedAchievement,
};
pub use interaction::{InteractionKind, InteractionResult};
pub use pet::{clamp_stat, MoodHistoryEntry, MoodLabel, Pet, PetStats, STAT_MAX, STAT_MIN};
