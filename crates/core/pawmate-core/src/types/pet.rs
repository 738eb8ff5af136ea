//! Pet state types
//!
//! The stat vector is the bounded numeric state describing one pet's
//! well-being. All bounded fields live in `[0, 100]`; `hunger` counts a
//! satiation deficit, so higher is worse, while every other bounded field
//! is higher-is-better.

use crate::types::UUID;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lower bound for every clamped stat field
pub const STAT_MIN: i32 = 0;

/// Upper bound for every clamped stat field
pub const STAT_MAX: i32 = 100;

/// Clamp a stat value into the `[STAT_MIN, STAT_MAX]` range
pub fn clamp_stat(value: i32) -> i32 {
    value.clamp(STAT_MIN, STAT_MAX)
}

/// Discrete mood label derived from the stat vector
///
/// Never set directly by callers; the engine recomputes it on every
/// transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodLabel {
    /// Top band, score >= 85
    Ecstatic,
    /// Score in [70, 85)
    #[default]
    Happy,
    /// Score in [50, 70)
    Content,
    /// Score in [30, 50)
    Sad,
    /// Bottom band, score < 30
    Upset,
}

impl MoodLabel {
    /// Stable string form, used for storage and display
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodLabel::Ecstatic => "ecstatic",
            MoodLabel::Happy => "happy",
            MoodLabel::Content => "content",
            MoodLabel::Sad => "sad",
            MoodLabel::Upset => "upset",
        }
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoodLabel {
    type Err = crate::PawmateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ecstatic" => Ok(MoodLabel::Ecstatic),
            "happy" => Ok(MoodLabel::Happy),
            "content" => Ok(MoodLabel::Content),
            "sad" => Ok(MoodLabel::Sad),
            "upset" => Ok(MoodLabel::Upset),
            other => Err(crate::PawmateError::validation(format!(
                "unknown mood label '{}'",
                other
            ))),
        }
    }
}

/// Minimal upstream pet record
///
/// Lifecycle is owned by the application layer; this core only checks
/// existence and never deletes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    /// Unique pet identifier
    pub id: UUID,
    /// Display name
    pub name: String,
    /// Species label (cosmetic)
    pub species: String,
    /// Creation timestamp (unix seconds)
    pub created_at: i64,
}

impl Pet {
    /// Create a new pet record
    pub fn new(name: impl Into<String>, species: impl Into<String>, now: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            name: name.into(),
            species: species.into(),
            created_at: now,
        }
    }
}

/// The bounded numeric state of one pet
///
/// Owned exclusively by that pet; mutated only through the interaction
/// service. Bounded fields stay within `[0, 100]` after every transition
/// and lifetime counters never decrease.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetStats {
    /// Owning pet
    pub pet_id: UUID,

    /// Higher is better
    pub happiness: i32,
    /// Satiation deficit: higher is worse
    pub hunger: i32,
    /// Higher is better
    pub energy: i32,
    /// Higher is better
    pub cleanliness: i32,
    /// Higher is better
    pub health: i32,
    /// Higher is better; only pat/play touch it
    pub affection_level: i32,

    /// Derived label, recomputed on every transition
    pub current_mood: MoodLabel,

    /// Lifetime pat count
    pub total_pats: u32,
    /// Lifetime feed count
    pub total_feeds: u32,
    /// Lifetime play count
    pub total_plays: u32,
    /// Lifetime bath count
    pub total_baths: u32,

    /// Last feed time (unix seconds)
    pub last_fed: Option<i64>,
    /// Last play time (unix seconds)
    pub last_played: Option<i64>,
    /// Last bath time (unix seconds)
    pub last_bathed: Option<i64>,
    /// Last sleep time (unix seconds)
    pub last_slept: Option<i64>,

    /// Row creation timestamp (unix seconds)
    pub created_at: i64,
    /// Last write timestamp (unix seconds)
    pub updated_at: i64,
}

impl PetStats {
    /// Stat vector for a pet seen for the first time
    pub fn with_defaults(pet_id: UUID, now: i64) -> Self {
        Self {
            pet_id,
            happiness: 75,
            hunger: 50,
            energy: 80,
            cleanliness: 70,
            health: 90,
            affection_level: 50,
            current_mood: MoodLabel::Happy,
            total_pats: 0,
            total_feeds: 0,
            total_plays: 0,
            total_baths: 0,
            last_fed: None,
            last_played: None,
            last_bathed: None,
            last_slept: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One sampled mood transition
///
/// Appended only when an interaction changes the derived mood, so the log
/// grows with emotional-state transitions rather than raw interaction
/// volume. Best-effort telemetry; never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodHistoryEntry {
    /// Row identifier
    pub id: UUID,
    /// Owning pet
    pub pet_id: UUID,
    /// Mood after the transition
    pub mood: MoodLabel,
    /// Post-transition happiness
    pub happiness: i32,
    /// Post-transition hunger
    pub hunger: i32,
    /// Post-transition energy
    pub energy: i32,
    /// Post-transition cleanliness
    pub cleanliness: i32,
    /// Sample timestamp (unix seconds)
    pub recorded_at: i64,
}

impl MoodHistoryEntry {
    /// Sample the post-transition stat vector
    pub fn from_stats(stats: &PetStats, now: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            pet_id: stats.pet_id,
            mood: stats.current_mood,
            happiness: stats.happiness,
            hunger: stats.hunger,
            energy: stats.energy,
            cleanliness: stats.cleanliness,
            recorded_at: now,
        }
    }
}
