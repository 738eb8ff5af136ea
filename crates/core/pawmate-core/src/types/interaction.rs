//! Interaction types

use crate::types::achievement::AchievementDefinition;
use crate::types::pet::{MoodLabel, PetStats};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the closed set of user actions that transitions a stat vector
///
/// The set is closed by construction: adding a kind means adding a variant
/// and the compiler walks every match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    /// Gentle pat; boosts happiness and affection at a small energy cost
    Pat,
    /// Feeding; pays down the hunger deficit
    Feed,
    /// Play session; big happiness and affection, expensive on energy
    Play,
    /// Bath; pets dislike it, but cleanliness and health improve
    Bath,
    /// Sleep; restores energy and health
    Sleep,
}

impl InteractionKind {
    /// All interaction kinds, in display order
    pub const ALL: [InteractionKind; 5] = [
        InteractionKind::Pat,
        InteractionKind::Feed,
        InteractionKind::Play,
        InteractionKind::Bath,
        InteractionKind::Sleep,
    ];

    /// Stable string form
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::Pat => "pat",
            InteractionKind::Feed => "feed",
            InteractionKind::Play => "play",
            InteractionKind::Bath => "bath",
            InteractionKind::Sleep => "sleep",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one orchestrated interaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionResult {
    /// Stat vector after the transition was persisted
    pub stats: PetStats,
    /// Mood derived from the pre-transition vector
    pub mood_before: MoodLabel,
    /// Mood derived from the post-transition vector
    pub mood_after: MoodLabel,
    /// Achievements unlocked by this call (empty if none)
    pub newly_unlocked: Vec<AchievementDefinition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serde() {
        assert_eq!(
            serde_json::to_string(&InteractionKind::Pat).unwrap(),
            r#""pat""#
        );
        let kind: InteractionKind = serde_json::from_str(r#""sleep""#).unwrap();
        assert_eq!(kind, InteractionKind::Sleep);
    }

    #[test]
    fn test_all_is_exhaustive() {
        assert_eq!(InteractionKind::ALL.len(), 5);
    }
}
