//! Interaction transitions
//!
//! Pure calculation of the next stat vector for an interaction. The deltas
//! are deliberately asymmetric and lossy (bathing costs happiness, play
//! builds hunger) so the simulation does not converge to an all-100 steady
//! state. Tuning values here changes live pet behavior.

use crate::mood::classify_mood;
use pawmate_core::types::{clamp_stat, InteractionKind, MoodLabel, PetStats};

/// Result of applying one interaction to a stat vector
#[derive(Debug, Clone)]
pub struct Transition {
    /// Candidate stat vector with deltas applied and mood recomputed
    pub stats: PetStats,
    /// Mood of the input vector
    pub mood_before: MoodLabel,
    /// Mood of the candidate vector
    pub mood_after: MoodLabel,
}

impl Transition {
    /// Whether this transition crossed a mood band
    pub fn mood_changed(&self) -> bool {
        self.mood_before != self.mood_after
    }
}

/// Apply one interaction to a stat vector
///
/// Does not mutate the input. Every bounded field in the result is clamped
/// to `[0, 100]`, the matching lifetime counter increments by exactly one,
/// and `current_mood` is always set to the post-transition mood, even when
/// the band did not change. `now` stamps the interaction timestamps, so
/// callers (and tests) control time.
pub fn compute_transition(current: &PetStats, kind: InteractionKind, now: i64) -> Transition {
    let mood_before = classify_mood(current);
    let mut next = current.clone();

    match kind {
        InteractionKind::Pat => {
            next.happiness = clamp_stat(next.happiness + 15);
            next.energy = clamp_stat(next.energy - 5);
            next.affection_level = clamp_stat(next.affection_level + 10);
            next.total_pats += 1;
        }
        InteractionKind::Feed => {
            next.happiness = clamp_stat(next.happiness + 10);
            next.hunger = clamp_stat(next.hunger - 30);
            next.energy = clamp_stat(next.energy - 10);
            next.health = clamp_stat(next.health + 5);
            next.total_feeds += 1;
            next.last_fed = Some(now);
        }
        InteractionKind::Play => {
            next.happiness = clamp_stat(next.happiness + 20);
            next.hunger = clamp_stat(next.hunger + 10);
            next.energy = clamp_stat(next.energy - 25);
            next.affection_level = clamp_stat(next.affection_level + 15);
            next.total_plays += 1;
            next.last_played = Some(now);
        }
        InteractionKind::Bath => {
            // Pets dislike baths.
            next.happiness = clamp_stat(next.happiness - 10);
            next.energy = clamp_stat(next.energy - 15);
            next.cleanliness = clamp_stat(next.cleanliness + 30);
            next.health = clamp_stat(next.health + 10);
            next.total_baths += 1;
            next.last_bathed = Some(now);
        }
        InteractionKind::Sleep => {
            next.hunger = clamp_stat(next.hunger + 5);
            next.energy = clamp_stat(next.energy + 40);
            next.health = clamp_stat(next.health + 10);
            next.last_slept = Some(now);
        }
    }

    let mood_after = classify_mood(&next);
    next.current_mood = mood_after;
    next.updated_at = now;

    Transition {
        stats: next,
        mood_before,
        mood_after,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawmate_core::types::{STAT_MAX, STAT_MIN};

    const NOW: i64 = 1_700_000_000;

    fn fresh() -> PetStats {
        PetStats::with_defaults(uuid::Uuid::new_v4(), 0)
    }

    #[test]
    fn test_pat_on_fresh_pet() {
        let transition = compute_transition(&fresh(), InteractionKind::Pat, NOW);
        let stats = &transition.stats;

        assert_eq!(stats.happiness, 90);
        assert_eq!(stats.affection_level, 60);
        assert_eq!(stats.energy, 75);
        assert_eq!(stats.total_pats, 1);
        assert_eq!(stats.current_mood, transition.mood_after);
        // Pat carries no timestamp.
        assert!(stats.last_fed.is_none());
        assert!(stats.last_played.is_none());
    }

    #[test]
    fn test_feed_pays_down_hunger() {
        let mut current = fresh();
        current.hunger = 80;

        let transition = compute_transition(&current, InteractionKind::Feed, NOW);
        let stats = &transition.stats;

        assert_eq!(stats.hunger, 50);
        assert_eq!(stats.health, 95);
        assert_eq!(stats.energy, 70);
        assert_eq!(stats.happiness, 85);
        assert_eq!(stats.total_feeds, 1);
        assert_eq!(stats.last_fed, Some(NOW));
    }

    #[test]
    fn test_bath_costs_happiness() {
        let mut current = fresh();
        current.happiness = 100;

        let transition = compute_transition(&current, InteractionKind::Bath, NOW);
        let stats = &transition.stats;

        assert_eq!(stats.happiness, 90);
        assert_eq!(stats.cleanliness, 100); // 70 + 30, clamped
        assert_eq!(stats.health, 100);
        assert_eq!(stats.total_baths, 1);
        assert_eq!(stats.last_bathed, Some(NOW));
    }

    #[test]
    fn test_sleep_restores_energy() {
        let transition = compute_transition(&fresh(), InteractionKind::Sleep, NOW);
        let stats = &transition.stats;

        assert_eq!(stats.energy, 100); // 80 + 40, clamped
        assert_eq!(stats.hunger, 55);
        assert_eq!(stats.health, 100);
        assert_eq!(stats.last_slept, Some(NOW));
        // Sleep has no lifetime counter.
        assert_eq!(stats.total_pats, 0);
        assert_eq!(stats.total_feeds, 0);
    }

    #[test]
    fn test_affection_untouched_by_feed_bath_sleep() {
        for kind in [
            InteractionKind::Feed,
            InteractionKind::Bath,
            InteractionKind::Sleep,
        ] {
            let transition = compute_transition(&fresh(), kind, NOW);
            assert_eq!(transition.stats.affection_level, 50, "{kind}");
        }
    }

    #[test]
    fn test_bounded_fields_stay_in_range_from_extremes() {
        let mut maxed = fresh();
        maxed.happiness = 100;
        maxed.hunger = 100;
        maxed.energy = 100;
        maxed.cleanliness = 100;
        maxed.health = 100;
        maxed.affection_level = 100;

        let mut drained = fresh();
        drained.happiness = 0;
        drained.hunger = 0;
        drained.energy = 0;
        drained.cleanliness = 0;
        drained.health = 0;
        drained.affection_level = 0;

        for start in [maxed, drained] {
            for kind in InteractionKind::ALL {
                let stats = compute_transition(&start, kind, NOW).stats;
                for value in [
                    stats.happiness,
                    stats.hunger,
                    stats.energy,
                    stats.cleanliness,
                    stats.health,
                    stats.affection_level,
                ] {
                    assert!(
                        (STAT_MIN..=STAT_MAX).contains(&value),
                        "{kind}: {value} out of range"
                    );
                }
            }
        }
    }

    #[test]
    fn test_input_is_not_mutated() {
        let current = fresh();
        let snapshot = current.clone();
        let _ = compute_transition(&current, InteractionKind::Play, NOW);
        assert_eq!(current, snapshot);
    }

    #[test]
    fn test_mood_recorded_even_without_band_change() {
        // High vector stays ecstatic across a pat; current_mood is still
        // refreshed to the post-transition label.
        let mut current = fresh();
        current.happiness = 100;
        current.energy = 100;
        current.health = 100;
        current.hunger = 100;
        current.cleanliness = 100;

        let transition = compute_transition(&current, InteractionKind::Pat, NOW);
        assert!(!transition.mood_changed());
        assert_eq!(transition.stats.current_mood, transition.mood_after);
    }
}
