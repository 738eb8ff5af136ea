//! Achievement rule evaluation
//!
//! Pure scan of the catalog against a live stat vector. Achievements are
//! monotonic: once unlocked they are skipped forever, and rules are tested
//! independently in catalog order.

use pawmate_core::types::{AchievementDefinition, PetStats};
use std::collections::HashSet;

/// Collect the definitions newly satisfied by `stats`
///
/// Definitions whose id is in `already_unlocked` are skipped without being
/// re-tested. Unknown condition variants never satisfy, so forward-compat
/// catalog entries pass through harmlessly.
pub fn evaluate_unlocks<'a>(
    stats: &PetStats,
    catalog: &'a [AchievementDefinition],
    already_unlocked: &HashSet<String>,
) -> Vec<&'a AchievementDefinition> {
    catalog
        .iter()
        .filter(|definition| !already_unlocked.contains(&definition.id))
        .filter(|definition| definition.unlock_condition.is_satisfied(stats))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawmate_core::catalog::builtin::default_catalog;
    use pawmate_core::types::{Rarity, UnlockCondition};

    fn stats() -> PetStats {
        PetStats::with_defaults(uuid::Uuid::new_v4(), 0)
    }

    fn definition(id: &str, condition: UnlockCondition, order: i32) -> AchievementDefinition {
        AchievementDefinition {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            icon: String::new(),
            category: "care".to_string(),
            rarity: Rarity::Common,
            unlock_condition: condition,
            display_order: order,
        }
    }

    #[test]
    fn test_unlocks_in_catalog_order() {
        let mut s = stats();
        s.total_pats = 1;
        s.total_feeds = 1;

        let catalog = vec![
            definition("second", UnlockCondition::FirstFeed, 2),
            definition("first", UnlockCondition::FirstPat, 1),
        ];

        let unlocked = evaluate_unlocks(&s, &catalog, &HashSet::new());
        let ids: Vec<_> = unlocked.iter().map(|d| d.id.as_str()).collect();
        // Catalog slice order is authoritative; the catalog type sorts by
        // display_order before it gets here.
        assert_eq!(ids, vec!["second", "first"]);
    }

    #[test]
    fn test_already_unlocked_are_skipped() {
        let mut s = stats();
        s.total_pats = 5;

        let catalog = vec![definition("first_pat", UnlockCondition::FirstPat, 1)];
        let mut unlocked_ids = HashSet::new();

        let first_pass = evaluate_unlocks(&s, &catalog, &unlocked_ids);
        assert_eq!(first_pass.len(), 1);

        unlocked_ids.insert("first_pat".to_string());
        let second_pass = evaluate_unlocks(&s, &catalog, &unlocked_ids);
        assert!(second_pass.is_empty());
    }

    #[test]
    fn test_rules_are_independent() {
        let mut s = stats();
        s.total_pats = 1;

        let catalog = vec![
            definition("unsatisfied", UnlockCondition::FirstBath, 1),
            definition("satisfied", UnlockCondition::FirstPat, 2),
            definition("unknown", UnlockCondition::Unknown, 3),
        ];

        let unlocked = evaluate_unlocks(&s, &catalog, &HashSet::new());
        let ids: Vec<_> = unlocked.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["satisfied"]);
    }

    #[test]
    fn test_fresh_pet_unlocks_nothing_from_builtin_catalog() {
        let catalog = default_catalog();
        let unlocked = evaluate_unlocks(&stats(), catalog.definitions(), &HashSet::new());
        assert!(unlocked.is_empty());
    }
}
