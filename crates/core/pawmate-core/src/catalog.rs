//! Achievement catalog loading
//!
//! The catalog is an ordered, read-only list of achievement definitions.
//! It can be loaded from a JSON file (the deployed path) or taken from the
//! builtin seed set.

use crate::types::{AchievementDefinition, Rarity, UnlockCondition};
use crate::Result;
use std::path::Path;

/// Ordered, read-only achievement catalog
#[derive(Debug, Clone, Default)]
pub struct AchievementCatalog {
    definitions: Vec<AchievementDefinition>,
}

impl AchievementCatalog {
    /// Build a catalog, sorting by `display_order`
    pub fn from_definitions(mut definitions: Vec<AchievementDefinition>) -> Self {
        definitions.sort_by_key(|d| d.display_order);
        Self { definitions }
    }

    /// Parse a catalog from a JSON array of definitions
    pub fn from_json_str(json: &str) -> Result<Self> {
        let definitions: Vec<AchievementDefinition> = serde_json::from_str(json)?;
        Ok(Self::from_definitions(definitions))
    }

    /// Load a catalog from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_json_str(&json)?;
        tracing::info!(
            "Loaded {} achievement definitions from {}",
            catalog.len(),
            path.as_ref().display()
        );
        Ok(catalog)
    }

    /// Definitions in catalog order
    pub fn definitions(&self) -> &[AchievementDefinition] {
        &self.definitions
    }

    /// Look up a definition by id
    pub fn get(&self, id: &str) -> Option<&AchievementDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }

    /// Number of definitions
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Builtin seed catalog
pub mod builtin {
    use super::*;
    use crate::types::{BoundedField, CounterField};

    #[allow(clippy::too_many_arguments)]
    fn definition(
        id: &str,
        name: &str,
        description: &str,
        icon: &str,
        category: &str,
        rarity: Rarity,
        unlock_condition: UnlockCondition,
        display_order: i32,
    ) -> AchievementDefinition {
        AchievementDefinition {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            category: category.to_string(),
            rarity,
            unlock_condition,
            display_order,
        }
    }

    /// The catalog shipped with the app
    pub fn default_catalog() -> AchievementCatalog {
        AchievementCatalog::from_definitions(vec![
            definition(
                "first_pat",
                "Gentle Touch",
                "Pat your pet for the first time",
                "hand-heart",
                "care",
                Rarity::Common,
                UnlockCondition::FirstPat,
                1,
            ),
            definition(
                "first_feed",
                "First Meal",
                "Feed your pet for the first time",
                "bowl",
                "care",
                Rarity::Common,
                UnlockCondition::FirstFeed,
                2,
            ),
            definition(
                "first_play",
                "Playtime",
                "Play with your pet for the first time",
                "ball",
                "play",
                Rarity::Common,
                UnlockCondition::FirstPlay,
                3,
            ),
            definition(
                "first_bath",
                "Squeaky Clean",
                "Give your pet its first bath",
                "bubbles",
                "care",
                Rarity::Common,
                UnlockCondition::FirstBath,
                4,
            ),
            definition(
                "pat_100",
                "Pat Pro",
                "Pat your pet 100 times",
                "hand-sparkles",
                "care",
                Rarity::Uncommon,
                UnlockCondition::Counter {
                    stat: CounterField::TotalPats,
                    value: 100,
                },
                5,
            ),
            definition(
                "feed_50",
                "Well Fed",
                "Feed your pet 50 times",
                "chef-hat",
                "care",
                Rarity::Uncommon,
                UnlockCondition::Counter {
                    stat: CounterField::TotalFeeds,
                    value: 50,
                },
                6,
            ),
            definition(
                "play_100",
                "Best Friends",
                "Play with your pet 100 times",
                "confetti",
                "play",
                Rarity::Rare,
                UnlockCondition::Counter {
                    stat: CounterField::TotalPlays,
                    value: 100,
                },
                7,
            ),
            definition(
                "bath_25",
                "Spa Regular",
                "Bathe your pet 25 times",
                "towel",
                "care",
                Rarity::Uncommon,
                UnlockCondition::Counter {
                    stat: CounterField::TotalBaths,
                    value: 25,
                },
                8,
            ),
            definition(
                "max_happiness",
                "Pure Joy",
                "Reach maximum happiness",
                "sun",
                "mood",
                Rarity::Rare,
                UnlockCondition::Stat {
                    stat: BoundedField::Happiness,
                    value: 100,
                },
                9,
            ),
            definition(
                "max_affection",
                "Soul Bond",
                "Reach maximum affection",
                "heart",
                "bond",
                Rarity::Epic,
                UnlockCondition::Stat {
                    stat: BoundedField::AffectionLevel,
                    value: 100,
                },
                10,
            ),
            definition(
                "harmony_80",
                "Perfect Harmony",
                "Keep every stat in great shape at once",
                "crown",
                "mood",
                Rarity::Legendary,
                UnlockCondition::AllStats { value: 80 },
                11,
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_sorted_by_display_order() {
        let json = r#"[
            {"id":"b","name":"B","description":"","icon":"","category":"care",
             "rarity":"common","unlockCondition":{"type":"first_feed"},"displayOrder":2},
            {"id":"a","name":"A","description":"","icon":"","category":"care",
             "rarity":"common","unlockCondition":{"type":"first_pat"},"displayOrder":1}
        ]"#;

        let catalog = AchievementCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.definitions()[0].id, "a");
        assert_eq!(catalog.definitions()[1].id, "b");
    }

    #[test]
    fn test_catalog_tolerates_unknown_condition_types() {
        let json = r#"[
            {"id":"mystery","name":"?","description":"","icon":"","category":"event",
             "rarity":"legendary","unlockCondition":{"type":"lunar_eclipse"},"displayOrder":1}
        ]"#;

        let catalog = AchievementCatalog::from_json_str(json).unwrap();
        assert_eq!(
            catalog.definitions()[0].unlock_condition,
            UnlockCondition::Unknown
        );
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = builtin::default_catalog();
        assert!(!catalog.is_empty());
        assert!(catalog.get("first_pat").is_some());
        assert!(catalog.get("nope").is_none());

        // Ids are unique; the uniqueness constraint downstream depends on it.
        let mut ids: Vec<_> = catalog.definitions().iter().map(|d| &d.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }
}
