//! PostgreSQL store adapter
//!
//! The hosted-backend production path. Same store contract as the SQLite
//! adapter; native UUID columns and `$n` placeholders.

use async_trait::async_trait;
use pawmate_core::store::PetStore;
use pawmate_core::types::{
    MoodHistoryEntry, MoodLabel, Pet, PetStats, UnlockedAchievement, UUID,
};
use pawmate_core::{PawmateError, Result};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::collections::HashSet;
use tracing::{debug, info};

/// PostgreSQL store adapter
pub struct PostgresAdapter {
    pool: PgPool,
}

fn stats_from_row(row: &PgRow) -> Result<PetStats> {
    let mood: String = row.get("current_mood");

    Ok(PetStats {
        pet_id: row.get("pet_id"),
        happiness: row.get("happiness"),
        hunger: row.get("hunger"),
        energy: row.get("energy"),
        cleanliness: row.get("cleanliness"),
        health: row.get("health"),
        affection_level: row.get("affection_level"),
        current_mood: mood.parse()?,
        total_pats: row.get::<i64, _>("total_pats") as u32,
        total_feeds: row.get::<i64, _>("total_feeds") as u32,
        total_plays: row.get::<i64, _>("total_plays") as u32,
        total_baths: row.get::<i64, _>("total_baths") as u32,
        last_fed: row.get("last_fed"),
        last_played: row.get("last_played"),
        last_bathed: row.get("last_bathed"),
        last_slept: row.get("last_slept"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

impl PostgresAdapter {
    /// Create a new PostgreSQL adapter
    pub async fn new(database_url: &str) -> Result<Self> {
        info!("Connecting to PostgreSQL...");

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(PawmateError::DatabaseSqlx)?;

        Ok(Self { pool })
    }

    /// Initialize the database schema
    pub async fn initialize(&self) -> Result<()> {
        self.init_schema().await
    }

    async fn init_schema(&self) -> Result<()> {
        debug!("Initializing PostgreSQL schema...");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS pets (
                id UUID PRIMARY KEY,
                name TEXT NOT NULL,
                species TEXT NOT NULL,
                created_at BIGINT NOT NULL
            )
        "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS pet_stats (
                pet_id UUID PRIMARY KEY REFERENCES pets(id) ON DELETE CASCADE,
                happiness INTEGER NOT NULL,
                hunger INTEGER NOT NULL,
                energy INTEGER NOT NULL,
                cleanliness INTEGER NOT NULL,
                health INTEGER NOT NULL,
                affection_level INTEGER NOT NULL DEFAULT 50,
                current_mood TEXT NOT NULL,
                total_pats BIGINT NOT NULL DEFAULT 0,
                total_feeds BIGINT NOT NULL DEFAULT 0,
                total_plays BIGINT NOT NULL DEFAULT 0,
                total_baths BIGINT NOT NULL DEFAULT 0,
                last_fed BIGINT,
                last_played BIGINT,
                last_bathed BIGINT,
                last_slept BIGINT,
                created_at BIGINT NOT NULL,
                updated_at BIGINT NOT NULL
            )
        "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS mood_history (
                id UUID PRIMARY KEY,
                pet_id UUID NOT NULL REFERENCES pets(id) ON DELETE CASCADE,
                mood TEXT NOT NULL,
                happiness INTEGER NOT NULL,
                hunger INTEGER NOT NULL,
                energy INTEGER NOT NULL,
                cleanliness INTEGER NOT NULL,
                recorded_at BIGINT NOT NULL
            )
        "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS unlocked_achievements (
                id UUID PRIMARY KEY,
                pet_id UUID NOT NULL REFERENCES pets(id) ON DELETE CASCADE,
                achievement_id TEXT NOT NULL,
                achievement_category TEXT NOT NULL,
                achieved_at BIGINT NOT NULL,
                UNIQUE (pet_id, achievement_id)
            )
        "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_mood_history_pet_recorded \
             ON mood_history(pet_id, recorded_at DESC)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_unlocked_pet ON unlocked_achievements(pet_id)",
        )
        .execute(&self.pool)
        .await?;

        info!("PostgreSQL schema initialized successfully");
        Ok(())
    }
}

#[async_trait]
impl PetStore for PostgresAdapter {
    async fn pet_exists(&self, pet_id: UUID) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM pets WHERE id = $1")
            .bind(pet_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    async fn ensure_pet(&self, pet: &Pet) -> Result<()> {
        sqlx::query(
            "INSERT INTO pets (id, name, species, created_at)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                species = EXCLUDED.species",
        )
        .bind(pet.id)
        .bind(&pet.name)
        .bind(&pet.species)
        .bind(pet.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_stats(&self, pet_id: UUID) -> Result<Option<PetStats>> {
        let row = sqlx::query("SELECT * FROM pet_stats WHERE pet_id = $1")
            .bind(pet_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| stats_from_row(&r)).transpose()
    }

    async fn get_or_create_stats(&self, pet_id: UUID) -> Result<PetStats> {
        let now = chrono::Utc::now().timestamp();
        let defaults = PetStats::with_defaults(pet_id, now);

        sqlx::query(
            "INSERT INTO pet_stats (
                pet_id, happiness, hunger, energy, cleanliness, health,
                affection_level, current_mood, total_pats, total_feeds,
                total_plays, total_baths, created_at, updated_at
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 0, 0, 0, 0, $9, $10)
             ON CONFLICT (pet_id) DO NOTHING",
        )
        .bind(pet_id)
        .bind(defaults.happiness)
        .bind(defaults.hunger)
        .bind(defaults.energy)
        .bind(defaults.cleanliness)
        .bind(defaults.health)
        .bind(defaults.affection_level)
        .bind(defaults.current_mood.as_str())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.get_stats(pet_id).await?.ok_or_else(|| {
            PawmateError::database(format!("pet_stats row missing after create for {pet_id}"))
        })
    }

    async fn save_stats(&self, stats: &PetStats) -> Result<()> {
        sqlx::query(
            "INSERT INTO pet_stats (
                pet_id, happiness, hunger, energy, cleanliness, health,
                affection_level, current_mood, total_pats, total_feeds,
                total_plays, total_baths, last_fed, last_played,
                last_bathed, last_slept, created_at, updated_at
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                     $11, $12, $13, $14, $15, $16, $17, $18)
             ON CONFLICT (pet_id) DO UPDATE SET
                happiness = EXCLUDED.happiness,
                hunger = EXCLUDED.hunger,
                energy = EXCLUDED.energy,
                cleanliness = EXCLUDED.cleanliness,
                health = EXCLUDED.health,
                affection_level = EXCLUDED.affection_level,
                current_mood = EXCLUDED.current_mood,
                total_pats = EXCLUDED.total_pats,
                total_feeds = EXCLUDED.total_feeds,
                total_plays = EXCLUDED.total_plays,
                total_baths = EXCLUDED.total_baths,
                last_fed = EXCLUDED.last_fed,
                last_played = EXCLUDED.last_played,
                last_bathed = EXCLUDED.last_bathed,
                last_slept = EXCLUDED.last_slept,
                updated_at = EXCLUDED.updated_at",
        )
        .bind(stats.pet_id)
        .bind(stats.happiness)
        .bind(stats.hunger)
        .bind(stats.energy)
        .bind(stats.cleanliness)
        .bind(stats.health)
        .bind(stats.affection_level)
        .bind(stats.current_mood.as_str())
        .bind(stats.total_pats as i64)
        .bind(stats.total_feeds as i64)
        .bind(stats.total_plays as i64)
        .bind(stats.total_baths as i64)
        .bind(stats.last_fed)
        .bind(stats.last_played)
        .bind(stats.last_bathed)
        .bind(stats.last_slept)
        .bind(stats.created_at)
        .bind(stats.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn append_mood_history(&self, entry: &MoodHistoryEntry) -> Result<()> {
        sqlx::query(
            "INSERT INTO mood_history (
                id, pet_id, mood, happiness, hunger, energy, cleanliness, recorded_at
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(entry.id)
        .bind(entry.pet_id)
        .bind(entry.mood.as_str())
        .bind(entry.happiness)
        .bind(entry.hunger)
        .bind(entry.energy)
        .bind(entry.cleanliness)
        .bind(entry.recorded_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn mood_history(&self, pet_id: UUID, limit: usize) -> Result<Vec<MoodHistoryEntry>> {
        let rows = sqlx::query(
            "SELECT id, pet_id, mood, happiness, hunger, energy, cleanliness, recorded_at
             FROM mood_history
             WHERE pet_id = $1
             ORDER BY recorded_at DESC
             LIMIT $2",
        )
        .bind(pet_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let mood: String = row.get("mood");
                Ok(MoodHistoryEntry {
                    id: row.get("id"),
                    pet_id: row.get("pet_id"),
                    mood: mood.parse::<MoodLabel>()?,
                    happiness: row.get("happiness"),
                    hunger: row.get("hunger"),
                    energy: row.get("energy"),
                    cleanliness: row.get("cleanliness"),
                    recorded_at: row.get("recorded_at"),
                })
            })
            .collect()
    }

    async fn unlocked_achievement_ids(&self, pet_id: UUID) -> Result<HashSet<String>> {
        let rows = sqlx::query(
            "SELECT achievement_id FROM unlocked_achievements WHERE pet_id = $1",
        )
        .bind(pet_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| row.get::<String, _>("achievement_id"))
            .collect())
    }

    async fn unlocked_achievements(&self, pet_id: UUID) -> Result<Vec<UnlockedAchievement>> {
        let rows = sqlx::query(
            "SELECT id, pet_id, achievement_id, achievement_category, achieved_at
             FROM unlocked_achievements
             WHERE pet_id = $1
             ORDER BY achieved_at ASC",
        )
        .bind(pet_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| UnlockedAchievement {
                id: row.get("id"),
                pet_id: row.get("pet_id"),
                achievement_id: row.get("achievement_id"),
                achievement_category: row.get("achievement_category"),
                achieved_at: row.get("achieved_at"),
            })
            .collect())
    }

    async fn insert_unlocked(&self, unlock: &UnlockedAchievement) -> Result<bool> {
        let result = sqlx::query(
            "INSERT INTO unlocked_achievements (
                id, pet_id, achievement_id, achievement_category, achieved_at
             )
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (pet_id, achievement_id) DO NOTHING",
        )
        .bind(unlock.id)
        .bind(unlock.pet_id)
        .bind(&unlock.achievement_id)
        .bind(&unlock.achievement_category)
        .bind(unlock.achieved_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
