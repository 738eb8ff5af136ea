//! SQLite store adapter
//!
//! Implements the pet store on SQLite. Used for local development and
//! integration tests; the hosted deployment runs the PostgreSQL adapter.

use async_trait::async_trait;
use pawmate_core::store::PetStore;
use pawmate_core::types::{
    MoodHistoryEntry, MoodLabel, Pet, PetStats, UnlockedAchievement, UUID,
};
use pawmate_core::{PawmateError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::collections::HashSet;
use std::str::FromStr;
use tracing::{debug, info};

/// SQLite store adapter
pub struct SqliteAdapter {
    pool: SqlitePool,
}

fn parse_uuid(value: &str) -> Result<UUID> {
    uuid::Uuid::parse_str(value)
        .map_err(|e| PawmateError::validation(format!("invalid uuid '{}': {}", value, e)))
}

fn stats_from_row(row: &SqliteRow) -> Result<PetStats> {
    let pet_id: String = row.get("pet_id");
    let mood: String = row.get("current_mood");

    Ok(PetStats {
        pet_id: parse_uuid(&pet_id)?,
        happiness: row.get::<i64, _>("happiness") as i32,
        hunger: row.get::<i64, _>("hunger") as i32,
        energy: row.get::<i64, _>("energy") as i32,
        cleanliness: row.get::<i64, _>("cleanliness") as i32,
        health: row.get::<i64, _>("health") as i32,
        affection_level: row.get::<i64, _>("affection_level") as i32,
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

impl SqliteAdapter {
    /// Create a new SQLite adapter
    pub async fn new(database_path: &str) -> Result<Self> {
        info!("Opening SQLite database at: {}", database_path);

        let opts = SqliteConnectOptions::from_str(database_path)
            .map_err(|e| PawmateError::database(format!("Invalid SQLite URL: {}", e)))?
            .create_if_missing(true);

        // An in-memory SQLite database exists per connection; keep the
        // pool at a single connection so every caller sees the same data.
        let max_connections = if database_path.contains(":memory:") {
            1
        } else {
            5
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(opts)
            .await
            .map_err(PawmateError::DatabaseSqlx)?;

        Ok(Self { pool })
    }

    /// Initialize the database schema
    pub async fn initialize(&self) -> Result<()> {
        self.init_schema().await
    }

    async fn init_schema(&self) -> Result<()> {
        debug!("Initializing SQLite schema...");

        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&self.pool)
            .await?;

        // Pets table (owned upstream; this core only reads and upserts)
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS pets (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                species TEXT NOT NULL,
                created_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
            )
        "#,
        )
        .execute(&self.pool)
        .await?;

        // One stat vector per pet
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS pet_stats (
                pet_id TEXT PRIMARY KEY REFERENCES pets(id) ON DELETE CASCADE,
                happiness INTEGER NOT NULL,
                hunger INTEGER NOT NULL,
                energy INTEGER NOT NULL,
                cleanliness INTEGER NOT NULL,
                health INTEGER NOT NULL,
                affection_level INTEGER NOT NULL DEFAULT 50,
                current_mood TEXT NOT NULL,
                total_pats INTEGER NOT NULL DEFAULT 0,
                total_feeds INTEGER NOT NULL DEFAULT 0,
                total_plays INTEGER NOT NULL DEFAULT 0,
                total_baths INTEGER NOT NULL DEFAULT 0,
                last_fed INTEGER,
                last_played INTEGER,
                last_bathed INTEGER,
                last_slept INTEGER,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )
        "#,
        )
        .execute(&self.pool)
        .await?;

        // Append-only mood samples
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS mood_history (
                id TEXT PRIMARY KEY,
                pet_id TEXT NOT NULL REFERENCES pets(id) ON DELETE CASCADE,
                mood TEXT NOT NULL,
                happiness INTEGER NOT NULL,
                hunger INTEGER NOT NULL,
                energy INTEGER NOT NULL,
                cleanliness INTEGER NOT NULL,
                recorded_at INTEGER NOT NULL
            )
        "#,
        )
        .execute(&self.pool)
        .await?;

        // One row per pet x achievement; the unique pair is the duplicate
        // unlock guard
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS unlocked_achievements (
                id TEXT PRIMARY KEY,
                pet_id TEXT NOT NULL REFERENCES pets(id) ON DELETE CASCADE,
                achievement_id TEXT NOT NULL,
                achievement_category TEXT NOT NULL,
                achieved_at INTEGER NOT NULL,
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

        info!("SQLite schema initialized successfully");
        Ok(())
    }
}

#[async_trait]
impl PetStore for SqliteAdapter {
    async fn pet_exists(&self, pet_id: UUID) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM pets WHERE id = ?")
            .bind(pet_id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    async fn ensure_pet(&self, pet: &Pet) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO pets (id, name, species, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (id) DO UPDATE SET
                name = excluded.name,
                species = excluded.species
            "#,
        )
        .bind(pet.id.to_string())
        .bind(&pet.name)
        .bind(&pet.species)
        .bind(pet.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_stats(&self, pet_id: UUID) -> Result<Option<PetStats>> {
        let row = sqlx::query("SELECT * FROM pet_stats WHERE pet_id = ?")
            .bind(pet_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| stats_from_row(&r)).transpose()
    }

    async fn get_or_create_stats(&self, pet_id: UUID) -> Result<PetStats> {
        let now = chrono::Utc::now().timestamp();
        let defaults = PetStats::with_defaults(pet_id, now);

        // A concurrent duplicate create loses the insert and re-reads the
        // winner's row below.
        sqlx::query(
            r#"
            INSERT INTO pet_stats (
                pet_id, happiness, hunger, energy, cleanliness, health,
                affection_level, current_mood, total_pats, total_feeds,
                total_plays, total_baths, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0, 0, 0, 0, ?, ?)
            ON CONFLICT (pet_id) DO NOTHING
            "#,
        )
        .bind(pet_id.to_string())
        .bind(defaults.happiness as i64)
        .bind(defaults.hunger as i64)
        .bind(defaults.energy as i64)
        .bind(defaults.cleanliness as i64)
        .bind(defaults.health as i64)
        .bind(defaults.affection_level as i64)
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
            r#"
            INSERT INTO pet_stats (
                pet_id, happiness, hunger, energy, cleanliness, health,
                affection_level, current_mood, total_pats, total_feeds,
                total_plays, total_baths, last_fed, last_played,
                last_bathed, last_slept, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (pet_id) DO UPDATE SET
                happiness = excluded.happiness,
                hunger = excluded.hunger,
                energy = excluded.energy,
                cleanliness = excluded.cleanliness,
                health = excluded.health,
                affection_level = excluded.affection_level,
                current_mood = excluded.current_mood,
                total_pats = excluded.total_pats,
                total_feeds = excluded.total_feeds,
                total_plays = excluded.total_plays,
                total_baths = excluded.total_baths,
                last_fed = excluded.last_fed,
                last_played = excluded.last_played,
                last_bathed = excluded.last_bathed,
                last_slept = excluded.last_slept,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(stats.pet_id.to_string())
        .bind(stats.happiness as i64)
        .bind(stats.hunger as i64)
        .bind(stats.energy as i64)
        .bind(stats.cleanliness as i64)
        .bind(stats.health as i64)
        .bind(stats.affection_level as i64)
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
            r#"
            INSERT INTO mood_history (
                id, pet_id, mood, happiness, hunger, energy, cleanliness, recorded_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(entry.id.to_string())
        .bind(entry.pet_id.to_string())
        .bind(entry.mood.as_str())
        .bind(entry.happiness as i64)
        .bind(entry.hunger as i64)
        .bind(entry.energy as i64)
        .bind(entry.cleanliness as i64)
        .bind(entry.recorded_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn mood_history(&self, pet_id: UUID, limit: usize) -> Result<Vec<MoodHistoryEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, pet_id, mood, happiness, hunger, energy, cleanliness, recorded_at
            FROM mood_history
            WHERE pet_id = ?
            ORDER BY recorded_at DESC
            LIMIT ?
            "#,
        )
        .bind(pet_id.to_string())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let id: String = row.get("id");
                let row_pet_id: String = row.get("pet_id");
                let mood: String = row.get("mood");
                Ok(MoodHistoryEntry {
                    id: parse_uuid(&id)?,
                    pet_id: parse_uuid(&row_pet_id)?,
                    mood: mood.parse::<MoodLabel>()?,
                    happiness: row.get::<i64, _>("happiness") as i32,
                    hunger: row.get::<i64, _>("hunger") as i32,
                    energy: row.get::<i64, _>("energy") as i32,
                    cleanliness: row.get::<i64, _>("cleanliness") as i32,
                    recorded_at: row.get("recorded_at"),
                })
            })
            .collect()
    }

    async fn unlocked_achievement_ids(&self, pet_id: UUID) -> Result<HashSet<String>> {
        let rows = sqlx::query(
            "SELECT achievement_id FROM unlocked_achievements WHERE pet_id = ?",
        )
        .bind(pet_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| row.get::<String, _>("achievement_id"))
            .collect())
    }

    async fn unlocked_achievements(&self, pet_id: UUID) -> Result<Vec<UnlockedAchievement>> {
        let rows = sqlx::query(
            r#"
            SELECT id, pet_id, achievement_id, achievement_category, achieved_at
            FROM unlocked_achievements
            WHERE pet_id = ?
            ORDER BY achieved_at ASC
            "#,
        )
        .bind(pet_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let id: String = row.get("id");
                let row_pet_id: String = row.get("pet_id");
                Ok(UnlockedAchievement {
                    id: parse_uuid(&id)?,
                    pet_id: parse_uuid(&row_pet_id)?,
                    achievement_id: row.get("achievement_id"),
                    achievement_category: row.get("achievement_category"),
                    achieved_at: row.get("achieved_at"),
                })
            })
            .collect()
    }

    async fn insert_unlocked(&self, unlock: &UnlockedAchievement) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO unlocked_achievements (
                id, pet_id, achievement_id, achievement_category, achieved_at
            )
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (pet_id, achievement_id) DO NOTHING
            "#,
        )
        .bind(unlock.id.to_string())
        .bind(unlock.pet_id.to_string())
        .bind(&unlock.achievement_id)
        .bind(&unlock.achievement_category)
        .bind(unlock.achieved_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
