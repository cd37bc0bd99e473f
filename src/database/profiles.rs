// ABOUTME: Profile table schema and queries
// ABOUTME: Insert, load and dirty-aware save of profiles including the serialized weight log

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{Profile, Sex, WeightLog};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use std::time::Instant;
use uuid::Uuid;

impl Database {
    /// Create the profiles table
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_profiles(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS profiles (
                id TEXT PRIMARY KEY,
                weight REAL NOT NULL CHECK (weight > 0),
                height REAL NOT NULL CHECK (height > 0),
                age INTEGER NOT NULL CHECK (age > 0),
                target_weight REAL NOT NULL CHECK (target_weight > 0),
                sex TEXT NOT NULL,
                activity_level TEXT NOT NULL,
                bmr INTEGER NOT NULL DEFAULT -1,
                base_calorie_intake INTEGER NOT NULL DEFAULT -1,
                calorie_intake INTEGER NOT NULL DEFAULT -1,
                weight_check TEXT NOT NULL DEFAULT '[]',
                created_at DATETIME NOT NULL,
                updated_at DATETIME NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub(super) async fn insert_profile(&self, profile: &mut Profile) -> AppResult<()> {
        let start = Instant::now();
        sqlx::query(
            r"
            INSERT INTO profiles (
                id, weight, height, age, target_weight, sex, activity_level,
                bmr, base_calorie_intake, calorie_intake, weight_check, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ",
        )
        .bind(profile.id.to_string())
        .bind(profile.weight)
        .bind(profile.height)
        .bind(i64::from(profile.age))
        .bind(profile.target_weight)
        .bind(profile.sex.as_str())
        .bind(&profile.activity_level)
        .bind(profile.bmr)
        .bind(profile.base_calorie_intake)
        .bind(profile.calorie_intake)
        .bind(profile.weight_check.to_json()?)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await?;

        profile.weight_check.mark_clean();
        AppLogger::log_database_operation("insert", "profiles", true, elapsed_ms(start));
        Ok(())
    }

    pub(super) async fn fetch_profile(&self, id: Uuid) -> AppResult<Option<Profile>> {
        let row = sqlx::query(
            r"
            SELECT id, weight, height, age, target_weight, sex, activity_level,
                   bmr, base_calorie_intake, calorie_intake, weight_check, created_at, updated_at
            FROM profiles WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_profile).transpose()
    }
}

/// Update a profile's mutable columns on any connection or transaction
pub(super) async fn write_profile(
    conn: &mut SqliteConnection,
    profile: &mut Profile,
) -> AppResult<()> {
    let start = Instant::now();
    profile.updated_at = Utc::now();

    let result = if profile.weight_check.is_dirty() {
        sqlx::query(
            r"
            UPDATE profiles SET
                weight = $2, height = $3, age = $4, target_weight = $5, activity_level = $6,
                bmr = $7, base_calorie_intake = $8, calorie_intake = $9,
                updated_at = $10, weight_check = $11
            WHERE id = $1
            ",
        )
        .bind(profile.id.to_string())
        .bind(profile.weight)
        .bind(profile.height)
        .bind(i64::from(profile.age))
        .bind(profile.target_weight)
        .bind(&profile.activity_level)
        .bind(profile.bmr)
        .bind(profile.base_calorie_intake)
        .bind(profile.calorie_intake)
        .bind(profile.updated_at)
        .bind(profile.weight_check.to_json()?)
        .execute(&mut *conn)
        .await?
    } else {
        sqlx::query(
            r"
            UPDATE profiles SET
                weight = $2, height = $3, age = $4, target_weight = $5, activity_level = $6,
                bmr = $7, base_calorie_intake = $8, calorie_intake = $9,
                updated_at = $10
            WHERE id = $1
            ",
        )
        .bind(profile.id.to_string())
        .bind(profile.weight)
        .bind(profile.height)
        .bind(i64::from(profile.age))
        .bind(profile.target_weight)
        .bind(&profile.activity_level)
        .bind(profile.bmr)
        .bind(profile.base_calorie_intake)
        .bind(profile.calorie_intake)
        .bind(profile.updated_at)
        .execute(&mut *conn)
        .await?
    };

    if result.rows_affected() == 0 {
        return Err(AppError::not_found(format!("Profile {}", profile.id)));
    }

    profile.weight_check.mark_clean();
    AppLogger::log_database_operation("update", "profiles", true, elapsed_ms(start));
    Ok(())
}

fn row_to_profile(row: &SqliteRow) -> AppResult<Profile> {
    let id: String = row.try_get("id")?;
    let age: i64 = row.try_get("age")?;
    let sex: String = row.try_get("sex")?;
    let weight_check: String = row.try_get("weight_check")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at")?;

    Ok(Profile {
        id: Uuid::parse_str(&id)
            .map_err(|e| AppError::storage(format!("Invalid profile id '{id}': {e}")))?,
        weight: row.try_get("weight")?,
        height: row.try_get("height")?,
        age: u32::try_from(age)
            .map_err(|_| AppError::storage(format!("Invalid stored age {age}")))?,
        target_weight: row.try_get("target_weight")?,
        sex: Sex::from_str_lossy(&sex),
        activity_level: row.try_get("activity_level")?,
        bmr: row.try_get("bmr")?,
        base_calorie_intake: row.try_get("base_calorie_intake")?,
        calorie_intake: row.try_get("calorie_intake")?,
        weight_check: WeightLog::from_json(&weight_check)?,
        created_at,
        updated_at,
    })
}

pub(super) fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
