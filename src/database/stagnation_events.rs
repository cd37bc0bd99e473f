// ABOUTME: Stagnation event table schema and queries
// ABOUTME: Insert, load, status updates and superseding of pending adjustment proposals

use super::profiles::elapsed_ms;
use super::Database;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{AdjustmentDirection, StagnationEvent, StagnationStatus};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use std::time::Instant;
use uuid::Uuid;

const EVENT_COLUMNS: &str = "id, profile_id, direction, checkin_count, latest_weight, \
     anchor_weight, baseline_intake, proposed_intake, status, detected_at, resolved_at";

impl Database {
    /// Create the stagnation events table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_stagnation_events(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS stagnation_events (
                id TEXT PRIMARY KEY,
                profile_id TEXT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
                direction TEXT NOT NULL CHECK (direction IN ('increase', 'decrease')),
                checkin_count INTEGER NOT NULL,
                latest_weight REAL NOT NULL,
                anchor_weight REAL NOT NULL,
                baseline_intake INTEGER NOT NULL,
                proposed_intake INTEGER NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending'
                    CHECK (status IN ('pending', 'applied', 'declined', 'superseded')),
                detected_at DATETIME NOT NULL,
                resolved_at DATETIME
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_stagnation_events_profile_status ON stagnation_events(profile_id, status)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub(super) async fn fetch_stagnation_event(
        &self,
        id: Uuid,
    ) -> AppResult<Option<StagnationEvent>> {
        let row = sqlx::query(&format!(
            "SELECT {EVENT_COLUMNS} FROM stagnation_events WHERE id = $1"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_event).transpose()
    }

    pub(super) async fn fetch_stagnation_events(
        &self,
        profile_id: Uuid,
    ) -> AppResult<Vec<StagnationEvent>> {
        let rows = sqlx::query(&format!(
            "SELECT {EVENT_COLUMNS} FROM stagnation_events WHERE profile_id = $1 \
             ORDER BY detected_at DESC, checkin_count DESC"
        ))
        .bind(profile_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_event).collect()
    }
}

pub(super) async fn insert_event(
    conn: &mut SqliteConnection,
    event: &StagnationEvent,
) -> AppResult<()> {
    let start = Instant::now();
    let checkin_count = i64::try_from(event.checkin_count)
        .map_err(|_| AppError::invalid_input("check-in count exceeds storage range"))?;

    sqlx::query(&format!(
        "INSERT INTO stagnation_events ({EVENT_COLUMNS}) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)"
    ))
    .bind(event.id.to_string())
    .bind(event.profile_id.to_string())
    .bind(event.direction.as_str())
    .bind(checkin_count)
    .bind(event.latest_weight)
    .bind(event.anchor_weight)
    .bind(event.baseline_intake)
    .bind(event.proposed_intake)
    .bind(event.status.as_str())
    .bind(event.detected_at)
    .bind(event.resolved_at)
    .execute(&mut *conn)
    .await?;

    AppLogger::log_database_operation("insert", "stagnation_events", true, elapsed_ms(start));
    Ok(())
}

pub(super) async fn write_event_status(
    conn: &mut SqliteConnection,
    event: &StagnationEvent,
) -> AppResult<()> {
    let result =
        sqlx::query("UPDATE stagnation_events SET status = $2, resolved_at = $3 WHERE id = $1")
            .bind(event.id.to_string())
            .bind(event.status.as_str())
            .bind(event.resolved_at)
            .execute(&mut *conn)
            .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found(format!("Stagnation event {}", event.id)));
    }
    Ok(())
}

pub(super) async fn supersede_pending(
    conn: &mut SqliteConnection,
    profile_id: Uuid,
) -> AppResult<u64> {
    let result = sqlx::query(
        "UPDATE stagnation_events SET status = $2, resolved_at = $3 \
         WHERE profile_id = $1 AND status = $4",
    )
    .bind(profile_id.to_string())
    .bind(StagnationStatus::Superseded.as_str())
    .bind(Utc::now())
    .bind(StagnationStatus::Pending.as_str())
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected())
}

fn row_to_event(row: &SqliteRow) -> AppResult<StagnationEvent> {
    let id: String = row.try_get("id")?;
    let profile_id: String = row.try_get("profile_id")?;
    let direction: String = row.try_get("direction")?;
    let status: String = row.try_get("status")?;
    let checkin_count: i64 = row.try_get("checkin_count")?;
    let detected_at: DateTime<Utc> = row.try_get("detected_at")?;
    let resolved_at: Option<DateTime<Utc>> = row.try_get("resolved_at")?;

    Ok(StagnationEvent {
        id: parse_uuid(&id)?,
        profile_id: parse_uuid(&profile_id)?,
        direction: AdjustmentDirection::parse(&direction).ok_or_else(|| {
            AppError::storage(format!("Invalid stored direction '{direction}'"))
        })?,
        checkin_count: usize::try_from(checkin_count).map_err(|_| {
            AppError::storage(format!("Invalid stored check-in count {checkin_count}"))
        })?,
        latest_weight: row.try_get("latest_weight")?,
        anchor_weight: row.try_get("anchor_weight")?,
        baseline_intake: row.try_get("baseline_intake")?,
        proposed_intake: row.try_get("proposed_intake")?,
        status: StagnationStatus::parse(&status)
            .ok_or_else(|| AppError::storage(format!("Invalid stored status '{status}'")))?,
        detected_at,
        resolved_at,
    })
}

fn parse_uuid(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| AppError::storage(format!("Invalid stored id '{raw}': {e}")))
}
