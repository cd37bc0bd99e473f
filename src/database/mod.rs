// ABOUTME: SQLite persistence for profiles and stagnation events behind the ProfileStore trait
// ABOUTME: Pool setup, schema migration on startup and the async store interface used by services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! The service layer talks to persistence only through [`ProfileStore`].
//! [`Database`] is the `SQLite` implementation: it owns the pool and creates
//! its schema on startup. Multi-row writes (a check-in together with the
//! stagnation event it produced, or an accepted adjustment together with the
//! profile it changes) run inside one transaction.

mod profiles;
mod stagnation_events;

use crate::errors::AppResult;
use crate::models::{Profile, StagnationEvent};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

/// Persistence interface consumed by the profile service
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Insert a new profile
    async fn create_profile(&self, profile: &mut Profile) -> AppResult<()>;

    /// Load a profile by id
    async fn get_profile(&self, id: Uuid) -> AppResult<Option<Profile>>;

    /// Persist every mutable field of a profile
    ///
    /// The weight log column is rewritten only when the log is dirty; it is
    /// marked clean afterwards.
    async fn save_profile(&self, profile: &mut Profile) -> AppResult<()>;

    /// Insert a stagnation event
    async fn create_stagnation_event(&self, event: &StagnationEvent) -> AppResult<()>;

    /// Load a stagnation event by id
    async fn get_stagnation_event(&self, id: Uuid) -> AppResult<Option<StagnationEvent>>;

    /// Persist an event's status and resolution time
    async fn save_stagnation_event(&self, event: &StagnationEvent) -> AppResult<()>;

    /// Mark every pending event of a profile superseded, returning how many changed
    async fn supersede_pending_events(&self, profile_id: Uuid) -> AppResult<u64>;

    /// Events of a profile, newest first
    async fn list_stagnation_events(&self, profile_id: Uuid) -> AppResult<Vec<StagnationEvent>>;

    /// Persist a check-in and, when one was detected, supersede older pending
    /// events and insert the new one, atomically
    async fn save_checkin(
        &self,
        profile: &mut Profile,
        detected: Option<&StagnationEvent>,
    ) -> AppResult<()>;

    /// Persist a resolved event and the profile it was resolved against, atomically
    async fn save_resolution(
        &self,
        profile: &mut Profile,
        event: &StagnationEvent,
    ) -> AppResult<()>;
}

/// `SQLite`-backed profile store
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open a connection pool and run migrations
    ///
    /// In-memory URLs get a single long-lived connection so every query sees
    /// the same database.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the connection fails or a migration fails
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new().connect_with(options).await?
        };

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_profiles().await?;
        self.migrate_stagnation_events().await?;
        info!("Database schema ready");
        Ok(())
    }

    /// Round-trip a trivial query; used by the readiness probe
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be reached
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for Database {
    async fn create_profile(&self, profile: &mut Profile) -> AppResult<()> {
        self.insert_profile(profile).await
    }

    async fn get_profile(&self, id: Uuid) -> AppResult<Option<Profile>> {
        self.fetch_profile(id).await
    }

    async fn save_profile(&self, profile: &mut Profile) -> AppResult<()> {
        let mut conn = self.pool.acquire().await?;
        profiles::write_profile(&mut conn, profile).await
    }

    async fn create_stagnation_event(&self, event: &StagnationEvent) -> AppResult<()> {
        let mut conn = self.pool.acquire().await?;
        stagnation_events::insert_event(&mut conn, event).await
    }

    async fn get_stagnation_event(&self, id: Uuid) -> AppResult<Option<StagnationEvent>> {
        self.fetch_stagnation_event(id).await
    }

    async fn save_stagnation_event(&self, event: &StagnationEvent) -> AppResult<()> {
        let mut conn = self.pool.acquire().await?;
        stagnation_events::write_event_status(&mut conn, event).await
    }

    async fn supersede_pending_events(&self, profile_id: Uuid) -> AppResult<u64> {
        let mut conn = self.pool.acquire().await?;
        stagnation_events::supersede_pending(&mut conn, profile_id).await
    }

    async fn list_stagnation_events(&self, profile_id: Uuid) -> AppResult<Vec<StagnationEvent>> {
        self.fetch_stagnation_events(profile_id).await
    }

    async fn save_checkin(
        &self,
        profile: &mut Profile,
        detected: Option<&StagnationEvent>,
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        if let Some(event) = detected {
            stagnation_events::supersede_pending(&mut tx, profile.id).await?;
            stagnation_events::insert_event(&mut tx, event).await?;
        }
        profiles::write_profile(&mut tx, profile).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn save_resolution(
        &self,
        profile: &mut Profile,
        event: &StagnationEvent,
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        stagnation_events::write_event_status(&mut tx, event).await?;
        profiles::write_profile(&mut tx, profile).await?;
        tx.commit().await?;
        Ok(())
    }
}
