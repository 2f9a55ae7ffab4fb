//! Site settings stored as a singleton JSONB row.

use crate::{db_err, from_json, to_json};
use async_trait::async_trait;
use chrono::Utc;
use lumen_core::Result;
use lumen_core::model::Settings;
use lumen_core::repository::SettingsRepository;
use sqlx::{PgPool, Row};

/// `PostgreSQL`-backed [`SettingsRepository`].
///
/// The table holds at most one row; `load` creates it with defaults on
/// first read.
pub struct PgSettingsRepository {
    pool: PgPool,
}

impl PgSettingsRepository {
    /// Create the repository over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for PgSettingsRepository {
    async fn load(&self) -> Result<Settings> {
        let row = sqlx::query("SELECT data FROM settings WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        match row {
            Some(row) => from_json(row.try_get("data").map_err(db_err)?),
            None => {
                let defaults = Settings::default();
                self.save(&defaults).await
            }
        }
    }

    async fn save(&self, settings: &Settings) -> Result<Settings> {
        sqlx::query(
            r"
            INSERT INTO settings (id, data, updated_at)
            VALUES (1, $1, $2)
            ON CONFLICT (id) DO UPDATE SET data = $1, updated_at = $2
            ",
        )
        .bind(to_json(settings)?)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(settings.clone())
    }
}
