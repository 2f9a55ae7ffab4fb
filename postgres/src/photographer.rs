//! Photographer profiles backed by the `photographers` table.
//!
//! The profile is an aggregate: portfolio, pricing and availability
//! live in JSONB columns and are replaced wholesale on update, which
//! keeps this store interchangeable with the in-memory one.

use crate::{db_err, from_json, to_json};
use async_trait::async_trait;
use lumen_core::ids::{PhotographerId, UserId};
use lumen_core::model::Photographer;
use lumen_core::repository::PhotographerRepository;
use lumen_core::{Result, StudioError};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// `PostgreSQL`-backed [`PhotographerRepository`].
pub struct PgPhotographerRepository {
    pool: PgPool,
}

impl PgPhotographerRepository {
    /// Create the repository over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_photographer(row: &PgRow) -> Result<Photographer> {
        Ok(Photographer {
            id: PhotographerId(row.try_get::<Uuid, _>("id").map_err(db_err)?),
            user_id: UserId(row.try_get::<Uuid, _>("user_id").map_err(db_err)?),
            specialization: row.try_get("specialization").map_err(db_err)?,
            services: from_json(row.try_get("services").map_err(db_err)?)?,
            description: row.try_get("description").map_err(db_err)?,
            experience: row.try_get("experience").map_err(db_err)?,
            portfolio: from_json(row.try_get("portfolio").map_err(db_err)?)?,
            pricing: from_json(row.try_get("pricing").map_err(db_err)?)?,
            availability: from_json(row.try_get("availability").map_err(db_err)?)?,
            rating: row.try_get("rating").map_err(db_err)?,
            review_count: row.try_get("review_count").map_err(db_err)?,
            featured: row.try_get("featured").map_err(db_err)?,
            created_at: row.try_get("created_at").map_err(db_err)?,
        })
    }
}

const COLUMNS: &str = "id, user_id, specialization, services, description, experience, \
     portfolio, pricing, availability, rating, review_count, featured, created_at";

#[async_trait]
impl PhotographerRepository for PgPhotographerRepository {
    async fn create(&self, photographer: &Photographer) -> Result<Photographer> {
        sqlx::query(
            r"
            INSERT INTO photographers (
                id, user_id, specialization, services, description, experience,
                portfolio, pricing, availability, rating, review_count, featured,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ",
        )
        .bind(photographer.id.0)
        .bind(photographer.user_id.0)
        .bind(&photographer.specialization)
        .bind(to_json(&photographer.services)?)
        .bind(&photographer.description)
        .bind(photographer.experience)
        .bind(to_json(&photographer.portfolio)?)
        .bind(to_json(&photographer.pricing)?)
        .bind(to_json(&photographer.availability)?)
        .bind(photographer.rating)
        .bind(photographer.review_count)
        .bind(photographer.featured)
        .bind(photographer.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(photographer.clone())
    }

    async fn get(&self, id: PhotographerId) -> Result<Photographer> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM photographers WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?
        .ok_or(StudioError::NotFound("Photographer"))?;
        Self::row_to_photographer(&row)
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Option<Photographer>> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM photographers WHERE user_id = $1"
        ))
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.as_ref().map(Self::row_to_photographer).transpose()
    }

    async fn list(&self) -> Result<Vec<Photographer>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM photographers ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.iter().map(Self::row_to_photographer).collect()
    }

    async fn update(&self, photographer: &Photographer) -> Result<Photographer> {
        let result = sqlx::query(
            r"
            UPDATE photographers SET
                specialization = $2, services = $3, description = $4,
                experience = $5, portfolio = $6, pricing = $7,
                availability = $8, rating = $9, review_count = $10,
                featured = $11
            WHERE id = $1
            ",
        )
        .bind(photographer.id.0)
        .bind(&photographer.specialization)
        .bind(to_json(&photographer.services)?)
        .bind(&photographer.description)
        .bind(photographer.experience)
        .bind(to_json(&photographer.portfolio)?)
        .bind(to_json(&photographer.pricing)?)
        .bind(to_json(&photographer.availability)?)
        .bind(photographer.rating)
        .bind(photographer.review_count)
        .bind(photographer.featured)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(StudioError::NotFound("Photographer"));
        }
        Ok(photographer.clone())
    }

    async fn delete(&self, id: PhotographerId) -> Result<()> {
        let result = sqlx::query("DELETE FROM photographers WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(StudioError::NotFound("Photographer"));
        }
        Ok(())
    }
}
