//! Testimonials backed by the `testimonials` table.

use crate::db_err;
use async_trait::async_trait;
use lumen_core::ids::{PhotographerId, ReviewId, TestimonialId, UserId};
use lumen_core::model::Testimonial;
use lumen_core::repository::TestimonialRepository;
use lumen_core::{Result, StudioError};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// `PostgreSQL`-backed [`TestimonialRepository`].
pub struct PgTestimonialRepository {
    pool: PgPool,
}

impl PgTestimonialRepository {
    /// Create the repository over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_testimonial(row: &PgRow) -> Result<Testimonial> {
        Ok(Testimonial {
            id: TestimonialId(row.try_get::<Uuid, _>("id").map_err(db_err)?),
            client_id: UserId(row.try_get::<Uuid, _>("client_id").map_err(db_err)?),
            photographer_id: PhotographerId(
                row.try_get::<Uuid, _>("photographer_id").map_err(db_err)?,
            ),
            review_id: ReviewId(row.try_get::<Uuid, _>("review_id").map_err(db_err)?),
            title: row.try_get("title").map_err(db_err)?,
            content: row.try_get("content").map_err(db_err)?,
            rating: row.try_get("rating").map_err(db_err)?,
            is_active: row.try_get("is_active").map_err(db_err)?,
            is_featured: row.try_get("is_featured").map_err(db_err)?,
            approved_by: row
                .try_get::<Option<Uuid>, _>("approved_by")
                .map_err(db_err)?
                .map(UserId),
            approved_at: row.try_get("approved_at").map_err(db_err)?,
            created_at: row.try_get("created_at").map_err(db_err)?,
            updated_at: row.try_get("updated_at").map_err(db_err)?,
        })
    }
}

const COLUMNS: &str = "id, client_id, photographer_id, review_id, title, content, rating, \
     is_active, is_featured, approved_by, approved_at, created_at, updated_at";

#[async_trait]
impl TestimonialRepository for PgTestimonialRepository {
    async fn create(&self, testimonial: &Testimonial) -> Result<Testimonial> {
        sqlx::query(
            r"
            INSERT INTO testimonials (
                id, client_id, photographer_id, review_id, title, content,
                rating, is_active, is_featured, approved_by, approved_at,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ",
        )
        .bind(testimonial.id.0)
        .bind(testimonial.client_id.0)
        .bind(testimonial.photographer_id.0)
        .bind(testimonial.review_id.0)
        .bind(&testimonial.title)
        .bind(&testimonial.content)
        .bind(testimonial.rating)
        .bind(testimonial.is_active)
        .bind(testimonial.is_featured)
        .bind(testimonial.approved_by.map(|id| id.0))
        .bind(testimonial.approved_at)
        .bind(testimonial.created_at)
        .bind(testimonial.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(testimonial.clone())
    }

    async fn get(&self, id: TestimonialId) -> Result<Testimonial> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM testimonials WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?
        .ok_or(StudioError::NotFound("Testimonial"))?;
        Self::row_to_testimonial(&row)
    }

    async fn list(&self) -> Result<Vec<Testimonial>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM testimonials ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.iter().map(Self::row_to_testimonial).collect()
    }

    async fn find_by_review(&self, review_id: ReviewId) -> Result<Option<Testimonial>> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM testimonials WHERE review_id = $1"
        ))
        .bind(review_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.as_ref().map(Self::row_to_testimonial).transpose()
    }

    async fn update(&self, testimonial: &Testimonial) -> Result<Testimonial> {
        let result = sqlx::query(
            r"
            UPDATE testimonials SET
                title = $2, content = $3, rating = $4, is_active = $5,
                is_featured = $6, approved_by = $7, approved_at = $8,
                updated_at = $9
            WHERE id = $1
            ",
        )
        .bind(testimonial.id.0)
        .bind(&testimonial.title)
        .bind(&testimonial.content)
        .bind(testimonial.rating)
        .bind(testimonial.is_active)
        .bind(testimonial.is_featured)
        .bind(testimonial.approved_by.map(|id| id.0))
        .bind(testimonial.approved_at)
        .bind(testimonial.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(StudioError::NotFound("Testimonial"));
        }
        Ok(testimonial.clone())
    }

    async fn delete(&self, id: TestimonialId) -> Result<()> {
        let result = sqlx::query("DELETE FROM testimonials WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(StudioError::NotFound("Testimonial"));
        }
        Ok(())
    }
}
