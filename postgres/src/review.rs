//! Reviews backed by the `reviews` table.

use crate::db_err;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lumen_core::ids::{BookingId, PhotographerId, ReviewId, UserId};
use lumen_core::model::{PhotographerResponse, Review};
use lumen_core::repository::ReviewRepository;
use lumen_core::{Result, StudioError};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// `PostgreSQL`-backed [`ReviewRepository`].
pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    /// Create the repository over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_review(row: &PgRow) -> Result<Review> {
        let response_message: Option<String> =
            row.try_get("response_message").map_err(db_err)?;
        let response_at: Option<DateTime<Utc>> = row.try_get("response_at").map_err(db_err)?;
        let photographer_response = match (response_message, response_at) {
            (Some(message), Some(responded_at)) => Some(PhotographerResponse {
                message,
                responded_at,
            }),
            _ => None,
        };
        Ok(Review {
            id: ReviewId(row.try_get::<Uuid, _>("id").map_err(db_err)?),
            client_id: UserId(row.try_get::<Uuid, _>("client_id").map_err(db_err)?),
            photographer_id: PhotographerId(
                row.try_get::<Uuid, _>("photographer_id").map_err(db_err)?,
            ),
            booking_id: row
                .try_get::<Option<Uuid>, _>("booking_id")
                .map_err(db_err)?
                .map(BookingId),
            rating: row.try_get("rating").map_err(db_err)?,
            title: row.try_get("title").map_err(db_err)?,
            comment: row.try_get("comment").map_err(db_err)?,
            service_type: row.try_get("service_type").map_err(db_err)?,
            helpful_votes: row.try_get("helpful_votes").map_err(db_err)?,
            is_verified: row.try_get("is_verified").map_err(db_err)?,
            photographer_response,
            created_at: row.try_get("created_at").map_err(db_err)?,
            updated_at: row.try_get("updated_at").map_err(db_err)?,
        })
    }

    async fn fetch_where(&self, clause: &str, id: Uuid) -> Result<Vec<Review>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM reviews WHERE {clause} = $1 ORDER BY created_at DESC"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.iter().map(Self::row_to_review).collect()
    }
}

const COLUMNS: &str = "id, client_id, photographer_id, booking_id, rating, title, comment, \
     service_type, helpful_votes, is_verified, response_message, response_at, \
     created_at, updated_at";

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn create(&self, review: &Review) -> Result<Review> {
        sqlx::query(
            r"
            INSERT INTO reviews (
                id, client_id, photographer_id, booking_id, rating, title,
                comment, service_type, helpful_votes, is_verified,
                response_message, response_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ",
        )
        .bind(review.id.0)
        .bind(review.client_id.0)
        .bind(review.photographer_id.0)
        .bind(review.booking_id.map(|id| id.0))
        .bind(review.rating)
        .bind(&review.title)
        .bind(&review.comment)
        .bind(&review.service_type)
        .bind(review.helpful_votes)
        .bind(review.is_verified)
        .bind(review.photographer_response.as_ref().map(|r| r.message.clone()))
        .bind(review.photographer_response.as_ref().map(|r| r.responded_at))
        .bind(review.created_at)
        .bind(review.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(review.clone())
    }

    async fn get(&self, id: ReviewId) -> Result<Review> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM reviews WHERE id = $1"))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?
            .ok_or(StudioError::NotFound("Review"))?;
        Self::row_to_review(&row)
    }

    async fn list(&self) -> Result<Vec<Review>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM reviews ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.iter().map(Self::row_to_review).collect()
    }

    async fn list_by_photographer(&self, photographer_id: PhotographerId) -> Result<Vec<Review>> {
        self.fetch_where("photographer_id", photographer_id.0).await
    }

    async fn list_by_client(&self, client_id: UserId) -> Result<Vec<Review>> {
        self.fetch_where("client_id", client_id.0).await
    }

    async fn find_by_booking(&self, booking_id: BookingId) -> Result<Option<Review>> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM reviews WHERE booking_id = $1"
        ))
        .bind(booking_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.as_ref().map(Self::row_to_review).transpose()
    }

    async fn update(&self, review: &Review) -> Result<Review> {
        let result = sqlx::query(
            r"
            UPDATE reviews SET
                rating = $2, title = $3, comment = $4, service_type = $5,
                helpful_votes = $6, is_verified = $7, response_message = $8,
                response_at = $9, updated_at = $10
            WHERE id = $1
            ",
        )
        .bind(review.id.0)
        .bind(review.rating)
        .bind(&review.title)
        .bind(&review.comment)
        .bind(&review.service_type)
        .bind(review.helpful_votes)
        .bind(review.is_verified)
        .bind(review.photographer_response.as_ref().map(|r| r.message.clone()))
        .bind(review.photographer_response.as_ref().map(|r| r.responded_at))
        .bind(review.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(StudioError::NotFound("Review"));
        }
        Ok(review.clone())
    }

    async fn delete(&self, id: ReviewId) -> Result<()> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(StudioError::NotFound("Review"));
        }
        Ok(())
    }

    async fn delete_by_client(&self, client_id: UserId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM reviews WHERE client_id = $1")
            .bind(client_id.0)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected())
    }

    async fn delete_by_photographer(&self, photographer_id: PhotographerId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM reviews WHERE photographer_id = $1")
            .bind(photographer_id.0)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected())
    }
}
