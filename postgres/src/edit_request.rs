//! Photo edit requests backed by the `photo_edit_requests` table.
//!
//! Photo metadata lists are JSONB, same policy as the photographer
//! aggregate.

use crate::{db_err, from_json, parse_with, to_json};
use async_trait::async_trait;
use lumen_core::ids::{EditRequestId, PhotographerId, UserId};
use lumen_core::model::{EditPriority, EditRequestStatus, PaymentStatus, PhotoEditRequest};
use lumen_core::repository::EditRequestRepository;
use lumen_core::{Result, StudioError};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// `PostgreSQL`-backed [`EditRequestRepository`].
pub struct PgEditRequestRepository {
    pool: PgPool,
}

impl PgEditRequestRepository {
    /// Create the repository over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_request(row: &PgRow) -> Result<PhotoEditRequest> {
        let status: String = row.try_get("status").map_err(db_err)?;
        let priority: String = row.try_get("priority").map_err(db_err)?;
        let payment_status: String = row.try_get("payment_status").map_err(db_err)?;
        Ok(PhotoEditRequest {
            id: EditRequestId(row.try_get::<Uuid, _>("id").map_err(db_err)?),
            client_id: UserId(row.try_get::<Uuid, _>("client_id").map_err(db_err)?),
            photographer_id: row
                .try_get::<Option<Uuid>, _>("photographer_id")
                .map_err(db_err)?
                .map(PhotographerId),
            assigned_by: row
                .try_get::<Option<Uuid>, _>("assigned_by")
                .map_err(db_err)?
                .map(UserId),
            title: row.try_get("title").map_err(db_err)?,
            description: row.try_get("description").map_err(db_err)?,
            original_photos: from_json(row.try_get("original_photos").map_err(db_err)?)?,
            edited_photos: from_json(row.try_get("edited_photos").map_err(db_err)?)?,
            status: parse_with(status.parse::<EditRequestStatus>())?,
            priority: parse_with(priority.parse::<EditPriority>())?,
            estimated_cost: row.try_get("estimated_cost").map_err(db_err)?,
            final_cost: row.try_get("final_cost").map_err(db_err)?,
            deadline: row.try_get("deadline").map_err(db_err)?,
            client_notes: row.try_get("client_notes").map_err(db_err)?,
            photographer_notes: row.try_get("photographer_notes").map_err(db_err)?,
            admin_notes: row.try_get("admin_notes").map_err(db_err)?,
            completed_at: row.try_get("completed_at").map_err(db_err)?,
            delivered_at: row.try_get("delivered_at").map_err(db_err)?,
            payment_status: parse_with(payment_status.parse::<PaymentStatus>())?,
            created_at: row.try_get("created_at").map_err(db_err)?,
            updated_at: row.try_get("updated_at").map_err(db_err)?,
        })
    }

    async fn fetch_where(&self, clause: &str, id: Uuid) -> Result<Vec<PhotoEditRequest>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM photo_edit_requests WHERE {clause} = $1 \
             ORDER BY created_at DESC"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.iter().map(Self::row_to_request).collect()
    }
}

const COLUMNS: &str = "id, client_id, photographer_id, assigned_by, title, description, \
     original_photos, edited_photos, status, priority, estimated_cost, final_cost, \
     deadline, client_notes, photographer_notes, admin_notes, completed_at, \
     delivered_at, payment_status, created_at, updated_at";

#[async_trait]
impl EditRequestRepository for PgEditRequestRepository {
    async fn create(&self, request: &PhotoEditRequest) -> Result<PhotoEditRequest> {
        sqlx::query(
            r"
            INSERT INTO photo_edit_requests (
                id, client_id, photographer_id, assigned_by, title, description,
                original_photos, edited_photos, status, priority, estimated_cost,
                final_cost, deadline, client_notes, photographer_notes,
                admin_notes, completed_at, delivered_at, payment_status,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                      $14, $15, $16, $17, $18, $19, $20, $21)
            ",
        )
        .bind(request.id.0)
        .bind(request.client_id.0)
        .bind(request.photographer_id.map(|id| id.0))
        .bind(request.assigned_by.map(|id| id.0))
        .bind(&request.title)
        .bind(&request.description)
        .bind(to_json(&request.original_photos)?)
        .bind(to_json(&request.edited_photos)?)
        .bind(request.status.as_str())
        .bind(request.priority.as_str())
        .bind(request.estimated_cost)
        .bind(request.final_cost)
        .bind(request.deadline)
        .bind(&request.client_notes)
        .bind(&request.photographer_notes)
        .bind(&request.admin_notes)
        .bind(request.completed_at)
        .bind(request.delivered_at)
        .bind(request.payment_status.as_str())
        .bind(request.created_at)
        .bind(request.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(request.clone())
    }

    async fn get(&self, id: EditRequestId) -> Result<PhotoEditRequest> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM photo_edit_requests WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?
        .ok_or(StudioError::NotFound("Photo edit request"))?;
        Self::row_to_request(&row)
    }

    async fn list(&self) -> Result<Vec<PhotoEditRequest>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM photo_edit_requests ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.iter().map(Self::row_to_request).collect()
    }

    async fn list_by_client(&self, client_id: UserId) -> Result<Vec<PhotoEditRequest>> {
        self.fetch_where("client_id", client_id.0).await
    }

    async fn list_by_photographer(
        &self,
        photographer_id: PhotographerId,
    ) -> Result<Vec<PhotoEditRequest>> {
        self.fetch_where("photographer_id", photographer_id.0).await
    }

    async fn update(&self, request: &PhotoEditRequest) -> Result<PhotoEditRequest> {
        let result = sqlx::query(
            r"
            UPDATE photo_edit_requests SET
                photographer_id = $2, assigned_by = $3, title = $4,
                description = $5, original_photos = $6, edited_photos = $7,
                status = $8, priority = $9, estimated_cost = $10,
                final_cost = $11, deadline = $12, client_notes = $13,
                photographer_notes = $14, admin_notes = $15, completed_at = $16,
                delivered_at = $17, payment_status = $18, updated_at = $19
            WHERE id = $1
            ",
        )
        .bind(request.id.0)
        .bind(request.photographer_id.map(|id| id.0))
        .bind(request.assigned_by.map(|id| id.0))
        .bind(&request.title)
        .bind(&request.description)
        .bind(to_json(&request.original_photos)?)
        .bind(to_json(&request.edited_photos)?)
        .bind(request.status.as_str())
        .bind(request.priority.as_str())
        .bind(request.estimated_cost)
        .bind(request.final_cost)
        .bind(request.deadline)
        .bind(&request.client_notes)
        .bind(&request.photographer_notes)
        .bind(&request.admin_notes)
        .bind(request.completed_at)
        .bind(request.delivered_at)
        .bind(request.payment_status.as_str())
        .bind(request.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(StudioError::NotFound("Photo edit request"));
        }
        Ok(request.clone())
    }

    async fn delete(&self, id: EditRequestId) -> Result<()> {
        let result = sqlx::query("DELETE FROM photo_edit_requests WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(StudioError::NotFound("Photo edit request"));
        }
        Ok(())
    }
}
