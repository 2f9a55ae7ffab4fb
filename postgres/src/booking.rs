//! Bookings backed by the `bookings` table.

use crate::{db_err, parse_with};
use async_trait::async_trait;
use lumen_core::ids::{BookingId, PhotographerId, UserId};
use lumen_core::model::{Booking, BookingStatus, BookingWindow, ContactInfo};
use lumen_core::repository::BookingRepository;
use lumen_core::{Result, StudioError};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// `PostgreSQL`-backed [`BookingRepository`].
pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    /// Create the repository over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_booking(row: &PgRow) -> Result<Booking> {
        let status: String = row.try_get("status").map_err(db_err)?;
        Ok(Booking {
            id: BookingId(row.try_get::<Uuid, _>("id").map_err(db_err)?),
            client_id: UserId(row.try_get::<Uuid, _>("client_id").map_err(db_err)?),
            photographer_id: PhotographerId(
                row.try_get::<Uuid, _>("photographer_id").map_err(db_err)?,
            ),
            service: row.try_get("service").map_err(db_err)?,
            date: row.try_get("date").map_err(db_err)?,
            time_slot: BookingWindow {
                start: row.try_get("slot_start").map_err(db_err)?,
                end: row.try_get("slot_end").map_err(db_err)?,
            },
            duration: row.try_get("duration").map_err(db_err)?,
            location: row.try_get("location").map_err(db_err)?,
            notes: row.try_get("notes").map_err(db_err)?,
            contact: ContactInfo {
                phone: row.try_get("contact_phone").map_err(db_err)?,
                email: row.try_get("contact_email").map_err(db_err)?,
            },
            price: row.try_get("price").map_err(db_err)?,
            status: parse_with(status.parse::<BookingStatus>())?,
            created_at: row.try_get("created_at").map_err(db_err)?,
            updated_at: row.try_get("updated_at").map_err(db_err)?,
        })
    }

    async fn fetch_where(&self, clause: &str, id: Uuid) -> Result<Vec<Booking>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM bookings WHERE {clause} = $1 ORDER BY created_at DESC"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.iter().map(Self::row_to_booking).collect()
    }
}

const COLUMNS: &str = "id, client_id, photographer_id, service, date, slot_start, slot_end, \
     duration, location, notes, contact_phone, contact_email, price, status, \
     created_at, updated_at";

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn create(&self, booking: &Booking) -> Result<Booking> {
        sqlx::query(
            r"
            INSERT INTO bookings (
                id, client_id, photographer_id, service, date, slot_start,
                slot_end, duration, location, notes, contact_phone,
                contact_email, price, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                      $13, $14, $15, $16)
            ",
        )
        .bind(booking.id.0)
        .bind(booking.client_id.0)
        .bind(booking.photographer_id.0)
        .bind(&booking.service)
        .bind(booking.date)
        .bind(&booking.time_slot.start)
        .bind(&booking.time_slot.end)
        .bind(booking.duration)
        .bind(&booking.location)
        .bind(&booking.notes)
        .bind(&booking.contact.phone)
        .bind(&booking.contact.email)
        .bind(booking.price)
        .bind(booking.status.as_str())
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(booking.clone())
    }

    async fn get(&self, id: BookingId) -> Result<Booking> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM bookings WHERE id = $1"))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?
            .ok_or(StudioError::NotFound("Booking"))?;
        Self::row_to_booking(&row)
    }

    async fn list(&self) -> Result<Vec<Booking>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM bookings ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.iter().map(Self::row_to_booking).collect()
    }

    async fn list_by_client(&self, client_id: UserId) -> Result<Vec<Booking>> {
        self.fetch_where("client_id", client_id.0).await
    }

    async fn list_by_photographer(&self, photographer_id: PhotographerId) -> Result<Vec<Booking>> {
        self.fetch_where("photographer_id", photographer_id.0).await
    }

    async fn update(&self, booking: &Booking) -> Result<Booking> {
        let result = sqlx::query(
            r"
            UPDATE bookings SET
                service = $2, date = $3, slot_start = $4, slot_end = $5,
                duration = $6, location = $7, notes = $8, contact_phone = $9,
                contact_email = $10, price = $11, status = $12, updated_at = $13
            WHERE id = $1
            ",
        )
        .bind(booking.id.0)
        .bind(&booking.service)
        .bind(booking.date)
        .bind(&booking.time_slot.start)
        .bind(&booking.time_slot.end)
        .bind(booking.duration)
        .bind(&booking.location)
        .bind(&booking.notes)
        .bind(&booking.contact.phone)
        .bind(&booking.contact.email)
        .bind(booking.price)
        .bind(booking.status.as_str())
        .bind(booking.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(StudioError::NotFound("Booking"));
        }
        Ok(booking.clone())
    }

    async fn delete(&self, id: BookingId) -> Result<()> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(StudioError::NotFound("Booking"));
        }
        Ok(())
    }

    async fn delete_by_client(&self, client_id: UserId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM bookings WHERE client_id = $1")
            .bind(client_id.0)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected())
    }

    async fn delete_by_photographer(&self, photographer_id: PhotographerId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM bookings WHERE photographer_id = $1")
            .bind(photographer_id.0)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected())
    }
}
