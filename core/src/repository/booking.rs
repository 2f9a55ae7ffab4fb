//! Booking repository trait.

use crate::error::Result;
use crate::ids::{BookingId, PhotographerId, UserId};
use crate::model::Booking;
use async_trait::async_trait;

/// Booking storage.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a new booking.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    async fn create(&self, booking: &Booking) -> Result<Booking>;

    /// Get a booking by id.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such booking exists.
    async fn get(&self, id: BookingId) -> Result<Booking>;

    /// All bookings, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    async fn list(&self) -> Result<Vec<Booking>>;

    /// Bookings made by a client, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    async fn list_by_client(&self, client_id: UserId) -> Result<Vec<Booking>>;

    /// Bookings received by a photographer, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    async fn list_by_photographer(&self, photographer_id: PhotographerId) -> Result<Vec<Booking>>;

    /// Overwrite an existing booking.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such booking exists.
    async fn update(&self, booking: &Booking) -> Result<Booking>;

    /// Delete a booking.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such booking exists.
    async fn delete(&self, id: BookingId) -> Result<()>;

    /// Delete every booking made by a client. Returns the number removed.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    async fn delete_by_client(&self, client_id: UserId) -> Result<u64>;

    /// Delete every booking received by a photographer. Returns the
    /// number removed.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    async fn delete_by_photographer(&self, photographer_id: PhotographerId) -> Result<u64>;
}
