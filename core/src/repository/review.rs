//! Review repository trait.

use crate::error::Result;
use crate::ids::{BookingId, PhotographerId, ReviewId, UserId};
use crate::model::Review;
use async_trait::async_trait;

/// Review storage.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Persist a new review.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    async fn create(&self, review: &Review) -> Result<Review>;

    /// Get a review by id.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such review exists.
    async fn get(&self, id: ReviewId) -> Result<Review>;

    /// All reviews, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    async fn list(&self) -> Result<Vec<Review>>;

    /// Reviews of a photographer, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    async fn list_by_photographer(&self, photographer_id: PhotographerId) -> Result<Vec<Review>>;

    /// Reviews authored by a client, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    async fn list_by_client(&self, client_id: UserId) -> Result<Vec<Review>>;

    /// The review attached to a booking, if any.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    async fn find_by_booking(&self, booking_id: BookingId) -> Result<Option<Review>>;

    /// Overwrite an existing review.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such review exists.
    async fn update(&self, review: &Review) -> Result<Review>;

    /// Delete a review.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such review exists.
    async fn delete(&self, id: ReviewId) -> Result<()>;

    /// Delete every review authored by a client. Returns the number
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    async fn delete_by_client(&self, client_id: UserId) -> Result<u64>;

    /// Delete every review of a photographer. Returns the number removed.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    async fn delete_by_photographer(&self, photographer_id: PhotographerId) -> Result<u64>;
}
