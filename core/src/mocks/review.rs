//! Mock review repository.

use crate::error::{Result, StudioError};
use crate::ids::{BookingId, PhotographerId, ReviewId, UserId};
use crate::model::Review;
use crate::repository::ReviewRepository;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory review storage for tests.
#[derive(Debug, Clone, Default)]
pub struct MockReviewRepository {
    reviews: Arc<Mutex<HashMap<ReviewId, Review>>>,
}

impl MockReviewRepository {
    /// Create an empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted(mut reviews: Vec<Review>) -> Vec<Review> {
    reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    reviews
}

#[async_trait]
impl ReviewRepository for MockReviewRepository {
    async fn create(&self, review: &Review) -> Result<Review> {
        super::lock(&self.reviews)?.insert(review.id, review.clone());
        Ok(review.clone())
    }

    async fn get(&self, id: ReviewId) -> Result<Review> {
        super::lock(&self.reviews)?
            .get(&id)
            .cloned()
            .ok_or(StudioError::NotFound("Review"))
    }

    async fn list(&self) -> Result<Vec<Review>> {
        Ok(sorted(
            super::lock(&self.reviews)?.values().cloned().collect(),
        ))
    }

    async fn list_by_photographer(&self, photographer_id: PhotographerId) -> Result<Vec<Review>> {
        Ok(sorted(
            super::lock(&self.reviews)?
                .values()
                .filter(|r| r.photographer_id == photographer_id)
                .cloned()
                .collect(),
        ))
    }

    async fn list_by_client(&self, client_id: UserId) -> Result<Vec<Review>> {
        Ok(sorted(
            super::lock(&self.reviews)?
                .values()
                .filter(|r| r.client_id == client_id)
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_booking(&self, booking_id: BookingId) -> Result<Option<Review>> {
        Ok(super::lock(&self.reviews)?
            .values()
            .find(|r| r.booking_id == Some(booking_id))
            .cloned())
    }

    async fn update(&self, review: &Review) -> Result<Review> {
        let mut reviews = super::lock(&self.reviews)?;
        if !reviews.contains_key(&review.id) {
            return Err(StudioError::NotFound("Review"));
        }
        reviews.insert(review.id, review.clone());
        Ok(review.clone())
    }

    async fn delete(&self, id: ReviewId) -> Result<()> {
        super::lock(&self.reviews)?
            .remove(&id)
            .map(|_| ())
            .ok_or(StudioError::NotFound("Review"))
    }

    async fn delete_by_client(&self, client_id: UserId) -> Result<u64> {
        let mut reviews = super::lock(&self.reviews)?;
        let before = reviews.len();
        reviews.retain(|_, r| r.client_id != client_id);
        Ok((before - reviews.len()) as u64)
    }

    async fn delete_by_photographer(&self, photographer_id: PhotographerId) -> Result<u64> {
        let mut reviews = super::lock(&self.reviews)?;
        let before = reviews.len();
        reviews.retain(|_, r| r.photographer_id != photographer_id);
        Ok((before - reviews.len()) as u64)
    }
}
