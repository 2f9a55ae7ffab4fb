//! Mock booking repository.

use crate::error::{Result, StudioError};
use crate::ids::{BookingId, PhotographerId, UserId};
use crate::model::Booking;
use crate::repository::BookingRepository;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory booking storage for tests.
#[derive(Debug, Clone, Default)]
pub struct MockBookingRepository {
    bookings: Arc<Mutex<HashMap<BookingId, Booking>>>,
}

impl MockBookingRepository {
    /// Create an empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted(mut bookings: Vec<Booking>) -> Vec<Booking> {
    bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    bookings
}

#[async_trait]
impl BookingRepository for MockBookingRepository {
    async fn create(&self, booking: &Booking) -> Result<Booking> {
        super::lock(&self.bookings)?.insert(booking.id, booking.clone());
        Ok(booking.clone())
    }

    async fn get(&self, id: BookingId) -> Result<Booking> {
        super::lock(&self.bookings)?
            .get(&id)
            .cloned()
            .ok_or(StudioError::NotFound("Booking"))
    }

    async fn list(&self) -> Result<Vec<Booking>> {
        Ok(sorted(
            super::lock(&self.bookings)?.values().cloned().collect(),
        ))
    }

    async fn list_by_client(&self, client_id: UserId) -> Result<Vec<Booking>> {
        Ok(sorted(
            super::lock(&self.bookings)?
                .values()
                .filter(|b| b.client_id == client_id)
                .cloned()
                .collect(),
        ))
    }

    async fn list_by_photographer(&self, photographer_id: PhotographerId) -> Result<Vec<Booking>> {
        Ok(sorted(
            super::lock(&self.bookings)?
                .values()
                .filter(|b| b.photographer_id == photographer_id)
                .cloned()
                .collect(),
        ))
    }

    async fn update(&self, booking: &Booking) -> Result<Booking> {
        let mut bookings = super::lock(&self.bookings)?;
        if !bookings.contains_key(&booking.id) {
            return Err(StudioError::NotFound("Booking"));
        }
        bookings.insert(booking.id, booking.clone());
        Ok(booking.clone())
    }

    async fn delete(&self, id: BookingId) -> Result<()> {
        super::lock(&self.bookings)?
            .remove(&id)
            .map(|_| ())
            .ok_or(StudioError::NotFound("Booking"))
    }

    async fn delete_by_client(&self, client_id: UserId) -> Result<u64> {
        let mut bookings = super::lock(&self.bookings)?;
        let before = bookings.len();
        bookings.retain(|_, b| b.client_id != client_id);
        Ok((before - bookings.len()) as u64)
    }

    async fn delete_by_photographer(&self, photographer_id: PhotographerId) -> Result<u64> {
        let mut bookings = super::lock(&self.bookings)?;
        let before = bookings.len();
        bookings.retain(|_, b| b.photographer_id != photographer_id);
        Ok((before - bookings.len()) as u64)
    }
}
