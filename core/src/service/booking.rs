//! Booking lifecycle: creation, status transitions and the
//! availability-slot sync that rides along with them.

use crate::error::{Result, StudioError};
use crate::ids::BookingId;
use crate::model::{Booking, BookingStatus, BookingWindow, ContactInfo, Photographer};
use crate::repository::{BookingRepository, PhotographerRepository, UserRepository};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;

/// Input for [`BookingService::create`].
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub client_id: crate::ids::UserId,
    pub photographer_id: crate::ids::PhotographerId,
    pub service: String,
    pub date: NaiveDate,
    /// Start time, `"HH:MM"`.
    pub time: String,
    /// Duration in whole hours.
    pub duration: i32,
    pub location: String,
    pub notes: String,
    pub contact: ContactInfo,
    /// Explicit total; when zero the price is derived from the
    /// photographer's pricing.
    pub total_amount: f64,
}

/// Shallow field update for [`BookingService::update`]. `None` leaves
/// the field untouched.
#[derive(Debug, Clone, Default)]
pub struct BookingPatch {
    pub service: Option<String>,
    pub date: Option<NaiveDate>,
    pub time_slot: Option<BookingWindow>,
    pub duration: Option<i32>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub contact: Option<ContactInfo>,
    pub price: Option<f64>,
}

/// Bookings run 1 through 12 whole hours.
fn validate_duration(duration: i32) -> Result<()> {
    if (1..=12).contains(&duration) {
        Ok(())
    } else {
        Err(StudioError::validation(
            "Duration must be between 1 and 12 hours",
        ))
    }
}

/// Booking lifecycle and the paired availability-slot writes.
///
/// The booking write and the slot write are separate operations with
/// no transaction across them; a failed slot write is logged and the
/// booking change stands.
#[derive(Clone)]
pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
    users: Arc<dyn UserRepository>,
    photographers: Arc<dyn PhotographerRepository>,
}

impl BookingService {
    /// Wire the service to its repositories.
    #[must_use]
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        users: Arc<dyn UserRepository>,
        photographers: Arc<dyn PhotographerRepository>,
    ) -> Self {
        Self {
            bookings,
            users,
            photographers,
        }
    }

    /// Create a booking in `Pending` status.
    ///
    /// The end time is the start hour plus the duration, formatted
    /// `"HH:00"`; a booking running past 23:00 keeps the raw sum
    /// (e.g. `"26:00"`). When no explicit total is given the price
    /// comes from the photographer's pricing entry for the service,
    /// scaled by `duration / 2` (entries are 2-hour base rates), and
    /// falls back to zero.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when the client or photographer
    /// does not exist, `StudioError::Validation` when the start time
    /// is not `"HH:MM"` or the duration is outside 1 through 12 hours.
    pub async fn create(&self, input: NewBooking) -> Result<Booking> {
        validate_duration(input.duration)?;
        self.users
            .get(input.client_id)
            .await
            .map_err(|e| e.not_found_as("Client"))?;
        let photographer = self
            .photographers
            .get(input.photographer_id)
            .await
            .map_err(|e| e.not_found_as("Photographer"))?;

        let start_hour: i32 = input
            .time
            .split(':')
            .next()
            .and_then(|h| h.parse().ok())
            .ok_or_else(|| StudioError::validation("Invalid time format"))?;
        let end = format!("{:02}:00", start_hour + input.duration);

        let mut price = input.total_amount;
        if price == 0.0 {
            if let Some(entry) = photographer
                .pricing
                .iter()
                .find(|p| p.service == input.service)
            {
                price = entry.price * (f64::from(input.duration) / 2.0);
            }
        }

        let now = Utc::now();
        let booking = Booking {
            id: BookingId::new(),
            client_id: input.client_id,
            photographer_id: input.photographer_id,
            service: input.service,
            date: input.date,
            time_slot: BookingWindow {
                start: input.time,
                end,
            },
            duration: input.duration,
            location: input.location,
            notes: input.notes,
            contact: input.contact,
            price,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.bookings.create(&booking).await
    }

    /// Transition a booking to a new status and sync the matching
    /// availability slot: `Confirmed`/`Completed` mark it booked,
    /// `Cancelled` frees it when the prior status was `Confirmed`.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Validation` for an unknown status string,
    /// `StudioError::NotFound` when no such booking exists.
    pub async fn update_status(&self, id: BookingId, status: &str) -> Result<Booking> {
        let status: BookingStatus = status
            .parse()
            .map_err(|_| StudioError::validation("Invalid status"))?;

        let mut booking = self.bookings.get(id).await?;
        let prior = booking.status;
        booking.status = status;
        booking.updated_at = Utc::now();
        let booking = self.bookings.update(&booking).await?;

        if status.occupies_slot() {
            self.sync_slot(&booking, true).await;
        } else if status == BookingStatus::Cancelled && prior == BookingStatus::Confirmed {
            self.sync_slot(&booking, false).await;
        }

        Ok(booking)
    }

    /// Transition a booking's status without touching availability.
    /// Used by the admin surface.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Validation` for an unknown status string,
    /// `StudioError::NotFound` when no such booking exists.
    pub async fn update_status_only(&self, id: BookingId, status: &str) -> Result<Booking> {
        let status: BookingStatus = status
            .parse()
            .map_err(|_| StudioError::validation("Invalid status"))?;
        let mut booking = self.bookings.get(id).await?;
        booking.status = status;
        booking.updated_at = Utc::now();
        self.bookings.update(&booking).await
    }

    /// Shallow field update of booking details.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such booking exists,
    /// `StudioError::Validation` when the patched duration is outside
    /// 1 through 12 hours.
    pub async fn update(&self, id: BookingId, patch: BookingPatch) -> Result<Booking> {
        if let Some(duration) = patch.duration {
            validate_duration(duration)?;
        }
        let mut booking = self.bookings.get(id).await?;
        if let Some(service) = patch.service {
            booking.service = service;
        }
        if let Some(date) = patch.date {
            booking.date = date;
        }
        if let Some(time_slot) = patch.time_slot {
            booking.time_slot = time_slot;
        }
        if let Some(duration) = patch.duration {
            booking.duration = duration;
        }
        if let Some(location) = patch.location {
            booking.location = location;
        }
        if let Some(notes) = patch.notes {
            booking.notes = notes;
        }
        if let Some(contact) = patch.contact {
            booking.contact = contact;
        }
        if let Some(price) = patch.price {
            booking.price = price;
        }
        booking.updated_at = Utc::now();
        self.bookings.update(&booking).await
    }

    /// Delete a booking, freeing its slot first when it was confirmed.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such booking exists.
    pub async fn delete(&self, id: BookingId) -> Result<()> {
        let booking = self.bookings.get(id).await?;
        if booking.status == BookingStatus::Confirmed {
            self.sync_slot(&booking, false).await;
        }
        self.bookings.delete(id).await
    }

    /// Best-effort slot write: a missing photographer, date entry or
    /// slot is a silent no-op, and a failed write is logged without
    /// failing the caller.
    async fn sync_slot(&self, booking: &Booking, booked: bool) {
        let mut photographer = match self.photographers.get(booking.photographer_id).await {
            Ok(p) => p,
            Err(err) => {
                tracing::warn!(
                    booking_id = %booking.id,
                    photographer_id = %booking.photographer_id,
                    %err,
                    "slot sync skipped: photographer lookup failed"
                );
                return;
            }
        };

        if !mark_slot(&mut photographer, booking, booked) {
            return;
        }

        if let Err(err) = self.photographers.update(&photographer).await {
            tracing::warn!(
                booking_id = %booking.id,
                photographer_id = %booking.photographer_id,
                booked,
                %err,
                "slot sync write failed; booking change stands"
            );
        }
    }
}

/// Flip the `is_booked` flag on the slot matching the booking's date
/// and window. Returns `false` when no slot matches.
fn mark_slot(photographer: &mut Photographer, booking: &Booking, booked: bool) -> bool {
    let Some(entry) = photographer
        .availability
        .iter_mut()
        .find(|entry| entry.date == booking.date)
    else {
        return false;
    };
    let Some(slot) = entry.time_slots.iter_mut().find(|slot| {
        slot.start == booking.time_slot.start && slot.end == booking.time_slot.end
    }) else {
        return false;
    };
    slot.is_booked = booked;
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use crate::ids::{AvailabilityEntryId, PhotographerId, TimeSlotId, UserId};
    use crate::mocks::{MockBookingRepository, MockPhotographerRepository, MockUserRepository};
    use crate::model::{AvailabilityEntry, Role, TimeSlot, User};

    struct Fixture {
        service: BookingService,
        photographers: Arc<MockPhotographerRepository>,
        client_id: UserId,
        photographer_id: PhotographerId,
    }

    impl Fixture {
        fn new_booking(&self) -> NewBooking {
            NewBooking {
                client_id: self.client_id,
                photographer_id: self.photographer_id,
                service: "Basic Package".to_string(),
                date: NaiveDate::from_ymd_opt(2026, 9, 12).unwrap(),
                time: "10:00".to_string(),
                duration: 2,
                location: "Studio".to_string(),
                notes: String::new(),
                contact: ContactInfo::default(),
                total_amount: 0.0,
            }
        }

        async fn slot_booked(&self) -> bool {
            let photographer = self.photographers.get(self.photographer_id).await.unwrap();
            photographer.availability[0].time_slots[0].is_booked
        }
    }

    async fn fixture() -> Fixture {
        let users = Arc::new(MockUserRepository::new());
        let photographers = Arc::new(MockPhotographerRepository::new());
        let bookings = Arc::new(MockBookingRepository::new());

        let client = users
            .create(&User::new(
                "alice".to_string(),
                "alice@example.com".to_string(),
                "pw".to_string(),
                Role::Client,
            ))
            .await
            .unwrap();
        let owner = users
            .create(&User::new(
                "bob".to_string(),
                "bob@example.com".to_string(),
                "pw".to_string(),
                Role::Photographer,
            ))
            .await
            .unwrap();

        let mut photographer = Photographer::with_defaults(
            owner.id,
            "General Photography".to_string(),
            Vec::new(),
            1,
            String::new(),
        );
        photographer.availability.push(AvailabilityEntry {
            id: AvailabilityEntryId::new(),
            date: NaiveDate::from_ymd_opt(2026, 9, 12).unwrap(),
            time_slots: vec![TimeSlot {
                id: TimeSlotId::new(),
                start: "10:00".to_string(),
                end: "12:00".to_string(),
                is_booked: false,
            }],
        });
        let photographer = photographers.create(&photographer).await.unwrap();

        let service = BookingService::new(
            bookings,
            Arc::clone(&users) as Arc<dyn UserRepository>,
            Arc::clone(&photographers) as Arc<dyn PhotographerRepository>,
        );

        Fixture {
            service,
            photographers,
            client_id: client.id,
            photographer_id: photographer.id,
        }
    }

    #[tokio::test]
    async fn test_price_derives_from_pricing_entry() {
        let fixture = fixture().await;
        let booking = fixture.service.create(fixture.new_booking()).await.unwrap();
        // Basic Package is 100 for a 2-hour base rate.
        assert!((booking.price - 100.0).abs() < f64::EPSILON);
        assert_eq!(booking.time_slot.end, "12:00");
        assert_eq!(booking.status, BookingStatus::Pending);
    }

    #[tokio::test]
    async fn test_explicit_total_wins_over_pricing() {
        let fixture = fixture().await;
        let mut input = fixture.new_booking();
        input.total_amount = 250.0;
        let booking = fixture.service.create(input).await.unwrap();
        assert!((booking.price - 250.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_end_time_past_midnight_is_not_wrapped() {
        let fixture = fixture().await;
        let mut input = fixture.new_booking();
        input.time = "20:00".to_string();
        input.duration = 6;
        let booking = fixture.service.create(input).await.unwrap();
        assert_eq!(booking.time_slot.end, "26:00");
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_client() {
        let fixture = fixture().await;
        let mut input = fixture.new_booking();
        input.client_id = UserId::new();
        let err = fixture.service.create(input).await.unwrap_err();
        assert_eq!(err, StudioError::NotFound("Client"));
    }

    #[tokio::test]
    async fn test_duration_out_of_range_is_rejected() {
        let fixture = fixture().await;
        for duration in [-3, 0, 13] {
            let mut input = fixture.new_booking();
            input.duration = duration;
            let err = fixture.service.create(input).await.unwrap_err();
            assert!(matches!(err, StudioError::Validation(_)), "duration {duration}");
        }

        let booking = fixture.service.create(fixture.new_booking()).await.unwrap();
        let err = fixture
            .service
            .update(
                booking.id,
                BookingPatch {
                    duration: Some(13),
                    ..BookingPatch::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StudioError::Validation(_)));
        let unchanged = fixture.service.bookings.get(booking.id).await.unwrap();
        assert_eq!(unchanged.duration, 2);
    }

    struct DownUserRepository;

    #[async_trait::async_trait]
    impl UserRepository for DownUserRepository {
        async fn create(&self, _user: &User) -> Result<User> {
            Err(down())
        }
        async fn get(&self, _id: UserId) -> Result<User> {
            Err(down())
        }
        async fn find_by_username(&self, _username: &str) -> Result<Option<User>> {
            Err(down())
        }
        async fn find_by_email(&self, _email: &str) -> Result<Option<User>> {
            Err(down())
        }
        async fn list(&self) -> Result<Vec<User>> {
            Err(down())
        }
        async fn update(&self, _user: &User) -> Result<User> {
            Err(down())
        }
        async fn delete(&self, _id: UserId) -> Result<()> {
            Err(down())
        }
    }

    fn down() -> StudioError {
        StudioError::Database("connection refused".to_string())
    }

    #[tokio::test]
    async fn test_store_failure_is_not_reported_as_missing_client() {
        let fixture = fixture().await;
        let service = BookingService::new(
            Arc::new(MockBookingRepository::new()),
            Arc::new(DownUserRepository),
            Arc::clone(&fixture.photographers) as Arc<dyn PhotographerRepository>,
        );
        let err = service.create(fixture.new_booking()).await.unwrap_err();
        assert!(matches!(err, StudioError::Database(_)));
    }

    #[tokio::test]
    async fn test_confirm_marks_slot_booked() {
        let fixture = fixture().await;
        let booking = fixture.service.create(fixture.new_booking()).await.unwrap();

        fixture
            .service
            .update_status(booking.id, "confirmed")
            .await
            .unwrap();
        assert!(fixture.slot_booked().await);
    }

    #[tokio::test]
    async fn test_cancel_after_confirm_frees_slot() {
        let fixture = fixture().await;
        let booking = fixture.service.create(fixture.new_booking()).await.unwrap();

        fixture
            .service
            .update_status(booking.id, "confirmed")
            .await
            .unwrap();
        fixture
            .service
            .update_status(booking.id, "cancelled")
            .await
            .unwrap();
        assert!(!fixture.slot_booked().await);
    }

    #[tokio::test]
    async fn test_cancel_from_pending_leaves_slot_alone() {
        let fixture = fixture().await;
        let booking = fixture.service.create(fixture.new_booking()).await.unwrap();

        fixture
            .service
            .update_status(booking.id, "cancelled")
            .await
            .unwrap();
        assert!(!fixture.slot_booked().await);
    }

    #[tokio::test]
    async fn test_status_update_without_matching_slot_still_succeeds() {
        let fixture = fixture().await;
        let mut input = fixture.new_booking();
        input.time = "15:00".to_string();
        let booking = fixture.service.create(input).await.unwrap();

        let updated = fixture
            .service
            .update_status(booking.id, "confirmed")
            .await
            .unwrap();
        assert_eq!(updated.status, BookingStatus::Confirmed);
        assert!(!fixture.slot_booked().await);
    }

    #[tokio::test]
    async fn test_invalid_status_is_rejected() {
        let fixture = fixture().await;
        let booking = fixture.service.create(fixture.new_booking()).await.unwrap();
        let err = fixture
            .service
            .update_status(booking.id, "paused")
            .await
            .unwrap_err();
        assert!(matches!(err, StudioError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_confirmed_booking_frees_slot() {
        let fixture = fixture().await;
        let booking = fixture.service.create(fixture.new_booking()).await.unwrap();
        fixture
            .service
            .update_status(booking.id, "confirmed")
            .await
            .unwrap();

        fixture.service.delete(booking.id).await.unwrap();
        assert!(!fixture.slot_booked().await);
    }

    #[tokio::test]
    async fn test_admin_status_update_does_not_touch_slot() {
        let fixture = fixture().await;
        let booking = fixture.service.create(fixture.new_booking()).await.unwrap();

        fixture
            .service
            .update_status_only(booking.id, "confirmed")
            .await
            .unwrap();
        assert!(!fixture.slot_booked().await);
    }
}
