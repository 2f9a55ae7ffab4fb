//! Shared application state for handlers.

use crate::uploads::UploadConfig;
use lumen_core::repository::{
    BookingRepository, EditRequestRepository, PhotographerRepository, ReportingStore,
    ReviewRepository, SettingsRepository, TestimonialRepository, UserRepository,
};
use lumen_core::service::{
    AccountService, BookingService, EditRequestService, PhotographerService, ReviewService,
    TestimonialService,
};
use std::sync::Arc;

/// Repositories, services and upload configuration shared by all
/// handlers. Cloning is cheap; everything is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// User accounts.
    pub users: Arc<dyn UserRepository>,
    /// Photographer profiles.
    pub photographers: Arc<dyn PhotographerRepository>,
    /// Bookings.
    pub bookings: Arc<dyn BookingRepository>,
    /// Reviews.
    pub reviews: Arc<dyn ReviewRepository>,
    /// Testimonials.
    pub testimonials: Arc<dyn TestimonialRepository>,
    /// Photo edit requests.
    pub edit_requests: Arc<dyn EditRequestRepository>,
    /// Site settings.
    pub settings: Arc<dyn SettingsRepository>,
    /// Admin dashboard aggregation.
    pub reporting: Arc<dyn ReportingStore>,
    /// Registration, login, cascading deletes.
    pub accounts: AccountService,
    /// Booking lifecycle and slot sync.
    pub booking_service: BookingService,
    /// Profile, portfolio and availability management.
    pub photographer_service: PhotographerService,
    /// Reviews and rating recomputation.
    pub review_service: ReviewService,
    /// Testimonial curation.
    pub testimonial_service: TestimonialService,
    /// Photo edit request lifecycle.
    pub edit_request_service: EditRequestService,
    /// Where uploads land on disk.
    pub uploads: UploadConfig,
}

impl AppState {
    /// Wire the state from its repositories; services are constructed
    /// over the same instances so every surface sees the same data.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        users: Arc<dyn UserRepository>,
        photographers: Arc<dyn PhotographerRepository>,
        bookings: Arc<dyn BookingRepository>,
        reviews: Arc<dyn ReviewRepository>,
        testimonials: Arc<dyn TestimonialRepository>,
        edit_requests: Arc<dyn EditRequestRepository>,
        settings: Arc<dyn SettingsRepository>,
        reporting: Arc<dyn ReportingStore>,
        uploads: UploadConfig,
    ) -> Self {
        let accounts = AccountService::new(
            Arc::clone(&users),
            Arc::clone(&photographers),
            Arc::clone(&bookings),
            Arc::clone(&reviews),
        );
        let booking_service = BookingService::new(
            Arc::clone(&bookings),
            Arc::clone(&users),
            Arc::clone(&photographers),
        );
        let photographer_service = PhotographerService::new(Arc::clone(&photographers));
        let review_service = ReviewService::new(
            Arc::clone(&reviews),
            Arc::clone(&users),
            Arc::clone(&photographers),
            Arc::clone(&bookings),
        );
        let testimonial_service =
            TestimonialService::new(Arc::clone(&testimonials), Arc::clone(&reviews));
        let edit_request_service = EditRequestService::new(
            Arc::clone(&edit_requests),
            Arc::clone(&users),
            Arc::clone(&photographers),
        );
        Self {
            users,
            photographers,
            bookings,
            reviews,
            testimonials,
            edit_requests,
            settings,
            reporting,
            accounts,
            booking_service,
            photographer_service,
            review_service,
            testimonial_service,
            edit_request_service,
            uploads,
        }
    }
}
