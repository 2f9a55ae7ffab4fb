//! In-memory repository implementations.
//!
//! Back the services during tests so everything runs at memory speed
//! with no database. State lives in `Arc<Mutex<HashMap>>`; a poisoned
//! lock surfaces as `StudioError::Internal`.

mod booking;
mod edit_request;
mod photographer;
mod reporting;
mod review;
mod settings;
mod testimonial;
mod user;

pub use booking::MockBookingRepository;
pub use edit_request::MockEditRequestRepository;
pub use photographer::MockPhotographerRepository;
pub use reporting::MockReportingStore;
pub use review::MockReviewRepository;
pub use settings::MockSettingsRepository;
pub use testimonial::MockTestimonialRepository;
pub use user::MockUserRepository;

use crate::error::StudioError;
use std::sync::{Mutex, MutexGuard};

/// Lock a mock's state, mapping a poisoned lock to an internal error.
fn lock<T>(mutex: &Mutex<T>) -> crate::error::Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| StudioError::Internal("mock state lock poisoned".to_string()))
}
