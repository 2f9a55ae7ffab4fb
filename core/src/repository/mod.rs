//! Repository traits abstracting over storage.
//!
//! Each trait is object-safe so the web layer can hold `Arc<dyn ...>`
//! handles wired to either the PostgreSQL backend or the in-memory
//! mocks.

mod booking;
mod edit_request;
mod photographer;
mod reporting;
mod review;
mod settings;
mod testimonial;
mod user;

pub use booking::BookingRepository;
pub use edit_request::EditRequestRepository;
pub use photographer::PhotographerRepository;
pub use reporting::ReportingStore;
pub use review::ReviewRepository;
pub use settings::SettingsRepository;
pub use testimonial::TestimonialRepository;
pub use user::UserRepository;
