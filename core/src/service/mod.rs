//! Application services.
//!
//! Each service owns one slice of the domain logic and talks to
//! storage through the repository traits, so the same code path runs
//! against PostgreSQL in production and the in-memory mocks in tests.

mod account;
mod booking;
mod edit_request;
mod photographer;
mod review;
mod testimonial;

pub use account::{AccountService, Registration};
pub use booking::{BookingPatch, BookingService, NewBooking};
pub use edit_request::{
    EditRequestFilter, EditRequestPage, EditRequestService, NewEditRequest, Pagination,
};
pub use photographer::{
    AvailabilityPatch, NewAvailability, NewPhotographer, PhotographerPatch, PhotographerService,
    PortfolioItemInput, PortfolioItemPatch,
};
pub use review::{NewReview, ReviewPatch, ReviewService};
pub use testimonial::{TestimonialPatch, TestimonialService};
