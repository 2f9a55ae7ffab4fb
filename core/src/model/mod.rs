//! Domain model for the marketplace.

mod booking;
mod edit_request;
mod photographer;
mod report;
mod review;
mod settings;
mod testimonial;
mod user;

pub use booking::{Booking, BookingStatus, BookingWindow, ContactInfo};
pub use edit_request::{
    EditPriority, EditRequestStats, EditRequestStatus, PaymentStatus, PhotoEditRequest, PhotoMeta,
};
pub use photographer::{
    AvailabilityEntry, Photographer, PortfolioItem, PricingEntry, ServiceKind, TimeSlot,
};
pub use report::{
    AnalyticsPeriod, DashboardStats, DayBucket, MonthlyTrendPoint, RecentBooking, RecentReview,
    StatusCounts, TopPhotographer,
};
pub use review::{PhotographerResponse, RatingBucket, Review, ReviewStats};
pub use settings::{BookingPolicy, Settings, SocialLinks};
pub use testimonial::Testimonial;
pub use user::{Role, User};
