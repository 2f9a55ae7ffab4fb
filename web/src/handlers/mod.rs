//! Request handlers, one module per resource.

pub mod admin;
pub mod auth;
pub mod bookings;
pub mod edit_requests;
pub mod photographers;
pub mod reviews;
pub mod testimonials;
pub mod users;
