//! `PostgreSQL` persistence for the studio marketplace.
//!
//! Implements the repository traits from `lumen-core` over sqlx with
//! runtime-bound queries. Document-shaped aggregates (a photographer's
//! portfolio, pricing and availability, an edit request's photo lists)
//! are stored in JSONB columns and round-tripped through serde, so the
//! row shape matches the domain model one-to-one.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod booking;
mod edit_request;
mod photographer;
mod reporting;
mod review;
mod settings;
mod testimonial;
mod user;

pub use booking::PgBookingRepository;
pub use edit_request::PgEditRequestRepository;
pub use photographer::PgPhotographerRepository;
pub use reporting::PgReportingStore;
pub use review::PgReviewRepository;
pub use settings::PgSettingsRepository;
pub use testimonial::PgTestimonialRepository;
pub use user::PgUserRepository;

use lumen_core::StudioError;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Open a connection pool against the given database URL.
///
/// # Errors
///
/// Returns the underlying sqlx error if the pool cannot be created.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Apply all pending migrations from the bundled `migrations/` directory.
///
/// # Errors
///
/// Returns the migration error if any migration fails to apply.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

pub(crate) fn db_err(e: sqlx::Error) -> StudioError {
    StudioError::Database(e.to_string())
}

pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, StudioError> {
    serde_json::to_value(value).map_err(|e| StudioError::Database(e.to_string()))
}

pub(crate) fn from_json<T: serde::de::DeserializeOwned>(
    value: serde_json::Value,
) -> Result<T, StudioError> {
    serde_json::from_value(value).map_err(|e| StudioError::Database(e.to_string()))
}

pub(crate) fn parse_with<T, E: std::fmt::Display>(
    result: Result<T, E>,
) -> Result<T, StudioError> {
    result.map_err(|e| StudioError::Database(e.to_string()))
}
