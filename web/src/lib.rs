//! Axum HTTP surface for the Lumen studio marketplace.
//!
//! Handlers are thin: they parse the request, call a service or
//! repository from [`AppState`], and map the result into the wire
//! envelope. Mutations answer `{ "message": ..., <entity>: ... }`,
//! reads answer the entity or list directly, and every error becomes
//! `{ "message": ... }` with the matching status code.
//!
//! The state is storage-agnostic: tests wire it to the in-memory mocks
//! from `lumen-core`, the server wires it to `lumen-postgres`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod uploads;

pub use error::AppError;
pub use router::build_router;
pub use state::AppState;
pub use uploads::UploadConfig;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
