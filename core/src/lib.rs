//! # Lumen Core
//!
//! Domain model and services for the Lumen photography studio
//! marketplace: accounts, photographer profiles, bookings, reviews,
//! testimonials and photo edit requests.
//!
//! Storage is abstracted behind repository traits in [`repository`];
//! [`mocks`] provides in-memory implementations so every service runs
//! at memory speed in tests, and a PostgreSQL backend lives in the
//! `lumen-postgres` crate.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod ids;
pub mod mocks;
pub mod model;
pub mod repository;
pub mod service;

pub use error::{Result, StudioError};
