//! Testimonial repository trait.

use crate::error::Result;
use crate::ids::{ReviewId, TestimonialId};
use crate::model::Testimonial;
use async_trait::async_trait;

/// Testimonial storage.
#[async_trait]
pub trait TestimonialRepository: Send + Sync {
    /// Persist a new testimonial.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    async fn create(&self, testimonial: &Testimonial) -> Result<Testimonial>;

    /// Get a testimonial by id.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such testimonial exists.
    async fn get(&self, id: TestimonialId) -> Result<Testimonial>;

    /// All testimonials, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    async fn list(&self) -> Result<Vec<Testimonial>>;

    /// The testimonial promoted from a review, if any.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    async fn find_by_review(&self, review_id: ReviewId) -> Result<Option<Testimonial>>;

    /// Overwrite an existing testimonial.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such testimonial exists.
    async fn update(&self, testimonial: &Testimonial) -> Result<Testimonial>;

    /// Delete a testimonial.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such testimonial exists.
    async fn delete(&self, id: TestimonialId) -> Result<()>;
}
