//! Mock testimonial repository.

use crate::error::{Result, StudioError};
use crate::ids::{ReviewId, TestimonialId};
use crate::model::Testimonial;
use crate::repository::TestimonialRepository;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory testimonial storage for tests.
#[derive(Debug, Clone, Default)]
pub struct MockTestimonialRepository {
    testimonials: Arc<Mutex<HashMap<TestimonialId, Testimonial>>>,
}

impl MockTestimonialRepository {
    /// Create an empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TestimonialRepository for MockTestimonialRepository {
    async fn create(&self, testimonial: &Testimonial) -> Result<Testimonial> {
        super::lock(&self.testimonials)?.insert(testimonial.id, testimonial.clone());
        Ok(testimonial.clone())
    }

    async fn get(&self, id: TestimonialId) -> Result<Testimonial> {
        super::lock(&self.testimonials)?
            .get(&id)
            .cloned()
            .ok_or(StudioError::NotFound("Testimonial"))
    }

    async fn list(&self) -> Result<Vec<Testimonial>> {
        let mut testimonials: Vec<Testimonial> = super::lock(&self.testimonials)?
            .values()
            .cloned()
            .collect();
        testimonials.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(testimonials)
    }

    async fn find_by_review(&self, review_id: ReviewId) -> Result<Option<Testimonial>> {
        Ok(super::lock(&self.testimonials)?
            .values()
            .find(|t| t.review_id == review_id)
            .cloned())
    }

    async fn update(&self, testimonial: &Testimonial) -> Result<Testimonial> {
        let mut testimonials = super::lock(&self.testimonials)?;
        if !testimonials.contains_key(&testimonial.id) {
            return Err(StudioError::NotFound("Testimonial"));
        }
        testimonials.insert(testimonial.id, testimonial.clone());
        Ok(testimonial.clone())
    }

    async fn delete(&self, id: TestimonialId) -> Result<()> {
        super::lock(&self.testimonials)?
            .remove(&id)
            .map(|_| ())
            .ok_or(StudioError::NotFound("Testimonial"))
    }
}
