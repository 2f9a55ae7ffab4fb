//! Testimonials: reviews promoted to the public site by an admin.

use crate::error::{Result, StudioError};
use crate::ids::{PhotographerId, ReviewId, TestimonialId, UserId};
use crate::model::{Review, Testimonial};
use crate::repository::{ReviewRepository, TestimonialRepository};
use chrono::Utc;
use std::sync::Arc;

/// Shallow testimonial update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct TestimonialPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
}

/// Testimonial curation.
#[derive(Clone)]
pub struct TestimonialService {
    testimonials: Arc<dyn TestimonialRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl TestimonialService {
    /// Wire the service to its repositories.
    #[must_use]
    pub fn new(
        testimonials: Arc<dyn TestimonialRepository>,
        reviews: Arc<dyn ReviewRepository>,
    ) -> Self {
        Self {
            testimonials,
            reviews,
        }
    }

    /// Promote a review to a testimonial, copying its comment and
    /// rating. At most one testimonial per review.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such review exists,
    /// `StudioError::Validation` when the review already has a
    /// testimonial.
    pub async fn promote(&self, review_id: ReviewId, title: Option<String>) -> Result<Testimonial> {
        let review = self
            .reviews
            .get(review_id)
            .await
            .map_err(|e| e.not_found_as("Review"))?;
        if self.testimonials.find_by_review(review_id).await?.is_some() {
            return Err(StudioError::validation(
                "Testimonial already exists for this review",
            ));
        }

        let now = Utc::now();
        let testimonial = Testimonial {
            id: TestimonialId::new(),
            client_id: review.client_id,
            photographer_id: review.photographer_id,
            review_id,
            title: title.unwrap_or_else(|| "Great Experience".to_string()),
            content: review.comment,
            rating: review.rating,
            is_active: true,
            is_featured: false,
            approved_by: None,
            approved_at: None,
            created_at: now,
            updated_at: now,
        };
        self.testimonials.create(&testimonial).await
    }

    /// Shallow testimonial update.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such testimonial exists.
    pub async fn update(&self, id: TestimonialId, patch: TestimonialPatch) -> Result<Testimonial> {
        let mut testimonial = self.testimonials.get(id).await?;
        if let Some(title) = patch.title {
            testimonial.title = title;
        }
        if let Some(content) = patch.content {
            testimonial.content = content;
        }
        if let Some(is_active) = patch.is_active {
            testimonial.is_active = is_active;
        }
        if let Some(is_featured) = patch.is_featured {
            testimonial.is_featured = is_featured;
        }
        testimonial.updated_at = Utc::now();
        self.testimonials.update(&testimonial).await
    }

    /// Flip the featured flag; turning it on stamps the approving
    /// admin and time.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such testimonial exists.
    pub async fn toggle_featured(
        &self,
        id: TestimonialId,
        approved_by: Option<UserId>,
    ) -> Result<Testimonial> {
        let mut testimonial = self.testimonials.get(id).await?;
        testimonial.is_featured = !testimonial.is_featured;
        if testimonial.is_featured {
            testimonial.approved_by = approved_by;
            testimonial.approved_at = Some(Utc::now());
        }
        testimonial.updated_at = Utc::now();
        self.testimonials.update(&testimonial).await
    }

    /// Flip the active flag.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such testimonial exists.
    pub async fn toggle_active(&self, id: TestimonialId) -> Result<Testimonial> {
        let mut testimonial = self.testimonials.get(id).await?;
        testimonial.is_active = !testimonial.is_active;
        testimonial.updated_at = Utc::now();
        self.testimonials.update(&testimonial).await
    }

    /// Delete a testimonial.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such testimonial exists.
    pub async fn delete(&self, id: TestimonialId) -> Result<()> {
        self.testimonials.delete(id).await
    }

    /// All testimonials, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    pub async fn list(&self) -> Result<Vec<Testimonial>> {
        self.testimonials.list().await
    }

    /// Active featured testimonials for the landing page, at most six.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    pub async fn featured(&self) -> Result<Vec<Testimonial>> {
        let mut testimonials: Vec<_> = self
            .testimonials
            .list()
            .await?
            .into_iter()
            .filter(|t| t.is_active && t.is_featured)
            .collect();
        testimonials.truncate(6);
        Ok(testimonials)
    }

    /// A photographer's active testimonials.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    pub async fn by_photographer(
        &self,
        photographer_id: PhotographerId,
    ) -> Result<Vec<Testimonial>> {
        Ok(self
            .testimonials
            .list()
            .await?
            .into_iter()
            .filter(|t| t.photographer_id == photographer_id && t.is_active)
            .collect())
    }

    /// Reviews rated 4 or higher that have not been promoted yet,
    /// newest first.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    pub async fn available_reviews(&self) -> Result<Vec<Review>> {
        let used: Vec<ReviewId> = self
            .testimonials
            .list()
            .await?
            .into_iter()
            .map(|t| t.review_id)
            .collect();
        Ok(self
            .reviews
            .list()
            .await?
            .into_iter()
            .filter(|r| r.rating >= 4 && !used.contains(&r.id))
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use crate::mocks::{MockReviewRepository, MockTestimonialRepository};
    use crate::model::Review;

    async fn fixture() -> (TestimonialService, Review) {
        let reviews = Arc::new(MockReviewRepository::new());
        let testimonials = Arc::new(MockTestimonialRepository::new());

        let now = Utc::now();
        let review = reviews
            .create(&Review {
                id: ReviewId::new(),
                client_id: UserId::new(),
                photographer_id: PhotographerId::new(),
                booking_id: None,
                rating: 5,
                title: "Wonderful".to_string(),
                comment: "Beautiful shots".to_string(),
                service_type: "General Photography".to_string(),
                helpful_votes: 0,
                is_verified: false,
                photographer_response: None,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();

        let service = TestimonialService::new(
            testimonials,
            Arc::clone(&reviews) as Arc<dyn ReviewRepository>,
        );
        (service, review)
    }

    #[tokio::test]
    async fn test_promote_copies_review_content() {
        let (service, review) = fixture().await;
        let testimonial = service.promote(review.id, None).await.unwrap();
        assert_eq!(testimonial.content, "Beautiful shots");
        assert_eq!(testimonial.rating, 5);
        assert_eq!(testimonial.title, "Great Experience");
        assert!(testimonial.is_active);
        assert!(!testimonial.is_featured);
    }

    #[tokio::test]
    async fn test_second_promotion_of_same_review_is_rejected() {
        let (service, review) = fixture().await;
        service.promote(review.id, None).await.unwrap();
        let err = service.promote(review.id, None).await.unwrap_err();
        assert!(matches!(err, StudioError::Validation(_)));
    }

    #[tokio::test]
    async fn test_toggle_featured_stamps_approval() {
        let (service, review) = fixture().await;
        let testimonial = service.promote(review.id, None).await.unwrap();
        let admin = UserId::new();

        let featured = service
            .toggle_featured(testimonial.id, Some(admin))
            .await
            .unwrap();
        assert!(featured.is_featured);
        assert_eq!(featured.approved_by, Some(admin));
        assert!(featured.approved_at.is_some());
    }

    #[tokio::test]
    async fn test_promoted_review_leaves_available_list() {
        let (service, review) = fixture().await;
        assert_eq!(service.available_reviews().await.unwrap().len(), 1);
        service.promote(review.id, None).await.unwrap();
        assert!(service.available_reviews().await.unwrap().is_empty());
    }
}
