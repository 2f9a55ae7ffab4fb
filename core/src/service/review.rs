//! Reviews and the denormalized photographer rating they feed.

use crate::error::{Result, StudioError};
use crate::ids::{BookingId, PhotographerId, ReviewId, UserId};
use crate::model::{BookingStatus, PhotographerResponse, Review, ReviewStats};
use crate::repository::{
    BookingRepository, PhotographerRepository, ReviewRepository, UserRepository,
};
use chrono::Utc;
use std::sync::Arc;

/// Input for [`ReviewService::create`].
#[derive(Debug, Clone)]
pub struct NewReview {
    pub client_id: UserId,
    pub photographer_id: PhotographerId,
    pub booking_id: Option<BookingId>,
    pub rating: i32,
    pub title: String,
    pub comment: String,
    /// Defaults to "General Photography" when absent.
    pub service_type: Option<String>,
}

/// Shallow review update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct ReviewPatch {
    pub rating: Option<i32>,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub service_type: Option<String>,
}

/// Review CRUD plus the rating aggregation that runs after every
/// mutation. The recompute is best-effort: a failed rating write is
/// logged and the review mutation still reports success.
#[derive(Clone)]
pub struct ReviewService {
    reviews: Arc<dyn ReviewRepository>,
    users: Arc<dyn UserRepository>,
    photographers: Arc<dyn PhotographerRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl ReviewService {
    /// Wire the service to its repositories.
    #[must_use]
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        users: Arc<dyn UserRepository>,
        photographers: Arc<dyn PhotographerRepository>,
        bookings: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            reviews,
            users,
            photographers,
            bookings,
        }
    }

    /// Create a review. When tied to a booking, the booking must be
    /// completed and not yet reviewed, and the review is marked
    /// verified.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Validation` for an out-of-range rating, a
    /// non-completed booking, or a booking that already has a review;
    /// `StudioError::NotFound` when the client, photographer or
    /// booking does not exist.
    pub async fn create(&self, input: NewReview) -> Result<Review> {
        if !(1..=5).contains(&input.rating) {
            return Err(StudioError::validation("Rating must be between 1 and 5"));
        }
        self.users
            .get(input.client_id)
            .await
            .map_err(|e| e.not_found_as("Client"))?;
        self.photographers
            .get(input.photographer_id)
            .await
            .map_err(|e| e.not_found_as("Photographer"))?;

        if let Some(booking_id) = input.booking_id {
            if self.reviews.find_by_booking(booking_id).await?.is_some() {
                return Err(StudioError::validation(
                    "Review already exists for this booking",
                ));
            }
            let booking = self
                .bookings
                .get(booking_id)
                .await
                .map_err(|e| e.not_found_as("Booking"))?;
            if booking.status != BookingStatus::Completed {
                return Err(StudioError::validation(
                    "Can only review completed bookings",
                ));
            }
        }

        let now = Utc::now();
        let review = Review {
            id: ReviewId::new(),
            client_id: input.client_id,
            photographer_id: input.photographer_id,
            booking_id: input.booking_id,
            rating: input.rating,
            title: input.title,
            comment: input.comment,
            service_type: input
                .service_type
                .unwrap_or_else(|| "General Photography".to_string()),
            helpful_votes: 0,
            is_verified: input.booking_id.is_some(),
            photographer_response: None,
            created_at: now,
            updated_at: now,
        };
        let review = self.reviews.create(&review).await?;
        self.recompute_rating(review.photographer_id).await;
        Ok(review)
    }

    /// Shallow review update, followed by a rating recompute.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such review exists,
    /// `StudioError::Validation` for an out-of-range rating.
    pub async fn update(&self, id: ReviewId, patch: ReviewPatch) -> Result<Review> {
        let mut review = self.reviews.get(id).await?;
        if let Some(rating) = patch.rating {
            if !(1..=5).contains(&rating) {
                return Err(StudioError::validation("Rating must be between 1 and 5"));
            }
            review.rating = rating;
        }
        if let Some(title) = patch.title {
            review.title = title;
        }
        if let Some(comment) = patch.comment {
            review.comment = comment;
        }
        if let Some(service_type) = patch.service_type {
            review.service_type = service_type;
        }
        review.updated_at = Utc::now();
        let review = self.reviews.update(&review).await?;
        self.recompute_rating(review.photographer_id).await;
        Ok(review)
    }

    /// Delete a review, then recompute the photographer's rating.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such review exists.
    pub async fn delete(&self, id: ReviewId) -> Result<()> {
        let review = self.reviews.get(id).await?;
        self.reviews.delete(id).await?;
        self.recompute_rating(review.photographer_id).await;
        Ok(())
    }

    /// Add one helpful vote. Returns the new count.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such review exists.
    pub async fn add_helpful_vote(&self, id: ReviewId) -> Result<i64> {
        let mut review = self.reviews.get(id).await?;
        review.helpful_votes += 1;
        let review = self.reviews.update(&review).await?;
        Ok(review.helpful_votes)
    }

    /// Attach the photographer's response to a review of them.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such review exists,
    /// `StudioError::Forbidden` when the responder is not the reviewed
    /// photographer, `StudioError::Validation` when a response already
    /// exists.
    pub async fn respond(
        &self,
        id: ReviewId,
        photographer_id: PhotographerId,
        message: String,
    ) -> Result<Review> {
        let mut review = self.reviews.get(id).await?;
        if review.photographer_id != photographer_id {
            return Err(StudioError::Forbidden(
                "You can only respond to your own reviews".to_string(),
            ));
        }
        if review.photographer_response.is_some() {
            return Err(StudioError::validation(
                "Response already exists for this review",
            ));
        }
        review.photographer_response = Some(PhotographerResponse {
            message,
            responded_at: Utc::now(),
        });
        review.updated_at = Utc::now();
        self.reviews.update(&review).await
    }

    /// Aggregate statistics over a photographer's reviews.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such photographer
    /// exists.
    pub async fn stats(&self, photographer_id: PhotographerId) -> Result<ReviewStats> {
        self.photographers
            .get(photographer_id)
            .await
            .map_err(|e| e.not_found_as("Photographer"))?;
        let reviews = self.reviews.list_by_photographer(photographer_id).await?;
        Ok(ReviewStats::from_reviews(&reviews, Utc::now()))
    }

    /// Recompute the denormalized rating and review count from a full
    /// scan of the photographer's reviews. Failures are logged and
    /// swallowed so the triggering review mutation still succeeds.
    async fn recompute_rating(&self, photographer_id: PhotographerId) {
        if let Err(err) = self.try_recompute_rating(photographer_id).await {
            tracing::warn!(
                %photographer_id,
                %err,
                "rating recompute failed; review change stands"
            );
        }
    }

    async fn try_recompute_rating(&self, photographer_id: PhotographerId) -> Result<()> {
        let reviews = self.reviews.list_by_photographer(photographer_id).await?;
        let mut photographer = self.photographers.get(photographer_id).await?;
        if reviews.is_empty() {
            photographer.rating = 0.0;
            photographer.review_count = 0;
        } else {
            let sum: i64 = reviews.iter().map(|r| i64::from(r.rating)).sum();
            #[allow(clippy::cast_precision_loss)]
            let mean = sum as f64 / reviews.len() as f64;
            photographer.rating = (mean * 10.0).round() / 10.0;
            photographer.review_count = reviews.len() as i64;
        }
        self.photographers.update(&photographer).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use crate::mocks::{
        MockBookingRepository, MockPhotographerRepository, MockReviewRepository,
        MockUserRepository,
    };
    use crate::model::{Photographer, Role, User};

    struct Fixture {
        service: ReviewService,
        photographers: Arc<MockPhotographerRepository>,
        client_id: UserId,
        photographer_id: PhotographerId,
    }

    impl Fixture {
        fn new_review(&self, rating: i32) -> NewReview {
            NewReview {
                client_id: self.client_id,
                photographer_id: self.photographer_id,
                booking_id: None,
                rating,
                title: "Great".to_string(),
                comment: "Lovely shoot".to_string(),
                service_type: None,
            }
        }

        async fn rating(&self) -> (f64, i64) {
            let p = self.photographers.get(self.photographer_id).await.unwrap();
            (p.rating, p.review_count)
        }
    }

    async fn fixture() -> Fixture {
        let users = Arc::new(MockUserRepository::new());
        let photographers = Arc::new(MockPhotographerRepository::new());
        let reviews = Arc::new(MockReviewRepository::new());
        let bookings = Arc::new(MockBookingRepository::new());

        let client = users
            .create(&User::new(
                "alice".to_string(),
                "alice@example.com".to_string(),
                "pw".to_string(),
                Role::Client,
            ))
            .await
            .unwrap();
        let profile = photographers
            .create(&Photographer::with_defaults(
                UserId::new(),
                "General Photography".to_string(),
                Vec::new(),
                1,
                String::new(),
            ))
            .await
            .unwrap();

        let service = ReviewService::new(
            Arc::clone(&reviews) as Arc<dyn ReviewRepository>,
            Arc::clone(&users) as Arc<dyn UserRepository>,
            Arc::clone(&photographers) as Arc<dyn PhotographerRepository>,
            bookings,
        );
        Fixture {
            service,
            photographers,
            client_id: client.id,
            photographer_id: profile.id,
        }
    }

    #[tokio::test]
    async fn test_ratings_average_to_one_decimal() {
        let fixture = fixture().await;
        fixture
            .service
            .create(fixture.new_review(5))
            .await
            .unwrap();
        fixture
            .service
            .create(fixture.new_review(3))
            .await
            .unwrap();

        let (rating, count) = fixture.rating().await;
        assert!((rating - 4.0).abs() < f64::EPSILON);
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_deleting_last_review_resets_rating() {
        let fixture = fixture().await;
        let review = fixture
            .service
            .create(fixture.new_review(5))
            .await
            .unwrap();
        fixture.service.delete(review.id).await.unwrap();

        let (rating, count) = fixture.rating().await;
        assert!(rating.abs() < f64::EPSILON);
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_out_of_range_rating_is_rejected() {
        let fixture = fixture().await;
        let err = fixture
            .service
            .create(fixture.new_review(6))
            .await
            .unwrap_err();
        assert!(matches!(err, StudioError::Validation(_)));
    }

    #[tokio::test]
    async fn test_booking_review_requires_completed_booking() {
        let fixture = fixture().await;
        let mut input = fixture.new_review(5);
        input.booking_id = Some(BookingId::new());
        let err = fixture.service.create(input).await.unwrap_err();
        assert_eq!(err, StudioError::NotFound("Booking"));
    }

    #[tokio::test]
    async fn test_response_is_owner_only_and_single() {
        let fixture = fixture().await;
        let review = fixture
            .service
            .create(fixture.new_review(4))
            .await
            .unwrap();

        let err = fixture
            .service
            .respond(review.id, PhotographerId::new(), "thanks".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, StudioError::Forbidden(_)));

        fixture
            .service
            .respond(review.id, fixture.photographer_id, "thanks".to_string())
            .await
            .unwrap();
        let err = fixture
            .service
            .respond(review.id, fixture.photographer_id, "again".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, StudioError::Validation(_)));
    }

    #[tokio::test]
    async fn test_helpful_votes_increment() {
        let fixture = fixture().await;
        let review = fixture
            .service
            .create(fixture.new_review(4))
            .await
            .unwrap();
        assert_eq!(fixture.service.add_helpful_vote(review.id).await.unwrap(), 1);
        assert_eq!(fixture.service.add_helpful_vote(review.id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_stats_reflect_reviews() {
        let fixture = fixture().await;
        fixture
            .service
            .create(fixture.new_review(5))
            .await
            .unwrap();
        fixture
            .service
            .create(fixture.new_review(4))
            .await
            .unwrap();

        let stats = fixture.service.stats(fixture.photographer_id).await.unwrap();
        assert_eq!(stats.total_reviews, 2);
        assert!((stats.average_rating - 4.5).abs() < f64::EPSILON);
    }
}
