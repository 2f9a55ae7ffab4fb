//! Reviews, photographer responses and aggregate statistics.

use crate::ids::{BookingId, PhotographerId, ReviewId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A photographer's public reply to a review. At most one per review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotographerResponse {
    pub message: String,
    pub responded_at: DateTime<Utc>,
}

/// A client's review of a photographer.
///
/// Feeds the photographer's denormalized `rating` and `review_count`,
/// recomputed after every review mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub client_id: UserId,
    pub photographer_id: PhotographerId,
    /// Set when the review was left against a completed booking; at most
    /// one review per booking.
    #[serde(default)]
    pub booking_id: Option<BookingId>,
    /// Star rating, 1 through 5.
    pub rating: i32,
    pub title: String,
    pub comment: String,
    /// Which service the review concerns.
    pub service_type: String,
    #[serde(default)]
    pub helpful_votes: i64,
    /// True when the review is backed by a booking.
    pub is_verified: bool,
    #[serde(default)]
    pub photographer_response: Option<PhotographerResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Count of reviews at one star value, for the breakdown histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingBucket {
    pub rating: i32,
    pub count: i64,
}

/// Aggregate review statistics for one photographer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub total_reviews: i64,
    /// Mean rating rounded to one decimal, 0 when there are no reviews.
    pub average_rating: f64,
    /// One bucket per star value, five stars first, all five present.
    pub rating_breakdown: Vec<RatingBucket>,
    pub verified_reviews: i64,
    /// Reviews created in the trailing 30 days.
    pub recent_reviews: i64,
    /// Percentage of reviews carrying a photographer response, one
    /// decimal place.
    pub response_rate: f64,
}

impl ReviewStats {
    /// Compute the stats over a photographer's reviews.
    #[must_use]
    pub fn from_reviews(reviews: &[Review], now: DateTime<Utc>) -> Self {
        let total = reviews.len() as i64;
        let average = if reviews.is_empty() {
            0.0
        } else {
            let sum: i64 = reviews.iter().map(|r| i64::from(r.rating)).sum();
            #[allow(clippy::cast_precision_loss)]
            let mean = sum as f64 / reviews.len() as f64;
            (mean * 10.0).round() / 10.0
        };
        let breakdown = (1..=5)
            .rev()
            .map(|star| RatingBucket {
                rating: star,
                count: reviews.iter().filter(|r| r.rating == star).count() as i64,
            })
            .collect();
        let verified = reviews.iter().filter(|r| r.is_verified).count() as i64;
        let cutoff = now - chrono::Duration::days(30);
        let recent = reviews.iter().filter(|r| r.created_at >= cutoff).count() as i64;
        let responded = reviews
            .iter()
            .filter(|r| r.photographer_response.is_some())
            .count() as i64;
        let response_rate = if total == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let rate = responded as f64 / total as f64 * 100.0;
            (rate * 10.0).round() / 10.0
        };
        Self {
            total_reviews: total,
            average_rating: average,
            rating_breakdown: breakdown,
            verified_reviews: verified,
            recent_reviews: recent,
            response_rate,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;

    fn review(rating: i32) -> Review {
        Review {
            id: ReviewId::new(),
            client_id: UserId::new(),
            photographer_id: PhotographerId::new(),
            booking_id: None,
            rating,
            title: "t".to_string(),
            comment: "c".to_string(),
            service_type: "General Photography".to_string(),
            helpful_votes: 0,
            is_verified: false,
            photographer_response: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_stats_empty() {
        let stats = ReviewStats::from_reviews(&[], Utc::now());
        assert_eq!(stats.total_reviews, 0);
        assert!((stats.average_rating).abs() < f64::EPSILON);
        assert_eq!(stats.rating_breakdown.len(), 5);
        assert!((stats.response_rate).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stats_mean_rounds_to_one_decimal() {
        let stats = ReviewStats::from_reviews(&[review(5), review(3)], Utc::now());
        assert_eq!(stats.total_reviews, 2);
        assert!((stats.average_rating - 4.0).abs() < f64::EPSILON);

        let stats = ReviewStats::from_reviews(&[review(5), review(4), review(4)], Utc::now());
        assert!((stats.average_rating - 4.3).abs() < f64::EPSILON);
    }

    proptest::proptest! {
        #[test]
        fn stats_invariants_hold_for_any_ratings(ratings in proptest::collection::vec(1..=5i32, 0..40)) {
            let reviews: Vec<Review> = ratings.iter().copied().map(review).collect();
            let stats = ReviewStats::from_reviews(&reviews, Utc::now());

            proptest::prop_assert_eq!(stats.total_reviews, reviews.len() as i64);
            let bucket_sum: i64 = stats.rating_breakdown.iter().map(|b| b.count).sum();
            proptest::prop_assert_eq!(bucket_sum, stats.total_reviews);
            if reviews.is_empty() {
                proptest::prop_assert!(stats.average_rating.abs() < f64::EPSILON);
            } else {
                proptest::prop_assert!(stats.average_rating >= 1.0 && stats.average_rating <= 5.0);
            }
        }
    }

    #[test]
    fn test_stats_breakdown_and_response_rate() {
        let mut with_reply = review(5);
        with_reply.photographer_response = Some(PhotographerResponse {
            message: "thanks".to_string(),
            responded_at: Utc::now(),
        });
        let stats = ReviewStats::from_reviews(&[with_reply, review(5), review(2)], Utc::now());
        assert_eq!(stats.rating_breakdown[0].rating, 5);
        assert_eq!(stats.rating_breakdown[0].count, 2);
        assert!((stats.response_rate - 33.3).abs() < f64::EPSILON);
    }
}
