//! Testimonials: curated reviews promoted to the public site.

use crate::ids::{PhotographerId, ReviewId, TestimonialId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A review promoted to a site testimonial. At most one per review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: TestimonialId,
    pub client_id: UserId,
    pub photographer_id: PhotographerId,
    /// The promoted review.
    pub review_id: ReviewId,
    pub title: String,
    /// Copied from the review comment at promotion time.
    pub content: String,
    /// Copied from the review rating at promotion time.
    pub rating: i32,
    /// Inactive testimonials are hidden from all public listings.
    pub is_active: bool,
    /// Featured testimonials appear on the landing page.
    pub is_featured: bool,
    /// Admin who featured it, stamped when featuring is turned on.
    #[serde(default)]
    pub approved_by: Option<UserId>,
    #[serde(default)]
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
