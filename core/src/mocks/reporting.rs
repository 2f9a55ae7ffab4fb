//! Mock reporting store, computed from the other mocks' state.

use crate::error::Result;
use crate::model::{
    BookingStatus, DashboardStats, DayBucket, MonthlyTrendPoint, RecentBooking, RecentReview,
    StatusCounts, TopPhotographer,
};
use crate::repository::{
    BookingRepository, PhotographerRepository, ReportingStore, ReviewRepository, UserRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Datelike, Months, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

use super::{
    MockBookingRepository, MockPhotographerRepository, MockReviewRepository, MockUserRepository,
};

/// Reporting over the in-memory mocks. Computes the same shapes the
/// PostgreSQL store derives with SQL, scanning the mock state instead.
#[derive(Debug, Clone)]
pub struct MockReportingStore {
    users: Arc<MockUserRepository>,
    photographers: Arc<MockPhotographerRepository>,
    bookings: Arc<MockBookingRepository>,
    reviews: Arc<MockReviewRepository>,
}

impl MockReportingStore {
    /// Build the store over the shared mock repositories.
    #[must_use]
    pub fn new(
        users: Arc<MockUserRepository>,
        photographers: Arc<MockPhotographerRepository>,
        bookings: Arc<MockBookingRepository>,
        reviews: Arc<MockReviewRepository>,
    ) -> Self {
        Self {
            users,
            photographers,
            bookings,
            reviews,
        }
    }
}

#[async_trait]
impl ReportingStore for MockReportingStore {
    async fn dashboard_stats(&self, now: DateTime<Utc>) -> Result<DashboardStats> {
        let users = self.users.list().await?;
        let photographers = self.photographers.list().await?;
        let bookings = self.bookings.list().await?;
        let reviews = self.reviews.list().await?;

        let mut status_counts = StatusCounts::default();
        let mut revenue = 0.0;
        for booking in &bookings {
            match booking.status {
                BookingStatus::Pending => status_counts.pending += 1,
                BookingStatus::Confirmed => status_counts.confirmed += 1,
                BookingStatus::Completed => {
                    status_counts.completed += 1;
                    revenue += booking.price;
                }
                BookingStatus::Cancelled => status_counts.cancelled += 1,
            }
        }

        let six_months_ago = now.checked_sub_months(Months::new(6)).unwrap_or(now);
        let mut monthly: BTreeMap<(i32, u32), MonthlyTrendPoint> = BTreeMap::new();
        for booking in bookings.iter().filter(|b| b.created_at >= six_months_ago) {
            let key = (booking.created_at.year(), booking.created_at.month());
            let point = monthly.entry(key).or_insert(MonthlyTrendPoint {
                year: key.0,
                month: key.1,
                total_bookings: 0,
                total_revenue: 0.0,
                completed_bookings: 0,
            });
            point.total_bookings += 1;
            point.total_revenue += booking.price;
            if booking.status == BookingStatus::Completed {
                point.completed_bookings += 1;
            }
        }

        let mut per_photographer: BTreeMap<_, (i64, f64, i64)> = BTreeMap::new();
        for booking in &bookings {
            let entry = per_photographer
                .entry(booking.photographer_id)
                .or_insert((0, 0.0, 0));
            entry.0 += 1;
            entry.1 += booking.price;
            if booking.status == BookingStatus::Completed {
                entry.2 += 1;
            }
        }
        let mut top_photographers = Vec::new();
        for (photographer_id, (total, total_revenue, completed)) in per_photographer {
            let Some(profile) = photographers.iter().find(|p| p.id == photographer_id) else {
                continue;
            };
            let Some(owner) = users.iter().find(|u| u.id == profile.user_id) else {
                continue;
            };
            top_photographers.push(TopPhotographer {
                photographer_id,
                photographer_name: owner.username.clone(),
                photographer_email: owner.email.clone(),
                specialization: profile.specialization.clone(),
                rating: profile.rating,
                total_bookings: total,
                total_revenue,
                completed_bookings: completed,
            });
        }
        top_photographers.sort_by(|a, b| b.total_bookings.cmp(&a.total_bookings));
        top_photographers.truncate(5);

        let recent_bookings = bookings
            .iter()
            .take(10)
            .filter_map(|booking| {
                let client = users.iter().find(|u| u.id == booking.client_id)?;
                let profile = photographers.iter().find(|p| p.id == booking.photographer_id)?;
                let owner = users.iter().find(|u| u.id == profile.user_id)?;
                Some(RecentBooking {
                    id: booking.id,
                    client_name: client.username.clone(),
                    client_email: client.email.clone(),
                    photographer_name: owner.username.clone(),
                    photographer_email: owner.email.clone(),
                    service: booking.service.clone(),
                    date: booking.date,
                    status: booking.status.as_str().to_string(),
                    price: booking.price,
                    location: booking.location.clone(),
                    created_at: booking.created_at,
                })
            })
            .collect();

        let recent_reviews = reviews
            .iter()
            .take(5)
            .filter_map(|review| {
                let client = users.iter().find(|u| u.id == review.client_id)?;
                let profile = photographers.iter().find(|p| p.id == review.photographer_id)?;
                let owner = users.iter().find(|u| u.id == profile.user_id)?;
                Some(RecentReview {
                    id: review.id,
                    rating: review.rating,
                    comment: review.comment.clone(),
                    client_name: client.username.clone(),
                    photographer_name: owner.username.clone(),
                    created_at: review.created_at,
                })
            })
            .collect();

        let average_rating = if reviews.is_empty() {
            0.0
        } else {
            let sum: i64 = reviews.iter().map(|r| i64::from(r.rating)).sum();
            #[allow(clippy::cast_precision_loss)]
            let mean = sum as f64 / reviews.len() as f64;
            mean
        };

        Ok(DashboardStats {
            total_users: users.len() as i64,
            total_photographers: photographers.len() as i64,
            total_bookings: bookings.len() as i64,
            total_reviews: reviews.len() as i64,
            revenue,
            status_counts,
            monthly_stats: monthly.into_values().collect(),
            top_photographers,
            recent_bookings,
            recent_reviews,
            average_rating,
        })
    }

    async fn analytics(&self, cutoff: DateTime<Utc>) -> Result<Vec<DayBucket>> {
        let bookings = self.bookings.list().await?;
        let mut daily: BTreeMap<chrono::NaiveDate, DayBucket> = BTreeMap::new();
        for booking in bookings.iter().filter(|b| b.created_at >= cutoff) {
            let day = booking.created_at.date_naive();
            let bucket = daily.entry(day).or_insert(DayBucket {
                date: day,
                total_bookings: 0,
                total_revenue: 0.0,
                completed_bookings: 0,
            });
            bucket.total_bookings += 1;
            bucket.total_revenue += booking.price;
            if booking.status == BookingStatus::Completed {
                bucket.completed_bookings += 1;
            }
        }
        Ok(daily.into_values().collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use crate::ids::BookingId;
    use crate::model::{Booking, BookingWindow, ContactInfo, Photographer, Role, User};
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_dashboard_counts_and_revenue() {
        let users = Arc::new(MockUserRepository::new());
        let photographers = Arc::new(MockPhotographerRepository::new());
        let bookings = Arc::new(MockBookingRepository::new());
        let reviews = Arc::new(MockReviewRepository::new());

        let client = users
            .create(&User::new(
                "alice".to_string(),
                "alice@example.com".to_string(),
                "pw".to_string(),
                Role::Client,
            ))
            .await
            .unwrap();
        let owner = users
            .create(&User::new(
                "bob".to_string(),
                "bob@example.com".to_string(),
                "pw".to_string(),
                Role::Photographer,
            ))
            .await
            .unwrap();
        let profile = photographers
            .create(&Photographer::with_defaults(
                owner.id,
                "General Photography".to_string(),
                Vec::new(),
                1,
                String::new(),
            ))
            .await
            .unwrap();

        let now = Utc::now();
        for (status, price) in [
            (BookingStatus::Completed, 100.0),
            (BookingStatus::Completed, 50.0),
            (BookingStatus::Pending, 75.0),
        ] {
            bookings
                .create(&Booking {
                    id: BookingId::new(),
                    client_id: client.id,
                    photographer_id: profile.id,
                    service: "Basic Package".to_string(),
                    date: NaiveDate::from_ymd_opt(2026, 9, 12).unwrap(),
                    time_slot: BookingWindow {
                        start: "10:00".to_string(),
                        end: "12:00".to_string(),
                    },
                    duration: 2,
                    location: "Studio".to_string(),
                    notes: String::new(),
                    contact: ContactInfo::default(),
                    price,
                    status,
                    created_at: now,
                    updated_at: now,
                })
                .await
                .unwrap();
        }

        let store = MockReportingStore::new(users, photographers, bookings, reviews);
        let stats = store.dashboard_stats(now).await.unwrap();
        assert_eq!(stats.total_bookings, 3);
        assert_eq!(stats.status_counts.completed, 2);
        assert!((stats.revenue - 150.0).abs() < f64::EPSILON);
        assert_eq!(stats.top_photographers.len(), 1);
        assert_eq!(stats.top_photographers[0].total_bookings, 3);
        assert_eq!(stats.recent_bookings.len(), 3);
        assert_eq!(stats.monthly_stats.len(), 1);

        let buckets = store
            .analytics(now - chrono::Duration::days(7))
            .await
            .unwrap();
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].total_bookings, 3);
    }
}
