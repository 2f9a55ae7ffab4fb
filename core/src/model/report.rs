//! Read-only reporting shapes for the admin dashboard.

use crate::ids::{BookingId, PhotographerId, ReviewId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How far back the analytics query reaches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsPeriod {
    /// Trailing 7 days.
    Week,
    /// Trailing calendar month (the default).
    #[default]
    Month,
    /// Trailing calendar year.
    Year,
}

impl FromStr for AnalyticsPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(format!("unknown period: {other}")),
        }
    }
}

impl AnalyticsPeriod {
    /// The inclusive cutoff timestamp for this period, relative to `now`.
    #[must_use]
    pub fn cutoff(self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::Week => now - chrono::Duration::days(7),
            Self::Month => now - chrono::Duration::days(30),
            Self::Year => now - chrono::Duration::days(365),
        }
    }
}

/// Booking counts per lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub pending: i64,
    pub confirmed: i64,
    pub completed: i64,
    pub cancelled: i64,
}

/// Booking volume and revenue for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrendPoint {
    pub year: i32,
    pub month: u32,
    pub total_bookings: i64,
    pub total_revenue: f64,
    pub completed_bookings: i64,
}

/// A photographer ranked by booking volume, with identity joined in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPhotographer {
    pub photographer_id: PhotographerId,
    pub photographer_name: String,
    pub photographer_email: String,
    pub specialization: String,
    pub rating: f64,
    pub total_bookings: i64,
    pub total_revenue: f64,
    pub completed_bookings: i64,
}

/// A recent booking with client and photographer names joined in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentBooking {
    pub id: BookingId,
    pub client_name: String,
    pub client_email: String,
    pub photographer_name: String,
    pub photographer_email: String,
    pub service: String,
    pub date: NaiveDate,
    pub status: String,
    pub price: f64,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

/// A recent review with participant names joined in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentReview {
    pub id: ReviewId,
    pub rating: i32,
    pub comment: String,
    pub client_name: String,
    pub photographer_name: String,
    pub created_at: DateTime<Utc>,
}

/// Everything the admin dashboard shows in one payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: i64,
    pub total_photographers: i64,
    pub total_bookings: i64,
    pub total_reviews: i64,
    /// Σ price over completed bookings.
    pub revenue: f64,
    pub status_counts: StatusCounts,
    /// Trailing six months, oldest first.
    pub monthly_stats: Vec<MonthlyTrendPoint>,
    /// Top five photographers by booking count.
    pub top_photographers: Vec<TopPhotographer>,
    /// Ten most recent bookings.
    pub recent_bookings: Vec<RecentBooking>,
    /// Five most recent reviews.
    pub recent_reviews: Vec<RecentReview>,
    /// Mean over all reviews, 0 when there are none.
    pub average_rating: f64,
}

/// Booking volume and revenue for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBucket {
    pub date: NaiveDate,
    pub total_bookings: i64,
    pub total_revenue: f64,
    pub completed_bookings: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_parses_with_month_default() {
        assert_eq!("week".parse::<AnalyticsPeriod>(), Ok(AnalyticsPeriod::Week));
        assert_eq!(AnalyticsPeriod::default(), AnalyticsPeriod::Month);
        assert!("quarter".parse::<AnalyticsPeriod>().is_err());
    }
}
