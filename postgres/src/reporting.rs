//! Admin dashboard and analytics aggregation in SQL.

use crate::db_err;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use lumen_core::Result;
use lumen_core::ids::{BookingId, PhotographerId, ReviewId};
use lumen_core::model::{
    DashboardStats, DayBucket, MonthlyTrendPoint, RecentBooking, RecentReview, StatusCounts,
    TopPhotographer,
};
use lumen_core::repository::ReportingStore;
use sqlx::PgPool;
use uuid::Uuid;

/// `PostgreSQL`-backed [`ReportingStore`].
///
/// Runs the aggregation in SQL instead of scanning repositories, but
/// produces the same shapes as the in-memory store.
pub struct PgReportingStore {
    pool: PgPool,
}

impl PgReportingStore {
    /// Create the store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count(&self, table: &str) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(count)
    }
}

#[async_trait]
impl ReportingStore for PgReportingStore {
    async fn dashboard_stats(&self, now: DateTime<Utc>) -> Result<DashboardStats> {
        let total_users = self.count("users").await?;
        let total_photographers = self.count("photographers").await?;
        let total_bookings = self.count("bookings").await?;
        let total_reviews = self.count("reviews").await?;

        let (revenue,): (f64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(price), 0) FROM bookings WHERE status = 'completed'",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        let status_rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM bookings GROUP BY status")
                .fetch_all(&self.pool)
                .await
                .map_err(db_err)?;
        let mut status_counts = StatusCounts::default();
        for (status, count) in status_rows {
            match status.as_str() {
                "pending" => status_counts.pending = count,
                "confirmed" => status_counts.confirmed = count,
                "completed" => status_counts.completed = count,
                "cancelled" => status_counts.cancelled = count,
                _ => {}
            }
        }

        let six_months_ago = now
            .checked_sub_months(chrono::Months::new(6))
            .unwrap_or(now);
        let monthly_rows: Vec<(i32, i32, i64, f64, i64)> = sqlx::query_as(
            r"
            SELECT
                EXTRACT(YEAR FROM created_at)::INT,
                EXTRACT(MONTH FROM created_at)::INT,
                COUNT(*),
                COALESCE(SUM(price), 0),
                COUNT(*) FILTER (WHERE status = 'completed')
            FROM bookings
            WHERE created_at >= $1
            GROUP BY 1, 2
            ORDER BY 1, 2
            ",
        )
        .bind(six_months_ago)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        let monthly_stats = monthly_rows
            .into_iter()
            .map(|(year, month, bookings, total_revenue, completed)| MonthlyTrendPoint {
                year,
                month: month.unsigned_abs(),
                total_bookings: bookings,
                total_revenue,
                completed_bookings: completed,
            })
            .collect();

        let top_rows: Vec<(Uuid, String, String, String, f64, i64, f64, i64)> = sqlx::query_as(
            r"
            SELECT
                p.id, u.username, u.email, p.specialization, p.rating,
                COUNT(b.id),
                COALESCE(SUM(b.price), 0),
                COUNT(b.id) FILTER (WHERE b.status = 'completed')
            FROM bookings b
            JOIN photographers p ON p.id = b.photographer_id
            JOIN users u ON u.id = p.user_id
            GROUP BY p.id, u.username, u.email, p.specialization, p.rating
            ORDER BY COUNT(b.id) DESC
            LIMIT 5
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        let top_photographers = top_rows
            .into_iter()
            .map(
                |(id, name, email, specialization, rating, bookings, total_revenue, completed)| {
                    TopPhotographer {
                        photographer_id: PhotographerId(id),
                        photographer_name: name,
                        photographer_email: email,
                        specialization,
                        rating,
                        total_bookings: bookings,
                        total_revenue,
                        completed_bookings: completed,
                    }
                },
            )
            .collect();

        #[allow(clippy::type_complexity)]
        let booking_rows: Vec<(
            Uuid,
            String,
            String,
            String,
            String,
            String,
            NaiveDate,
            String,
            f64,
            String,
            DateTime<Utc>,
        )> = sqlx::query_as(
            r"
            SELECT
                b.id, c.username, c.email, pu.username, pu.email,
                b.service, b.date, b.status, b.price, b.location, b.created_at
            FROM bookings b
            JOIN users c ON c.id = b.client_id
            JOIN photographers p ON p.id = b.photographer_id
            JOIN users pu ON pu.id = p.user_id
            ORDER BY b.created_at DESC
            LIMIT 10
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        let recent_bookings = booking_rows
            .into_iter()
            .map(
                |(
                    id,
                    client_name,
                    client_email,
                    photographer_name,
                    photographer_email,
                    service,
                    date,
                    status,
                    price,
                    location,
                    created_at,
                )| RecentBooking {
                    id: BookingId(id),
                    client_name,
                    client_email,
                    photographer_name,
                    photographer_email,
                    service,
                    date,
                    status,
                    price,
                    location,
                    created_at,
                },
            )
            .collect();

        let review_rows: Vec<(Uuid, i32, String, String, String, DateTime<Utc>)> = sqlx::query_as(
            r"
            SELECT r.id, r.rating, r.comment, c.username, pu.username, r.created_at
            FROM reviews r
            JOIN users c ON c.id = r.client_id
            JOIN photographers p ON p.id = r.photographer_id
            JOIN users pu ON pu.id = p.user_id
            ORDER BY r.created_at DESC
            LIMIT 5
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        let recent_reviews = review_rows
            .into_iter()
            .map(
                |(id, rating, comment, client_name, photographer_name, created_at)| RecentReview {
                    id: ReviewId(id),
                    rating,
                    comment,
                    client_name,
                    photographer_name,
                    created_at,
                },
            )
            .collect();

        let (average_rating,): (f64,) =
            sqlx::query_as("SELECT COALESCE(AVG(rating), 0)::DOUBLE PRECISION FROM reviews")
                .fetch_one(&self.pool)
                .await
                .map_err(db_err)?;

        Ok(DashboardStats {
            total_users,
            total_photographers,
            total_bookings,
            total_reviews,
            revenue,
            status_counts,
            monthly_stats,
            top_photographers,
            recent_bookings,
            recent_reviews,
            average_rating,
        })
    }

    async fn analytics(&self, cutoff: DateTime<Utc>) -> Result<Vec<DayBucket>> {
        let rows: Vec<(NaiveDate, i64, f64, i64)> = sqlx::query_as(
            r"
            SELECT
                created_at::DATE,
                COUNT(*),
                COALESCE(SUM(price), 0),
                COUNT(*) FILTER (WHERE status = 'completed')
            FROM bookings
            WHERE created_at >= $1
            GROUP BY 1
            ORDER BY 1
            ",
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows
            .into_iter()
            .map(|(date, bookings, revenue, completed)| DayBucket {
                date,
                total_bookings: bookings,
                total_revenue: revenue,
                completed_bookings: completed,
            })
            .collect())
    }
}
