//! Read-only reporting queries for the admin dashboard.

use crate::error::Result;
use crate::model::{DashboardStats, DayBucket};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Aggregated read queries spanning users, photographers, bookings
/// and reviews. Reflects store state at query time; no isolation
/// guarantees.
#[async_trait]
pub trait ReportingStore: Send + Sync {
    /// Everything the admin dashboard shows: totals, revenue, the
    /// six-month trend before `now`, top photographers and recent
    /// activity.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    async fn dashboard_stats(&self, now: DateTime<Utc>) -> Result<DashboardStats>;

    /// Per-day booking buckets for bookings created at or after
    /// `cutoff`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    async fn analytics(&self, cutoff: DateTime<Utc>) -> Result<Vec<DayBucket>>;
}
