//! Photo edit requests: client uploads routed to a photographer.

use crate::ids::{EditRequestId, PhotographerId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of an edit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditRequestStatus {
    Pending,
    Assigned,
    InProgress,
    Completed,
    Delivered,
    Cancelled,
}

impl EditRequestStatus {
    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Assigned => "assigned",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for EditRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditRequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "assigned" => Ok(Self::Assigned),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown edit request status: {other}")),
        }
    }
}

/// Urgency of an edit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl EditPriority {
    /// Wire name of the priority.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl FromStr for EditPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

/// Payment state of an edit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
}

impl PaymentStatus {
    /// Wire name of the payment status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Refunded => "refunded",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "refunded" => Ok(Self::Refunded),
            other => Err(format!("unknown payment status: {other}")),
        }
    }
}

/// Metadata of one uploaded photo file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoMeta {
    /// Generated filename on disk.
    pub filename: String,
    /// Name the client uploaded it under.
    pub original_name: String,
    /// Path relative to the uploads root.
    pub path: String,
    /// Size in bytes.
    pub size: i64,
    pub uploaded_at: DateTime<Utc>,
}

/// A client's request to have uploaded photos edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoEditRequest {
    pub id: EditRequestId,
    pub client_id: UserId,
    /// Assigned photographer, set by an admin.
    #[serde(default)]
    pub photographer_id: Option<PhotographerId>,
    /// Admin who made the assignment.
    #[serde(default)]
    pub assigned_by: Option<UserId>,
    pub title: String,
    pub description: String,
    /// Photos the client uploaded at creation, at most 10.
    pub original_photos: Vec<PhotoMeta>,
    /// Edited results uploaded by the photographer, at most 20.
    #[serde(default)]
    pub edited_photos: Vec<PhotoMeta>,
    pub status: EditRequestStatus,
    pub priority: EditPriority,
    #[serde(default)]
    pub estimated_cost: f64,
    #[serde(default)]
    pub final_cost: f64,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub client_notes: String,
    #[serde(default)]
    pub photographer_notes: String,
    #[serde(default)]
    pub admin_notes: String,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub delivered_at: Option<DateTime<Utc>>,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-status counts plus paid revenue, for the admin overview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequestStats {
    pub total: i64,
    pub pending: i64,
    pub assigned: i64,
    pub in_progress: i64,
    pub completed: i64,
    pub delivered: i64,
    pub cancelled: i64,
    /// Σ `final_cost` over paid requests.
    pub total_revenue: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(EditRequestStatus::InProgress.as_str(), "in-progress");
        assert_eq!(
            "in-progress".parse::<EditRequestStatus>(),
            Ok(EditRequestStatus::InProgress)
        );
        assert!("archived".parse::<EditRequestStatus>().is_err());
    }

    #[test]
    fn test_priority_and_payment_parse() {
        assert_eq!("urgent".parse::<EditPriority>(), Ok(EditPriority::Urgent));
        assert_eq!("paid".parse::<PaymentStatus>(), Ok(PaymentStatus::Paid));
    }
}
