//! Photo edit requests: assignment, status flow and payment.

use crate::error::{Result, StudioError};
use crate::ids::{EditRequestId, PhotographerId, UserId};
use crate::model::{
    EditPriority, EditRequestStats, EditRequestStatus, PaymentStatus, PhotoEditRequest, PhotoMeta,
    Role,
};
use crate::repository::{EditRequestRepository, PhotographerRepository, UserRepository};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Input for [`EditRequestService::create`].
#[derive(Debug, Clone)]
pub struct NewEditRequest {
    pub client_id: UserId,
    pub title: String,
    pub description: String,
    pub client_notes: String,
    /// Defaults to medium when absent.
    pub priority: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub original_photos: Vec<PhotoMeta>,
}

/// Status and priority filter plus pagination for
/// [`EditRequestService::list`].
#[derive(Debug, Clone, Default)]
pub struct EditRequestFilter {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// Pagination echo returned with a request page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current: u64,
    pub pages: u64,
    pub total: u64,
}

/// One page of requests.
#[derive(Debug, Clone)]
pub struct EditRequestPage {
    pub requests: Vec<PhotoEditRequest>,
    pub pagination: Pagination,
}

/// Photo edit request lifecycle.
#[derive(Clone)]
pub struct EditRequestService {
    requests: Arc<dyn EditRequestRepository>,
    users: Arc<dyn UserRepository>,
    photographers: Arc<dyn PhotographerRepository>,
}

impl EditRequestService {
    /// Wire the service to its repositories.
    #[must_use]
    pub fn new(
        requests: Arc<dyn EditRequestRepository>,
        users: Arc<dyn UserRepository>,
        photographers: Arc<dyn PhotographerRepository>,
    ) -> Self {
        Self {
            requests,
            users,
            photographers,
        }
    }

    /// Create a request in `Pending` status with the client's uploads
    /// attached.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when the client does not exist
    /// or is not a client-role account, `StudioError::Validation` for
    /// an unknown priority.
    pub async fn create(&self, input: NewEditRequest) -> Result<PhotoEditRequest> {
        let client = self
            .users
            .get(input.client_id)
            .await
            .map_err(|e| e.not_found_as("Client"))?;
        if client.role != Role::Client {
            return Err(StudioError::NotFound("Client"));
        }

        let priority = match input.priority {
            Some(p) => p
                .parse::<EditPriority>()
                .map_err(StudioError::Validation)?,
            None => EditPriority::Medium,
        };

        let now = Utc::now();
        let request = PhotoEditRequest {
            id: EditRequestId::new(),
            client_id: input.client_id,
            photographer_id: None,
            assigned_by: None,
            title: input.title,
            description: input.description,
            original_photos: input.original_photos,
            edited_photos: Vec::new(),
            status: EditRequestStatus::Pending,
            priority,
            estimated_cost: 0.0,
            final_cost: 0.0,
            deadline: input.deadline,
            client_notes: input.client_notes,
            photographer_notes: String::new(),
            admin_notes: String::new(),
            completed_at: None,
            delivered_at: None,
            payment_status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.requests.create(&request).await
    }

    /// Filtered, paginated request listing, newest first. Page
    /// defaults to 1, page size to 10.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Validation` for an unknown status or
    /// priority value.
    pub async fn list(&self, filter: EditRequestFilter) -> Result<EditRequestPage> {
        let status = filter
            .status
            .map(|s| s.parse::<EditRequestStatus>().map_err(StudioError::Validation))
            .transpose()?;
        let priority = filter
            .priority
            .map(|p| p.parse::<EditPriority>().map_err(StudioError::Validation))
            .transpose()?;

        let matching: Vec<_> = self
            .requests
            .list()
            .await?
            .into_iter()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .filter(|r| priority.is_none_or(|p| r.priority == p))
            .collect();

        let total = matching.len() as u64;
        let page = filter.page.unwrap_or(1).max(1);
        let limit = filter.limit.unwrap_or(10).max(1);
        let pages = total.div_ceil(limit);
        let requests = matching
            .into_iter()
            .skip(usize::try_from((page - 1) * limit).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect();

        Ok(EditRequestPage {
            requests,
            pagination: Pagination {
                current: page,
                pages,
                total,
            },
        })
    }

    /// Assign a photographer (admin action); the request moves to
    /// `Assigned` with the estimated cost.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when the photographer or the
    /// request does not exist.
    pub async fn assign(
        &self,
        id: EditRequestId,
        photographer_id: PhotographerId,
        assigned_by: UserId,
        estimated_cost: f64,
        deadline: Option<DateTime<Utc>>,
    ) -> Result<PhotoEditRequest> {
        self.photographers
            .get(photographer_id)
            .await
            .map_err(|e| e.not_found_as("Photographer"))?;
        let mut request = self.requests.get(id).await?;
        request.photographer_id = Some(photographer_id);
        request.assigned_by = Some(assigned_by);
        request.status = EditRequestStatus::Assigned;
        request.estimated_cost = estimated_cost;
        if deadline.is_some() {
            request.deadline = deadline;
        }
        request.updated_at = Utc::now();
        self.requests.update(&request).await
    }

    /// Move the request to a new status. `Completed` stamps
    /// `completed_at`, `Delivered` stamps `delivered_at`.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Validation` for an unknown status,
    /// `StudioError::NotFound` when no such request exists.
    pub async fn update_status(
        &self,
        id: EditRequestId,
        status: &str,
        photographer_notes: Option<String>,
        final_cost: Option<f64>,
    ) -> Result<PhotoEditRequest> {
        let status: EditRequestStatus = status.parse().map_err(StudioError::Validation)?;
        let mut request = self.requests.get(id).await?;
        request.status = status;
        if let Some(notes) = photographer_notes {
            request.photographer_notes = notes;
        }
        if let Some(cost) = final_cost {
            request.final_cost = cost;
        }
        let now = Utc::now();
        match status {
            EditRequestStatus::Completed => request.completed_at = Some(now),
            EditRequestStatus::Delivered => request.delivered_at = Some(now),
            _ => {}
        }
        request.updated_at = now;
        self.requests.update(&request).await
    }

    /// Append edited photos and mark the request completed.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such request exists.
    pub async fn add_edited_photos(
        &self,
        id: EditRequestId,
        photos: Vec<PhotoMeta>,
        photographer_notes: Option<String>,
    ) -> Result<PhotoEditRequest> {
        let mut request = self.requests.get(id).await?;
        request.edited_photos.extend(photos);
        request.status = EditRequestStatus::Completed;
        let now = Utc::now();
        request.completed_at = Some(now);
        if let Some(notes) = photographer_notes {
            request.photographer_notes = notes;
        }
        request.updated_at = now;
        self.requests.update(&request).await
    }

    /// Set the payment status. Paying for a completed request moves
    /// it straight to `Delivered`.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Validation` for an unknown payment
    /// status, `StudioError::NotFound` when no such request exists.
    pub async fn update_payment(
        &self,
        id: EditRequestId,
        payment_status: &str,
    ) -> Result<PhotoEditRequest> {
        let payment: PaymentStatus = payment_status.parse().map_err(StudioError::Validation)?;
        let mut request = self.requests.get(id).await?;
        request.payment_status = payment;
        if payment == PaymentStatus::Paid && request.status == EditRequestStatus::Completed {
            request.status = EditRequestStatus::Delivered;
            request.delivered_at = Some(Utc::now());
        }
        request.updated_at = Utc::now();
        self.requests.update(&request).await
    }

    /// Delete a request, returning it so the caller can remove its
    /// files from disk.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such request exists.
    pub async fn delete(&self, id: EditRequestId) -> Result<PhotoEditRequest> {
        let request = self.requests.get(id).await?;
        self.requests.delete(id).await?;
        Ok(request)
    }

    /// Per-status counts and paid revenue over all requests.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    pub async fn stats(&self) -> Result<EditRequestStats> {
        let requests = self.requests.list().await?;
        let mut stats = EditRequestStats {
            total: requests.len() as i64,
            ..EditRequestStats::default()
        };
        for request in &requests {
            match request.status {
                EditRequestStatus::Pending => stats.pending += 1,
                EditRequestStatus::Assigned => stats.assigned += 1,
                EditRequestStatus::InProgress => stats.in_progress += 1,
                EditRequestStatus::Completed => stats.completed += 1,
                EditRequestStatus::Delivered => stats.delivered += 1,
                EditRequestStatus::Cancelled => stats.cancelled += 1,
            }
            if request.payment_status == PaymentStatus::Paid {
                stats.total_revenue += request.final_cost;
            }
        }
        Ok(stats)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use crate::mocks::{
        MockEditRequestRepository, MockPhotographerRepository, MockUserRepository,
    };
    use crate::model::{Photographer, User};

    struct Fixture {
        service: EditRequestService,
        client_id: UserId,
        photographer_id: PhotographerId,
        admin_id: UserId,
    }

    impl Fixture {
        fn new_request(&self) -> NewEditRequest {
            NewEditRequest {
                client_id: self.client_id,
                title: "Retouch".to_string(),
                description: "Skin tones".to_string(),
                client_notes: String::new(),
                priority: None,
                deadline: None,
                original_photos: Vec::new(),
            }
        }
    }

    async fn fixture() -> Fixture {
        let users = Arc::new(MockUserRepository::new());
        let photographers = Arc::new(MockPhotographerRepository::new());
        let requests = Arc::new(MockEditRequestRepository::new());

        let client = users
            .create(&User::new(
                "alice".to_string(),
                "alice@example.com".to_string(),
                "pw".to_string(),
                Role::Client,
            ))
            .await
            .unwrap();
        let admin = users
            .create(&User::new(
                "root".to_string(),
                "root@example.com".to_string(),
                "pw".to_string(),
                Role::Admin,
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

        let service = EditRequestService::new(
            requests,
            Arc::clone(&users) as Arc<dyn UserRepository>,
            Arc::clone(&photographers) as Arc<dyn PhotographerRepository>,
        );
        Fixture {
            service,
            client_id: client.id,
            photographer_id: profile.id,
            admin_id: admin.id,
        }
    }

    #[tokio::test]
    async fn test_create_defaults_to_medium_priority_and_pending() {
        let fixture = fixture().await;
        let request = fixture.service.create(fixture.new_request()).await.unwrap();
        assert_eq!(request.priority, EditPriority::Medium);
        assert_eq!(request.status, EditRequestStatus::Pending);
        assert_eq!(request.payment_status, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn test_non_client_accounts_cannot_create() {
        let fixture = fixture().await;
        let mut input = fixture.new_request();
        input.client_id = fixture.admin_id;
        let err = fixture.service.create(input).await.unwrap_err();
        assert_eq!(err, StudioError::NotFound("Client"));
    }

    #[tokio::test]
    async fn test_assignment_moves_to_assigned() {
        let fixture = fixture().await;
        let request = fixture.service.create(fixture.new_request()).await.unwrap();
        let request = fixture
            .service
            .assign(request.id, fixture.photographer_id, fixture.admin_id, 50.0, None)
            .await
            .unwrap();
        assert_eq!(request.status, EditRequestStatus::Assigned);
        assert_eq!(request.photographer_id, Some(fixture.photographer_id));
        assert!((request.estimated_cost - 50.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_paying_a_completed_request_delivers_it() {
        let fixture = fixture().await;
        let request = fixture.service.create(fixture.new_request()).await.unwrap();
        fixture
            .service
            .update_status(request.id, "completed", None, Some(80.0))
            .await
            .unwrap();

        let request = fixture
            .service
            .update_payment(request.id, "paid")
            .await
            .unwrap();
        assert_eq!(request.status, EditRequestStatus::Delivered);
        assert!(request.delivered_at.is_some());

        let stats = fixture.service.stats().await.unwrap();
        assert!((stats.total_revenue - 80.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_list_filters_and_paginates() {
        let fixture = fixture().await;
        for _ in 0..3 {
            fixture.service.create(fixture.new_request()).await.unwrap();
        }

        let page = fixture
            .service
            .list(EditRequestFilter {
                status: Some("pending".to_string()),
                limit: Some(2),
                ..EditRequestFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(page.requests.len(), 2);
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.pages, 2);

        let err = fixture
            .service
            .list(EditRequestFilter {
                status: Some("archived".to_string()),
                ..EditRequestFilter::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StudioError::Validation(_)));
    }
}
