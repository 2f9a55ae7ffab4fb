//! Mock photo edit request repository.

use crate::error::{Result, StudioError};
use crate::ids::{EditRequestId, PhotographerId, UserId};
use crate::model::PhotoEditRequest;
use crate::repository::EditRequestRepository;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory photo edit request storage for tests.
#[derive(Debug, Clone, Default)]
pub struct MockEditRequestRepository {
    requests: Arc<Mutex<HashMap<EditRequestId, PhotoEditRequest>>>,
}

impl MockEditRequestRepository {
    /// Create an empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted(mut requests: Vec<PhotoEditRequest>) -> Vec<PhotoEditRequest> {
    requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    requests
}

#[async_trait]
impl EditRequestRepository for MockEditRequestRepository {
    async fn create(&self, request: &PhotoEditRequest) -> Result<PhotoEditRequest> {
        super::lock(&self.requests)?.insert(request.id, request.clone());
        Ok(request.clone())
    }

    async fn get(&self, id: EditRequestId) -> Result<PhotoEditRequest> {
        super::lock(&self.requests)?
            .get(&id)
            .cloned()
            .ok_or(StudioError::NotFound("Photo edit request"))
    }

    async fn list(&self) -> Result<Vec<PhotoEditRequest>> {
        Ok(sorted(
            super::lock(&self.requests)?.values().cloned().collect(),
        ))
    }

    async fn list_by_client(&self, client_id: UserId) -> Result<Vec<PhotoEditRequest>> {
        Ok(sorted(
            super::lock(&self.requests)?
                .values()
                .filter(|r| r.client_id == client_id)
                .cloned()
                .collect(),
        ))
    }

    async fn list_by_photographer(
        &self,
        photographer_id: PhotographerId,
    ) -> Result<Vec<PhotoEditRequest>> {
        Ok(sorted(
            super::lock(&self.requests)?
                .values()
                .filter(|r| r.photographer_id == Some(photographer_id))
                .cloned()
                .collect(),
        ))
    }

    async fn update(&self, request: &PhotoEditRequest) -> Result<PhotoEditRequest> {
        let mut requests = super::lock(&self.requests)?;
        if !requests.contains_key(&request.id) {
            return Err(StudioError::NotFound("Photo edit request"));
        }
        requests.insert(request.id, request.clone());
        Ok(request.clone())
    }

    async fn delete(&self, id: EditRequestId) -> Result<()> {
        super::lock(&self.requests)?
            .remove(&id)
            .map(|_| ())
            .ok_or(StudioError::NotFound("Photo edit request"))
    }
}
