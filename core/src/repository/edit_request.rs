//! Photo edit request repository trait.

use crate::error::Result;
use crate::ids::{EditRequestId, PhotographerId, UserId};
use crate::model::PhotoEditRequest;
use async_trait::async_trait;

/// Photo edit request storage.
#[async_trait]
pub trait EditRequestRepository: Send + Sync {
    /// Persist a new request.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    async fn create(&self, request: &PhotoEditRequest) -> Result<PhotoEditRequest>;

    /// Get a request by id.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such request exists.
    async fn get(&self, id: EditRequestId) -> Result<PhotoEditRequest>;

    /// All requests, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    async fn list(&self) -> Result<Vec<PhotoEditRequest>>;

    /// Requests created by a client, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    async fn list_by_client(&self, client_id: UserId) -> Result<Vec<PhotoEditRequest>>;

    /// Requests assigned to a photographer, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    async fn list_by_photographer(
        &self,
        photographer_id: PhotographerId,
    ) -> Result<Vec<PhotoEditRequest>>;

    /// Overwrite an existing request.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such request exists.
    async fn update(&self, request: &PhotoEditRequest) -> Result<PhotoEditRequest>;

    /// Delete a request.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such request exists.
    async fn delete(&self, id: EditRequestId) -> Result<()>;
}
