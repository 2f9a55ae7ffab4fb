//! Photographer repository trait.

use crate::error::Result;
use crate::ids::{PhotographerId, UserId};
use crate::model::Photographer;
use async_trait::async_trait;

/// Photographer profile storage.
///
/// Profiles are stored as whole aggregates: `update` replaces the
/// embedded portfolio, pricing and availability along with the scalar
/// fields.
#[async_trait]
pub trait PhotographerRepository: Send + Sync {
    /// Persist a new profile.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    async fn create(&self, photographer: &Photographer) -> Result<Photographer>;

    /// Get a profile by id.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such profile exists.
    async fn get(&self, id: PhotographerId) -> Result<Photographer>;

    /// Look up the profile owned by a user, if any.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    async fn find_by_user(&self, user_id: UserId) -> Result<Option<Photographer>>;

    /// All profiles, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    async fn list(&self) -> Result<Vec<Photographer>>;

    /// Overwrite an existing profile, embedded collections included.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such profile exists.
    async fn update(&self, photographer: &Photographer) -> Result<Photographer>;

    /// Delete a profile.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such profile exists.
    async fn delete(&self, id: PhotographerId) -> Result<()>;
}
