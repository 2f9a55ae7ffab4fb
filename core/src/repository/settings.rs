//! Settings repository trait.

use crate::error::Result;
use crate::model::Settings;
use async_trait::async_trait;

/// Singleton site settings storage.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Load the settings, creating the default row if none exists yet.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    async fn load(&self) -> Result<Settings>;

    /// Replace the settings.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    async fn save(&self, settings: &Settings) -> Result<Settings>;
}
