//! Mock settings repository.

use crate::error::Result;
use crate::model::Settings;
use crate::repository::SettingsRepository;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// In-memory settings storage for tests. Starts empty; the first read
/// materializes the defaults, mirroring the database backend.
#[derive(Debug, Clone, Default)]
pub struct MockSettingsRepository {
    settings: Arc<Mutex<Option<Settings>>>,
}

impl MockSettingsRepository {
    /// Create an empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsRepository for MockSettingsRepository {
    async fn load(&self) -> Result<Settings> {
        let mut slot = super::lock(&self.settings)?;
        Ok(slot.get_or_insert_with(Settings::default).clone())
    }

    async fn save(&self, settings: &Settings) -> Result<Settings> {
        let mut slot = super::lock(&self.settings)?;
        *slot = Some(settings.clone());
        Ok(settings.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_load_creates_defaults() {
        let repo = MockSettingsRepository::new();
        let settings = repo.load().await.unwrap();
        assert_eq!(settings, Settings::default());

        let mut changed = settings;
        changed.site_name = "New Name".to_string();
        repo.save(&changed).await.unwrap();
        assert_eq!(repo.load().await.unwrap().site_name, "New Name");
    }
}
