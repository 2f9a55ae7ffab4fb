//! Mock photographer repository.

use crate::error::{Result, StudioError};
use crate::ids::{PhotographerId, UserId};
use crate::model::Photographer;
use crate::repository::PhotographerRepository;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory photographer storage for tests.
#[derive(Debug, Clone, Default)]
pub struct MockPhotographerRepository {
    photographers: Arc<Mutex<HashMap<PhotographerId, Photographer>>>,
}

impl MockPhotographerRepository {
    /// Create an empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PhotographerRepository for MockPhotographerRepository {
    async fn create(&self, photographer: &Photographer) -> Result<Photographer> {
        super::lock(&self.photographers)?.insert(photographer.id, photographer.clone());
        Ok(photographer.clone())
    }

    async fn get(&self, id: PhotographerId) -> Result<Photographer> {
        super::lock(&self.photographers)?
            .get(&id)
            .cloned()
            .ok_or(StudioError::NotFound("Photographer"))
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Option<Photographer>> {
        Ok(super::lock(&self.photographers)?
            .values()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Photographer>> {
        let mut photographers: Vec<Photographer> = super::lock(&self.photographers)?
            .values()
            .cloned()
            .collect();
        photographers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(photographers)
    }

    async fn update(&self, photographer: &Photographer) -> Result<Photographer> {
        let mut photographers = super::lock(&self.photographers)?;
        if !photographers.contains_key(&photographer.id) {
            return Err(StudioError::NotFound("Photographer"));
        }
        photographers.insert(photographer.id, photographer.clone());
        Ok(photographer.clone())
    }

    async fn delete(&self, id: PhotographerId) -> Result<()> {
        super::lock(&self.photographers)?
            .remove(&id)
            .map(|_| ())
            .ok_or(StudioError::NotFound("Photographer"))
    }
}
