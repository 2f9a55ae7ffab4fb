//! Mock user repository.

use crate::error::{Result, StudioError};
use crate::ids::UserId;
use crate::model::User;
use crate::repository::UserRepository;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory user storage for tests.
#[derive(Debug, Clone, Default)]
pub struct MockUserRepository {
    users: Arc<Mutex<HashMap<UserId, User>>>,
}

impl MockUserRepository {
    /// Create an empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn create(&self, user: &User) -> Result<User> {
        let mut users = super::lock(&self.users)?;
        if users
            .values()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(StudioError::validation(
                "User with this email or username already exists",
            ));
        }
        users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn get(&self, id: UserId) -> Result<User> {
        super::lock(&self.users)?
            .get(&id)
            .cloned()
            .ok_or(StudioError::NotFound("User"))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(super::lock(&self.users)?
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(super::lock(&self.users)?
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>> {
        let mut users: Vec<User> = super::lock(&self.users)?.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn update(&self, user: &User) -> Result<User> {
        let mut users = super::lock(&self.users)?;
        if !users.contains_key(&user.id) {
            return Err(StudioError::NotFound("User"));
        }
        users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> Result<()> {
        super::lock(&self.users)?
            .remove(&id)
            .map(|_| ())
            .ok_or(StudioError::NotFound("User"))
    }
}
