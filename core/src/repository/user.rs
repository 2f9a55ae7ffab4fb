//! User repository trait.

use crate::error::Result;
use crate::ids::UserId;
use crate::model::User;
use async_trait::async_trait;

/// User account storage.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Validation` when the username or email is
    /// already taken, `StudioError::Database` on storage failure.
    async fn create(&self, user: &User) -> Result<User>;

    /// Get a user by id.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such user exists.
    async fn get(&self, id: UserId) -> Result<User>;

    /// Look up a user by exact username.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Look up a user by exact email.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// All users, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    async fn list(&self) -> Result<Vec<User>>;

    /// Overwrite an existing user.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such user exists.
    async fn update(&self, user: &User) -> Result<User>;

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such user exists.
    async fn delete(&self, id: UserId) -> Result<()>;
}
