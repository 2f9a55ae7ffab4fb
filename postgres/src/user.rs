//! User accounts backed by the `users` table.

use crate::{db_err, parse_with};
use async_trait::async_trait;
use lumen_core::ids::UserId;
use lumen_core::model::{Role, User};
use lumen_core::repository::UserRepository;
use lumen_core::{Result, StudioError};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// `PostgreSQL`-backed [`UserRepository`].
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create the repository over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow) -> Result<User> {
        let role: String = row.try_get("role").map_err(db_err)?;
        Ok(User {
            id: UserId(row.try_get::<Uuid, _>("id").map_err(db_err)?),
            username: row.try_get("username").map_err(db_err)?,
            email: row.try_get("email").map_err(db_err)?,
            password: row.try_get("password").map_err(db_err)?,
            role: parse_with(role.parse::<Role>())?,
            profile_image: row.try_get("profile_image").map_err(db_err)?,
            phone: row.try_get("phone").map_err(db_err)?,
            address: row.try_get("address").map_err(db_err)?,
            created_at: row.try_get("created_at").map_err(db_err)?,
            updated_at: row.try_get("updated_at").map_err(db_err)?,
        })
    }
}

const COLUMNS: &str =
    "id, username, email, password, role, profile_image, phone, address, created_at, updated_at";

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> Result<User> {
        sqlx::query(
            r"
            INSERT INTO users (
                id, username, email, password, role, profile_image,
                phone, address, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(user.id.0)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.role.as_str())
        .bind(&user.profile_image)
        .bind(&user.phone)
        .bind(&user.address)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
            {
                StudioError::Validation(
                    "User with this email or username already exists".to_string(),
                )
            } else {
                db_err(e)
            }
        })?;
        Ok(user.clone())
    }

    async fn get(&self, id: UserId) -> Result<User> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM users WHERE id = $1"))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?
            .ok_or(StudioError::NotFound("User"))?;
        Self::row_to_user(&row)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM users WHERE username = $1"))
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn list(&self) -> Result<Vec<User>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM users ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.iter().map(Self::row_to_user).collect()
    }

    async fn update(&self, user: &User) -> Result<User> {
        let result = sqlx::query(
            r"
            UPDATE users SET
                username = $2, email = $3, password = $4, role = $5,
                profile_image = $6, phone = $7, address = $8, updated_at = $9
            WHERE id = $1
            ",
        )
        .bind(user.id.0)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.role.as_str())
        .bind(&user.profile_image)
        .bind(&user.phone)
        .bind(&user.address)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(StudioError::NotFound("User"));
        }
        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(StudioError::NotFound("User"));
        }
        Ok(())
    }
}
