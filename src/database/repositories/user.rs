//! User repository implementation

use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::user::User;
use crate::utils::errors::ApiError;

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user from an already hashed password
    pub async fn create(&self, username: &str, hashed_password: &str) -> Result<User, ApiError> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, hashed_password, created_at)
            VALUES (?1, ?2, ?3)
            RETURNING id, username, hashed_password, created_at
            "#
        )
        .bind(username)
        .bind(hashed_password)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(ApiError::UsernameTaken),
            Err(e) => Err(e.into()),
        }
    }

    /// Find user by username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, hashed_password, created_at FROM users WHERE username = ?1"
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Check whether a username is already registered
    pub async fn exists(&self, username: &str) -> Result<bool, ApiError> {
        let found: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE username = ?1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    /// Count total users
    pub async fn count(&self) -> Result<i64, ApiError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
