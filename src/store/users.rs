//! User records. This store owns the email-uniqueness invariant.

use sqlx::sqlite::SqlitePool;

use crate::error::AppError;
use crate::models::user::User;

#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        UserStore { pool }
    }

    /// Lookup by normalized email. Callers normalize before calling; the
    /// stored value is always the normalized form.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Insert a new user. The UNIQUE constraint on `email` decides the race
    /// between concurrent registrations of the same address, so a violation
    /// here surfaces as the same duplicate-email error the pre-check gives.
    pub async fn create(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, name, password_hash) VALUES (?, ?, ?) RETURNING *",
        )
        .bind(email)
        .bind(name)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::DuplicateEmail;
                }
            }
            AppError::Sqlx(e)
        })?;
        Ok(user)
    }
}
