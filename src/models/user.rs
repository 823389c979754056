use serde::{Deserialize, Serialize};

/// Internal user record as stored. Not serializable on purpose: everything
/// that leaves the API goes through [`PublicUser`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub house_id: Option<i64>,
    pub points: i64,
    pub created_at: chrono::NaiveDateTime,
}

/// Outward projection of a user, built field by field so a new column on
/// `users` can never leak by accident.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub created_at: chrono::NaiveDateTime,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        PublicUser {
            id: user.id,
            email: user.email,
            name: user.name,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
}
