//! Registration and login orchestration.

use crate::auth::{password, TokenIssuer};
use crate::error::AppError;
use crate::models::user::{CreateUser, LoginPayload, PublicUser};
use crate::store::UserStore;

/// Emails compare case-insensitively; one normalized form is stored and every
/// lookup goes through the same normalization.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[derive(Clone)]
pub struct AuthService {
    users: UserStore,
    tokens: TokenIssuer,
    // Verified against when the email is unknown, so that path costs as much
    // as a real password check and login timing does not reveal which emails
    // are registered.
    dummy_hash: String,
}

impl AuthService {
    pub fn new(users: UserStore, tokens: TokenIssuer) -> Result<Self, AppError> {
        let dummy_hash = password::hash("decoy-password")?;
        Ok(AuthService {
            users,
            tokens,
            dummy_hash,
        })
    }

    /// Create a new user and return its public projection.
    ///
    /// The existence pre-check keeps us from paying for a hash when the email
    /// is already taken; the UNIQUE constraint on `users.email` is what
    /// actually decides races between concurrent registrations.
    pub async fn register(&self, payload: CreateUser) -> Result<PublicUser, AppError> {
        let email = normalize_email(&payload.email);
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = password::hash(&payload.password)?;
        let user = self
            .users
            .create(&email, &payload.name, &password_hash)
            .await?;

        Ok(PublicUser::from(user))
    }

    /// Verify credentials and issue an access token.
    ///
    /// Unknown email and wrong password produce the identical error.
    pub async fn login(&self, payload: LoginPayload) -> Result<String, AppError> {
        let email = normalize_email(&payload.email);
        match self.users.find_by_email(&email).await? {
            Some(user) if password::verify(&payload.password, &user.password_hash) => {
                self.tokens.issue(user.id)
            }
            Some(_) => Err(AppError::InvalidCredentials),
            None => {
                password::verify(&payload.password, &self.dummy_hash);
                Err(AppError::InvalidCredentials)
            }
        }
    }
}
