//! Bearer-token extractor for protected routes.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::error::AppError;
use crate::models::user::User;
use crate::AppState;

/// The authenticated caller, loaded from the `Authorization: Bearer` header.
///
/// Missing header, bad signature, expired token and a subject that no longer
/// exists all reject with the same unauthorized error.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::InvalidToken)?;
        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or(AppError::InvalidToken)?;

        let user_id = state.tokens.verify(token)?;
        let user = state
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::InvalidToken)?;

        Ok(CurrentUser(user))
    }
}
