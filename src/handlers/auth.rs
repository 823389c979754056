use axum::{extract::State, http::StatusCode, Json};

use crate::error::AppError;
use crate::models::user::{AuthResponse, CreateUser, LoginPayload, PublicUser};
use crate::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CreateUser>,
) -> Result<(StatusCode, Json<PublicUser>), AppError> {
    let user = state.auth.register(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    let access_token = state.auth.login(payload).await?;
    Ok(Json(AuthResponse { access_token }))
}
