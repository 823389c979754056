use axum::{extract::State, http::StatusCode, Json};

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::models::house::{CreateHouse, House, HouseWithMembers, JoinHouse};
use crate::AppState;

pub async fn create_house(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateHouse>,
) -> Result<(StatusCode, Json<House>), AppError> {
    if user.house_id.is_some() {
        return Err(AppError::AlreadyInHouse);
    }

    let house = state.houses.create(&payload.name).await?;
    state.houses.set_membership(user.id, house.id).await?;

    Ok((StatusCode::CREATED, Json(house)))
}

pub async fn my_house(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<HouseWithMembers>, AppError> {
    let house_id = user.house_id.ok_or(AppError::HouseNotFound)?;
    let house = state
        .houses
        .find_by_id(house_id)
        .await?
        .ok_or(AppError::HouseNotFound)?;
    let members = state.houses.members(house.id).await?;

    Ok(Json(HouseWithMembers { house, members }))
}

pub async fn join_house(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<JoinHouse>,
) -> Result<Json<House>, AppError> {
    if user.house_id.is_some() {
        return Err(AppError::AlreadyInHouse);
    }

    // Codes are generated uppercase; accept them however the housemate typed.
    let code = payload.invite_code.trim().to_uppercase();
    let house = state
        .houses
        .find_by_invite_code(&code)
        .await?
        .ok_or(AppError::HouseNotFound)?;
    state.houses.set_membership(user.id, house.id).await?;

    Ok(Json(house))
}
