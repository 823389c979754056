use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route(
            "/houses",
            post(handlers::houses::create_house).get(handlers::houses::my_house),
        )
        .route("/houses/join", post(handlers::houses::join_house))
        .with_state(state)
}
