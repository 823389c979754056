pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod rest;
pub mod store;

use auth::{AuthService, TokenIssuer};
use store::{HouseStore, UserStore};

/// Shared per-request state: the composed services plus the stores and token
/// issuer the extractor needs directly.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub users: UserStore,
    pub houses: HouseStore,
    pub tokens: TokenIssuer,
}

impl AppState {
    /// Explicit composition root: build the leaves, then wire the services
    /// from them.
    pub fn new(pool: sqlx::SqlitePool, jwt_secret: &str) -> Result<Self, error::AppError> {
        let users = UserStore::new(pool.clone());
        let houses = HouseStore::new(pool);
        let tokens = TokenIssuer::new(jwt_secret);
        let auth = AuthService::new(users.clone(), tokens.clone())?;
        Ok(AppState {
            auth,
            users,
            houses,
            tokens,
        })
    }
}
