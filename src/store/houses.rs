//! Houses and membership.

use rand_core::{OsRng, RngCore};
use sqlx::sqlite::SqlitePool;

use crate::error::AppError;
use crate::models::house::{House, Member};

const INVITE_CODE_LEN: usize = 6;
// 32 symbols, so a random byte maps onto the alphabet without modulo bias.
// 0/O and 1/I are left out to keep codes readable off a housemate's screen.
const INVITE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

fn invite_code() -> String {
    let mut bytes = [0u8; INVITE_CODE_LEN];
    OsRng.fill_bytes(&mut bytes);
    bytes
        .iter()
        .map(|b| INVITE_ALPHABET[*b as usize % INVITE_ALPHABET.len()] as char)
        .collect()
}

#[derive(Clone)]
pub struct HouseStore {
    pool: SqlitePool,
}

impl HouseStore {
    pub fn new(pool: SqlitePool) -> Self {
        HouseStore { pool }
    }

    /// Insert a house under a freshly generated invite code.
    ///
    /// The UNIQUE constraint on `invite_code` decides collisions; on the
    /// off chance one happens we draw a new code and retry.
    pub async fn create(&self, name: &str) -> Result<House, AppError> {
        loop {
            let code = invite_code();
            let result = sqlx::query_as::<_, House>(
                "INSERT INTO houses (name, invite_code) VALUES (?, ?) RETURNING *",
            )
            .bind(name)
            .bind(&code)
            .fetch_one(&self.pool)
            .await;

            match result {
                Ok(house) => return Ok(house),
                Err(e) => {
                    let collision = e
                        .as_database_error()
                        .map(|db_err| db_err.is_unique_violation())
                        .unwrap_or(false);
                    if !collision {
                        return Err(AppError::Sqlx(e));
                    }
                }
            }
        }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<House>, AppError> {
        let house = sqlx::query_as::<_, House>("SELECT * FROM houses WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(house)
    }

    pub async fn find_by_invite_code(&self, code: &str) -> Result<Option<House>, AppError> {
        let house = sqlx::query_as::<_, House>("SELECT * FROM houses WHERE invite_code = ?")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(house)
    }

    /// Everyone living in the house, oldest member first.
    pub async fn members(&self, house_id: i64) -> Result<Vec<Member>, AppError> {
        let members = sqlx::query_as::<_, Member>(
            "SELECT id, name, points FROM users WHERE house_id = ? ORDER BY id",
        )
        .bind(house_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }

    /// Place a user into a house.
    pub async fn set_membership(&self, user_id: i64, house_id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET house_id = ? WHERE id = ?")
            .bind(house_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
