use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct House {
    pub id: i64,
    pub name: String,
    pub invite_code: String,
    pub created_at: chrono::NaiveDateTime,
}

/// A housemate as shown to other members of the same house.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub points: i64,
}

#[derive(Debug, Serialize)]
pub struct HouseWithMembers {
    #[serde(flatten)]
    pub house: House,
    pub members: Vec<Member>,
}

#[derive(Debug, Deserialize)]
pub struct CreateHouse {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct JoinHouse {
    pub invite_code: String,
}
