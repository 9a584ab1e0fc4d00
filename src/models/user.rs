use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::Utc;

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct User {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub streak: i32,
    pub created_at: chrono::DateTime<Utc>,
}

impl User {
    pub fn streak(&self) -> u32 {
        u32::try_from(self.streak).unwrap_or(0)
    }
}

pub struct NewUser {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
}
