use chrono::{DateTime, Utc};
use dispo_domain::{User, ID};
use serde::{Deserialize, Serialize};

/// An admin `User` as exposed to clients, the password hash never leaves the server
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    pub id: ID,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserDTO {
    pub fn new(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            created_at: user.created_at,
        }
    }
}
