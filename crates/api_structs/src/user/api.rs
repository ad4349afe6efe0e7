use crate::dtos::UserDTO;
use dispo_domain::User;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user: UserDTO,
}

impl UserResponse {
    pub fn new(user: User) -> Self {
        Self {
            user: UserDTO::new(user),
        }
    }
}

pub mod get_me {
    use super::*;

    pub type APIResponse = UserResponse;
}

pub mod register_user {
    use super::*;

    #[derive(Debug, Deserialize, Serialize, Validate)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[validate(email)]
        pub email: String,
        #[serde(default)]
        pub name: Option<String>,
        #[validate(length(min = 6))]
        pub password: String,
    }

    pub type APIResponse = UserResponse;
}

pub mod sign_in {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        /// Bearer token for the admin routes
        pub token: String,
        pub user: UserDTO,
    }

    impl APIResponse {
        pub fn new(token: String, user: User) -> Self {
            Self {
                token,
                user: UserDTO::new(user),
            }
        }
    }
}
