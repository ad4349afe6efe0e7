use crate::{APIResponse, BaseClient};
use dispo_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

const CREATE_USER_SECRET_HEADER: &str = "dispo-create-user-secret";

#[derive(Clone)]
pub struct AuthClient {
    base: Arc<BaseClient>,
}

pub struct RegisterUserInput {
    pub secret_code: String,
    pub email: String,
    pub name: Option<String>,
    pub password: String,
}

pub struct SignInInput {
    pub email: String,
    pub password: String,
}

impl AuthClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn register(
        &self,
        input: RegisterUserInput,
    ) -> APIResponse<register_user::APIResponse> {
        let body = register_user::RequestBody {
            email: input.email,
            name: input.name,
            password: input.password,
        };
        self.base
            .post_with_headers(
                body,
                "auth/register".into(),
                &[(CREATE_USER_SECRET_HEADER, &input.secret_code)],
                StatusCode::CREATED,
            )
            .await
    }

    pub async fn sign_in(&self, input: SignInInput) -> APIResponse<sign_in::APIResponse> {
        let body = sign_in::RequestBody {
            email: input.email,
            password: input.password,
        };
        self.base
            .post(body, "auth/signin".into(), StatusCode::OK)
            .await
    }

    pub async fn me(&self) -> APIResponse<get_me::APIResponse> {
        self.base.get("me".into(), StatusCode::OK).await
    }
}
