use crate::{
    error::DispoError,
    shared::{
        auth::create_token,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use dispo_api_structs::sign_in::*;
use dispo_domain::User;
use dispo_infra::DispoContext;

pub async fn sign_in_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<DispoContext>,
) -> Result<HttpResponse, DispoError> {
    let body = body.0;
    let usecase = SignInUseCase {
        email: body.email,
        password: body.password,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.token, res.user)))
        .map_err(DispoError::from)
}

pub struct SignInUseCase {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for SignInUseCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInUseCase")
            .field("email", &self.email)
            .finish()
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub token: String,
    pub user: User,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidCredentials,
    TokenError,
}

impl From<UseCaseError> for DispoError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidCredentials => {
                Self::Unauthorized("Invalid email or password".into())
            }
            UseCaseError::TokenError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SignInUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "SignIn";

    async fn execute(&mut self, ctx: &DispoContext) -> Result<Self::Response, Self::Error> {
        // Unknown emails and wrong passwords are indistinguishable to the caller
        let user = ctx
            .repos
            .users
            .find_by_email(&self.email)
            .await
            .ok_or(UseCaseError::InvalidCredentials)?;
        if !user.verify_password(&self.password) {
            return Err(UseCaseError::InvalidCredentials);
        }

        let token = create_token(&user, ctx.sys.now(), &ctx.config.jwt_secret)
            .map_err(|_| UseCaseError::TokenError)?;
        Ok(UseCaseRes { token, user })
    }
}
