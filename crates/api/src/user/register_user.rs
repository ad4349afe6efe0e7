use crate::{
    error::DispoError,
    shared::{
        auth::protect_create_user_route,
        guard::Guard,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use dispo_api_structs::register_user::*;
use dispo_domain::User;
use dispo_infra::DispoContext;

pub async fn register_user_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<DispoContext>,
) -> Result<HttpResponse, DispoError> {
    protect_create_user_route(&http_req, &ctx)?;
    Guard::against_invalid_body(&body.0)?;

    let body = body.0;
    let usecase = RegisterUserUseCase {
        email: body.email,
        name: body.name,
        password: body.password,
    };

    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Created().json(APIResponse::new(user)))
        .map_err(DispoError::from)
}

pub struct RegisterUserUseCase {
    pub email: String,
    pub name: Option<String>,
    pub password: String,
}

impl std::fmt::Debug for RegisterUserUseCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterUserUseCase")
            .field("email", &self.email)
            .field("name", &self.name)
            .finish()
    }
}

#[derive(Debug)]
pub enum UseCaseError {
    UserAlreadyExists,
    StorageError,
}

impl From<UseCaseError> for DispoError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::UserAlreadyExists => {
                Self::Conflict("A user with that email already exists".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RegisterUserUseCase {
    type Response = User;
    type Error = UseCaseError;

    const NAME: &'static str = "RegisterUser";

    async fn execute(&mut self, ctx: &DispoContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.users.find_by_email(&self.email).await.is_some() {
            return Err(UseCaseError::UserAlreadyExists);
        }

        let user = User::new(
            self.email.clone(),
            self.name.clone(),
            &self.password,
            ctx.sys.now(),
        )
        .map_err(|_| UseCaseError::StorageError)?;

        ctx.repos
            .users
            .insert(&user)
            .await
            .map(|_| user)
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn usecase() -> RegisterUserUseCase {
        RegisterUserUseCase {
            email: "admin@example.com".into(),
            name: Some("Admin".into()),
            password: "secret1".into(),
        }
    }

    #[actix_web::test]
    async fn it_registers_user_once() {
        let ctx = DispoContext::create_inmemory();
        let user = usecase().execute(&ctx).await.unwrap();
        assert!(user.verify_password("secret1"));
        assert!(ctx.repos.users.find(&user.id).await.is_some());

        let res = usecase().execute(&ctx).await;
        assert!(matches!(res, Err(UseCaseError::UserAlreadyExists)));
    }
}
