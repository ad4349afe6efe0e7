use crate::{
    error::DispoError,
    shared::{
        auth::protect_admin_route,
        guard::Guard,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use dispo_api_structs::create_intervenant::*;
use dispo_domain::Intervenant;
use dispo_infra::DispoContext;

pub async fn create_intervenant_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<DispoContext>,
) -> Result<HttpResponse, DispoError> {
    protect_admin_route(&http_req, &ctx).await?;
    Guard::against_invalid_body(&body.0)?;

    let body = body.0;
    let usecase = CreateIntervenantUseCase {
        firstname: body.firstname,
        lastname: body.lastname,
        email: body.email,
        expires_at: body.expires_at,
    };

    execute(usecase, &ctx)
        .await
        .map(|intervenant| HttpResponse::Created().json(APIResponse::new(intervenant)))
        .map_err(DispoError::from)
}

#[derive(Debug)]
pub struct CreateIntervenantUseCase {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    DuplicateEmail(String),
}

impl From<UseCaseError> for DispoError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::DuplicateEmail(email) => Self::Conflict(format!(
                "An intervenant with the email: {} already exists",
                email
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateIntervenantUseCase {
    type Response = Intervenant;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateIntervenant";

    async fn execute(&mut self, ctx: &DispoContext) -> Result<Self::Response, Self::Error> {
        if ctx
            .repos
            .intervenants
            .find_by_email(&self.email)
            .await
            .is_some()
        {
            return Err(UseCaseError::DuplicateEmail(self.email.clone()));
        }

        let now = ctx.sys.now();
        let expires_at = self
            .expires_at
            .unwrap_or_else(|| Intervenant::default_expiry(now, ctx.config.key_validity_months));
        let intervenant = Intervenant::new(
            self.firstname.clone(),
            self.lastname.clone(),
            self.email.clone(),
            expires_at,
            now,
        );

        ctx.repos
            .intervenants
            .insert(&intervenant)
            .await
            .map(|_| intervenant)
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use dispo_domain::AvailabilityDocument;

    fn usecase(email: &str) -> CreateIntervenantUseCase {
        CreateIntervenantUseCase {
            firstname: "Ada".into(),
            lastname: "Lovelace".into(),
            email: email.into(),
            expires_at: None,
        }
    }

    #[actix_web::test]
    async fn it_creates_intervenant_with_default_expiry() {
        let ctx = DispoContext::create_inmemory();
        let intervenant = usecase("ada@example.com").execute(&ctx).await.unwrap();

        assert!(intervenant.key.starts_with("ik_"));
        assert_eq!(intervenant.availabilities, AvailabilityDocument::empty());
        assert_eq!(
            intervenant.expires_at,
            Intervenant::default_expiry(intervenant.created_at, ctx.config.key_validity_months)
        );
        assert!(ctx.repos.intervenants.find(&intervenant.id).await.is_some());
    }

    #[actix_web::test]
    async fn it_rejects_duplicate_email() {
        let ctx = DispoContext::create_inmemory();
        assert!(usecase("ada@example.com").execute(&ctx).await.is_ok());
        let res = usecase("ada@example.com").execute(&ctx).await;
        assert!(matches!(res, Err(UseCaseError::DuplicateEmail(_))));
        assert_eq!(ctx.repos.intervenants.find_all().await.unwrap().len(), 1);
    }
}
