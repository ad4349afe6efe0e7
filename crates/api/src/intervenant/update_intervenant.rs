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
use dispo_api_structs::update_intervenant::*;
use dispo_domain::{Intervenant, ID};
use dispo_infra::DispoContext;

pub async fn update_intervenant_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<DispoContext>,
) -> Result<HttpResponse, DispoError> {
    protect_admin_route(&http_req, &ctx).await?;
    Guard::against_invalid_body(&body.0)?;

    let body = body.0;
    let usecase = UpdateIntervenantUseCase {
        intervenant_id: path.intervenant_id,
        firstname: body.firstname,
        lastname: body.lastname,
        email: body.email,
        expires_at: body.expires_at,
    };

    execute(usecase, &ctx)
        .await
        .map(|intervenant| HttpResponse::Ok().json(APIResponse::new(intervenant)))
        .map_err(DispoError::from)
}

/// Edits the profile of an intervenant, fields left as `None` are kept
#[derive(Debug)]
pub struct UpdateIntervenantUseCase {
    pub intervenant_id: ID,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    DuplicateEmail(String),
    StorageError,
}

impl From<UseCaseError> for DispoError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => Self::NotFound(format!(
                "The intervenant with id: {}, was not found.",
                id
            )),
            UseCaseError::DuplicateEmail(email) => Self::Conflict(format!(
                "An intervenant with the email: {} already exists",
                email
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateIntervenantUseCase {
    type Response = Intervenant;
    type Error = UseCaseError;

    const NAME: &'static str = "UpdateIntervenant";

    async fn execute(&mut self, ctx: &DispoContext) -> Result<Self::Response, Self::Error> {
        let mut intervenant = ctx
            .repos
            .intervenants
            .find(&self.intervenant_id)
            .await
            .ok_or(UseCaseError::NotFound(self.intervenant_id))?;

        if let Some(email) = &self.email {
            if *email != intervenant.email {
                if let Some(other) = ctx.repos.intervenants.find_by_email(email).await {
                    if other.id != intervenant.id {
                        return Err(UseCaseError::DuplicateEmail(email.clone()));
                    }
                }
                intervenant.email = email.clone();
            }
        }
        if let Some(firstname) = &self.firstname {
            intervenant.firstname = firstname.clone();
        }
        if let Some(lastname) = &self.lastname {
            intervenant.lastname = lastname.clone();
        }
        if let Some(expires_at) = self.expires_at {
            intervenant.expires_at = expires_at;
        }
        intervenant.updated_at = ctx.sys.now();

        ctx.repos
            .intervenants
            .save(&intervenant)
            .await
            .map(|_| intervenant)
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Duration;

    async fn insert(ctx: &DispoContext, email: &str) -> Intervenant {
        let now = ctx.sys.now();
        let intervenant = Intervenant::new(
            "Ada".into(),
            "Lovelace".into(),
            email.into(),
            now + Duration::days(30),
            now,
        );
        ctx.repos.intervenants.insert(&intervenant).await.unwrap();
        intervenant
    }

    #[actix_web::test]
    async fn it_updates_given_fields_only() {
        let ctx = DispoContext::create_inmemory();
        let intervenant = insert(&ctx, "ada@example.com").await;

        let mut usecase = UpdateIntervenantUseCase {
            intervenant_id: intervenant.id,
            firstname: Some("Augusta".into()),
            lastname: None,
            email: Some("augusta@example.com".into()),
            expires_at: None,
        };
        let updated = usecase.execute(&ctx).await.unwrap();
        assert_eq!(updated.firstname, "Augusta");
        assert_eq!(updated.lastname, "Lovelace");
        assert_eq!(updated.email, "augusta@example.com");
        assert_eq!(updated.key, intervenant.key);
        assert_eq!(updated.expires_at, intervenant.expires_at);

        let stored = ctx.repos.intervenants.find(&intervenant.id).await.unwrap();
        assert_eq!(stored.email, "augusta@example.com");
    }

    #[actix_web::test]
    async fn it_rejects_taken_email() {
        let ctx = DispoContext::create_inmemory();
        let intervenant = insert(&ctx, "ada@example.com").await;
        insert(&ctx, "grace@example.com").await;

        let mut usecase = UpdateIntervenantUseCase {
            intervenant_id: intervenant.id,
            firstname: None,
            lastname: None,
            email: Some("grace@example.com".into()),
            expires_at: None,
        };
        let res = usecase.execute(&ctx).await;
        assert!(matches!(res, Err(UseCaseError::DuplicateEmail(_))));
    }

    #[actix_web::test]
    async fn it_fails_for_unknown_intervenant() {
        let ctx = DispoContext::create_inmemory();
        let mut usecase = UpdateIntervenantUseCase {
            intervenant_id: Default::default(),
            firstname: Some("Nobody".into()),
            lastname: None,
            email: None,
            expires_at: None,
        };
        let res = usecase.execute(&ctx).await;
        assert!(matches!(res, Err(UseCaseError::NotFound(_))));
    }
}
