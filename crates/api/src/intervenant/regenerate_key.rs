use crate::{
    error::DispoError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use dispo_api_structs::regenerate_key::*;
use dispo_domain::{Intervenant, ID};
use dispo_infra::DispoContext;

pub async fn regenerate_key_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    body: Option<web::Json<RequestBody>>,
    ctx: web::Data<DispoContext>,
) -> Result<HttpResponse, DispoError> {
    protect_admin_route(&http_req, &ctx).await?;

    let usecase = RegenerateKeyUseCase {
        intervenant_id: path.intervenant_id,
        expires_at: body.and_then(|body| body.0.expires_at),
    };

    execute(usecase, &ctx)
        .await
        .map(|intervenant| HttpResponse::Ok().json(APIResponse::new(intervenant)))
        .map_err(DispoError::from)
}

/// Mints a new access key, the previous key is rejected from now on
#[derive(Debug)]
pub struct RegenerateKeyUseCase {
    pub intervenant_id: ID,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for DispoError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => Self::NotFound(format!(
                "The intervenant with id: {}, was not found.",
                id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RegenerateKeyUseCase {
    type Response = Intervenant;
    type Error = UseCaseError;

    const NAME: &'static str = "RegenerateKey";

    async fn execute(&mut self, ctx: &DispoContext) -> Result<Self::Response, Self::Error> {
        let mut intervenant = ctx
            .repos
            .intervenants
            .find(&self.intervenant_id)
            .await
            .ok_or(UseCaseError::NotFound(self.intervenant_id))?;

        let now = ctx.sys.now();
        let expires_at = self
            .expires_at
            .unwrap_or_else(|| Intervenant::default_expiry(now, ctx.config.key_validity_months));
        intervenant.regenerate_key(expires_at, now);

        ctx.repos
            .intervenants
            .save(&intervenant)
            .await
            .map(|_| intervenant)
            .map_err(|_| UseCaseError::StorageError)
    }
}
