use crate::{
    error::DispoError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use dispo_api_structs::regenerate_keys::*;
use dispo_domain::Intervenant;
use dispo_infra::DispoContext;

pub async fn regenerate_keys_controller(
    http_req: HttpRequest,
    body: Option<web::Json<RequestBody>>,
    ctx: web::Data<DispoContext>,
) -> Result<HttpResponse, DispoError> {
    protect_admin_route(&http_req, &ctx).await?;

    let usecase = RegenerateKeysUseCase {
        expires_at: body.and_then(|body| body.0.expires_at),
    };

    execute(usecase, &ctx)
        .await
        .map(|intervenants| HttpResponse::Ok().json(APIResponse::new(intervenants)))
        .map_err(DispoError::from)
}

/// Mints a new access key for every intervenant, all sharing the same expiry
#[derive(Debug)]
pub struct RegenerateKeysUseCase {
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for DispoError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RegenerateKeysUseCase {
    type Response = Vec<Intervenant>;
    type Error = UseCaseError;

    const NAME: &'static str = "RegenerateKeys";

    async fn execute(&mut self, ctx: &DispoContext) -> Result<Self::Response, Self::Error> {
        let mut intervenants = ctx
            .repos
            .intervenants
            .find_all()
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let now = ctx.sys.now();
        let expires_at = self
            .expires_at
            .unwrap_or_else(|| Intervenant::default_expiry(now, ctx.config.key_validity_months));
        for intervenant in intervenants.iter_mut() {
            intervenant.regenerate_key(expires_at, now);
            ctx.repos
                .intervenants
                .save(intervenant)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
        }

        Ok(intervenants)
    }
}
