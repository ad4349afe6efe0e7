use crate::{
    error::DispoError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use dispo_api_structs::get_intervenants::*;
use dispo_domain::Intervenant;
use dispo_infra::DispoContext;

pub async fn get_intervenants_controller(
    http_req: HttpRequest,
    ctx: web::Data<DispoContext>,
) -> Result<HttpResponse, DispoError> {
    protect_admin_route(&http_req, &ctx).await?;

    execute(GetIntervenantsUseCase {}, &ctx)
        .await
        .map(|intervenants| HttpResponse::Ok().json(APIResponse::new(intervenants)))
        .map_err(DispoError::from)
}

/// The whole roster, most recently created first
#[derive(Debug)]
pub struct GetIntervenantsUseCase {}

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
impl UseCase for GetIntervenantsUseCase {
    type Response = Vec<Intervenant>;
    type Error = UseCaseError;

    const NAME: &'static str = "GetIntervenants";

    async fn execute(&mut self, ctx: &DispoContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .intervenants
            .find_all()
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
