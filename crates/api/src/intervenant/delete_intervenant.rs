use crate::{
    error::DispoError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use dispo_api_structs::delete_intervenant::*;
use dispo_domain::{Intervenant, ID};
use dispo_infra::DispoContext;

pub async fn delete_intervenant_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<DispoContext>,
) -> Result<HttpResponse, DispoError> {
    protect_admin_route(&http_req, &ctx).await?;

    let usecase = DeleteIntervenantUseCase {
        intervenant_id: path.intervenant_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|intervenant| HttpResponse::Ok().json(APIResponse::new(intervenant)))
        .map_err(DispoError::from)
}

/// Hard delete, the access key and the availabilities go with it
#[derive(Debug)]
pub struct DeleteIntervenantUseCase {
    pub intervenant_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for DispoError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => Self::NotFound(format!(
                "The intervenant with id: {}, was not found.",
                id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteIntervenantUseCase {
    type Response = Intervenant;
    type Error = UseCaseError;

    const NAME: &'static str = "DeleteIntervenant";

    async fn execute(&mut self, ctx: &DispoContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .intervenants
            .delete(&self.intervenant_id)
            .await
            .ok_or(UseCaseError::NotFound(self.intervenant_id))
    }
}
