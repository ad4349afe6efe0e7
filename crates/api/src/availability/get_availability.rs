use crate::{
    error::DispoError,
    shared::{
        guard::Guard,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use dispo_api_structs::get_availability::*;
use dispo_domain::Intervenant;
use dispo_infra::DispoContext;

pub async fn get_availability_controller(
    query: web::Query<QueryParams>,
    ctx: web::Data<DispoContext>,
) -> Result<HttpResponse, DispoError> {
    let usecase = GetAvailabilityUseCase {
        key: query.0.key,
    };

    execute(usecase, &ctx)
        .await
        .map(|intervenant| HttpResponse::Ok().json(APIResponse::new(intervenant)))
}

/// Opens the personal calendar of the holder of an access key
pub struct GetAvailabilityUseCase {
    pub key: String,
}

// Keys are credentials and stay out of the logs
impl std::fmt::Debug for GetAvailabilityUseCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GetAvailabilityUseCase").finish()
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetAvailabilityUseCase {
    type Response = Intervenant;
    type Error = DispoError;

    const NAME: &'static str = "GetAvailability";

    async fn execute(&mut self, ctx: &DispoContext) -> Result<Self::Response, Self::Error> {
        Guard::against_invalid_key(&self.key, ctx).await
    }
}
