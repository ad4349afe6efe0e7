use super::project;
use crate::{
    error::DispoError,
    shared::{
        guard::Guard,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use dispo_api_structs::get_availability_events::*;
use dispo_api_structs::dtos::SlotEventDTO;
use dispo_domain::BucketSelector;
use dispo_infra::DispoContext;

pub async fn get_availability_events_controller(
    query: web::Query<QueryParams>,
    ctx: web::Data<DispoContext>,
) -> Result<HttpResponse, DispoError> {
    let query = query.0;
    let selector = match (query.template, query.week) {
        (Some(true), _) => BucketSelector::Template,
        (_, Some(week)) => BucketSelector::Week(week),
        _ => {
            return Err(DispoError::BadClientData(
                "Expected either the `week` or the `template=true` query parameter".into(),
            ))
        }
    };
    let usecase = GetAvailabilityEventsUseCase {
        key: query.key,
        selector,
    };

    execute(usecase, &ctx)
        .await
        .map(|events| HttpResponse::Ok().json(APIResponse { events }))
}

pub struct GetAvailabilityEventsUseCase {
    pub key: String,
    pub selector: BucketSelector,
}

impl std::fmt::Debug for GetAvailabilityEventsUseCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GetAvailabilityEventsUseCase")
            .field("selector", &self.selector)
            .finish()
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetAvailabilityEventsUseCase {
    type Response = Vec<SlotEventDTO>;
    type Error = DispoError;

    const NAME: &'static str = "GetAvailabilityEvents";

    async fn execute(&mut self, ctx: &DispoContext) -> Result<Self::Response, Self::Error> {
        let intervenant = Guard::against_invalid_key(&self.key, ctx).await?;
        Ok(project(
            &intervenant.availabilities,
            self.selector,
            &ctx.config.timezone,
        ))
    }
}
