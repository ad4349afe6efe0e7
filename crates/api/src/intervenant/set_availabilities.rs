use crate::{
    error::DispoError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use dispo_api_structs::set_availabilities::*;
use dispo_domain::{AvailabilityDocument, Intervenant, SlotViolation, ID};
use dispo_infra::DispoContext;
use tracing::warn;

pub async fn set_availabilities_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<DispoContext>,
) -> Result<HttpResponse, DispoError> {
    protect_admin_route(&http_req, &ctx).await?;

    let usecase = SetAvailabilitiesUseCase {
        intervenant_id: path.intervenant_id,
        availabilities: body.0.availabilities,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.intervenant, res.violations)))
        .map_err(DispoError::from)
}

/// Replaces the whole availability document of an intervenant.
///
/// Slots that can not be drawn on a calendar are rejected. Slots breaking the
/// working hours conventions are stored and reported back.
#[derive(Debug)]
pub struct SetAvailabilitiesUseCase {
    pub intervenant_id: ID,
    pub availabilities: AvailabilityDocument,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub intervenant: Intervenant,
    pub violations: Vec<SlotViolation>,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidSlots(Vec<SlotViolation>),
    StorageError,
}

impl From<UseCaseError> for DispoError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => Self::NotFound(format!(
                "The intervenant with id: {}, was not found.",
                id
            )),
            UseCaseError::InvalidSlots(violations) => {
                let details = violations
                    .iter()
                    .map(|v| format!("{}[{}]: {:?}", v.bucket, v.index, v.kind))
                    .collect::<Vec<_>>()
                    .join(", ");
                Self::BadClientData(format!("Invalid slots in availabilities: {}", details))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetAvailabilitiesUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "SetAvailabilities";

    async fn execute(&mut self, ctx: &DispoContext) -> Result<Self::Response, Self::Error> {
        let mut intervenant = ctx
            .repos
            .intervenants
            .find(&self.intervenant_id)
            .await
            .ok_or(UseCaseError::NotFound(self.intervenant_id))?;

        let (structural, violations): (Vec<_>, Vec<_>) = self
            .availabilities
            .validate()
            .into_iter()
            .partition(|v| v.kind.is_structural());
        if !structural.is_empty() {
            return Err(UseCaseError::InvalidSlots(structural));
        }
        if !violations.is_empty() {
            warn!(
                "Availabilities of intervenant: {} break the working hours conventions: {:?}",
                intervenant.id, violations
            );
        }

        let now = ctx.sys.now();
        ctx.repos
            .intervenants
            .update_availabilities(&intervenant.id, &self.availabilities, now)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        intervenant.availabilities = self.availabilities.clone();
        intervenant.updated_at = now;

        Ok(UseCaseRes {
            intervenant,
            violations,
        })
    }
}
