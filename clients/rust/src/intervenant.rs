use crate::{APIResponse, BaseClient};
use chrono::{DateTime, Utc};
use dispo_api_structs::*;
use dispo_domain::{AvailabilityDocument, ID};
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct IntervenantClient {
    base: Arc<BaseClient>,
}

pub struct CreateIntervenantInput {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Default)]
pub struct UpdateIntervenantInput {
    pub intervenant_id: ID,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl IntervenantClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateIntervenantInput,
    ) -> APIResponse<create_intervenant::APIResponse> {
        let body = create_intervenant::RequestBody {
            firstname: input.firstname,
            lastname: input.lastname,
            email: input.email,
            expires_at: input.expires_at,
        };
        self.base
            .post(body, "admin/intervenant".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get(&self, intervenant_id: ID) -> APIResponse<get_intervenant::APIResponse> {
        self.base
            .get(
                format!("admin/intervenant/{}", intervenant_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn list(&self) -> APIResponse<get_intervenants::APIResponse> {
        self.base
            .get("admin/intervenants".into(), StatusCode::OK)
            .await
    }

    pub async fn update(
        &self,
        input: UpdateIntervenantInput,
    ) -> APIResponse<update_intervenant::APIResponse> {
        let body = update_intervenant::RequestBody {
            firstname: input.firstname,
            lastname: input.lastname,
            email: input.email,
            expires_at: input.expires_at,
        };
        self.base
            .put(
                body,
                format!("admin/intervenant/{}", input.intervenant_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn delete(
        &self,
        intervenant_id: ID,
    ) -> APIResponse<delete_intervenant::APIResponse> {
        self.base
            .delete(
                format!("admin/intervenant/{}", intervenant_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn regenerate_key(
        &self,
        intervenant_id: ID,
        expires_at: Option<DateTime<Utc>>,
    ) -> APIResponse<regenerate_key::APIResponse> {
        let body = regenerate_key::RequestBody { expires_at };
        self.base
            .post(
                body,
                format!("admin/intervenant/{}/key", intervenant_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn regenerate_keys(
        &self,
        expires_at: Option<DateTime<Utc>>,
    ) -> APIResponse<regenerate_keys::APIResponse> {
        let body = regenerate_keys::RequestBody { expires_at };
        self.base
            .post(body, "admin/intervenants/keys".into(), StatusCode::OK)
            .await
    }

    pub async fn set_availabilities(
        &self,
        intervenant_id: ID,
        availabilities: AvailabilityDocument,
    ) -> APIResponse<set_availabilities::APIResponse> {
        let body = set_availabilities::RequestBody { availabilities };
        self.base
            .put(
                body,
                format!("admin/intervenant/{}/availabilities", intervenant_id),
                StatusCode::OK,
            )
            .await
    }
}
