use crate::dtos::IntervenantDTO;
use chrono::{DateTime, Utc};
use dispo_domain::{AvailabilityDocument, Intervenant, SlotViolation, ID};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervenantResponse {
    pub intervenant: IntervenantDTO,
}

impl IntervenantResponse {
    pub fn new(intervenant: Intervenant) -> Self {
        Self {
            intervenant: IntervenantDTO::new(intervenant),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervenantsResponse {
    pub intervenants: Vec<IntervenantDTO>,
}

impl IntervenantsResponse {
    pub fn new(intervenants: Vec<Intervenant>) -> Self {
        Self {
            intervenants: intervenants.into_iter().map(IntervenantDTO::new).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PathParams {
    pub intervenant_id: ID,
}

pub mod create_intervenant {
    use super::*;

    #[derive(Debug, Deserialize, Serialize, Validate)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[validate(length(min = 2))]
        pub firstname: String,
        #[validate(length(min = 2))]
        pub lastname: String,
        #[validate(email)]
        pub email: String,
        /// Defaults to a couple of months from now
        #[serde(default)]
        pub expires_at: Option<DateTime<Utc>>,
    }

    pub type APIResponse = IntervenantResponse;
}

pub mod get_intervenant {
    use super::*;

    pub type PathParams = super::PathParams;
    pub type APIResponse = IntervenantResponse;
}

pub mod get_intervenants {
    use super::*;

    pub type APIResponse = IntervenantsResponse;
}

pub mod update_intervenant {
    use super::*;

    #[derive(Debug, Default, Deserialize, Serialize, Validate)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        #[validate(length(min = 2))]
        pub firstname: Option<String>,
        #[serde(default)]
        #[validate(length(min = 2))]
        pub lastname: Option<String>,
        #[serde(default)]
        #[validate(email)]
        pub email: Option<String>,
        #[serde(default)]
        pub expires_at: Option<DateTime<Utc>>,
    }

    pub type PathParams = super::PathParams;
    pub type APIResponse = IntervenantResponse;
}

pub mod delete_intervenant {
    use super::*;

    pub type PathParams = super::PathParams;
    pub type APIResponse = IntervenantResponse;
}

pub mod regenerate_key {
    use super::*;

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub expires_at: Option<DateTime<Utc>>,
    }

    pub type PathParams = super::PathParams;
    pub type APIResponse = IntervenantResponse;
}

pub mod regenerate_keys {
    use super::*;

    pub type RequestBody = super::regenerate_key::RequestBody;
    pub type APIResponse = IntervenantsResponse;
}

pub mod set_availabilities {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub availabilities: AvailabilityDocument,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub intervenant: IntervenantDTO,
        /// Working hours conventions the stored document does not follow
        pub violations: Vec<SlotViolation>,
    }

    impl APIResponse {
        pub fn new(intervenant: Intervenant, violations: Vec<SlotViolation>) -> Self {
            Self {
                intervenant: IntervenantDTO::new(intervenant),
                violations,
            }
        }
    }

    pub type PathParams = super::PathParams;
}
