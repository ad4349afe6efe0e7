use crate::dtos::{IntervenantProfileDTO, SlotEventDTO};
use dispo_domain::{AvailabilityDocument, GestureScope, Intervenant, RejectReason};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct KeyQuery {
    pub key: String,
}

pub mod get_availability {
    use super::*;

    pub type QueryParams = super::KeyQuery;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub intervenant: IntervenantProfileDTO,
    }

    impl APIResponse {
        pub fn new(intervenant: Intervenant) -> Self {
            Self {
                intervenant: IntervenantProfileDTO::new(intervenant),
            }
        }
    }
}

pub mod get_availability_events {
    use super::*;
    use chrono::NaiveDate;

    /// Either a date inside the displayed week or `template=true`
    #[derive(Debug, Deserialize, Serialize)]
    pub struct QueryParams {
        pub key: String,
        #[serde(default)]
        pub week: Option<NaiveDate>,
        #[serde(default)]
        pub template: Option<bool>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub events: Vec<SlotEventDTO>,
    }
}

pub mod apply_gesture {
    use super::*;

    pub type QueryParams = super::KeyQuery;

    fn default_scope() -> GestureScope {
        GestureScope::Week
    }

    /// A calendar interaction, timestamps are UTC millis
    #[derive(Debug, Clone, Deserialize, Serialize)]
    #[serde(tag = "type", rename_all = "camelCase")]
    pub enum RequestBody {
        #[serde(rename_all = "camelCase")]
        Create {
            start_ts: i64,
            end_ts: i64,
            #[serde(default = "default_scope")]
            scope: GestureScope,
        },
        #[serde(rename_all = "camelCase")]
        Update {
            old_start_ts: i64,
            old_end_ts: i64,
            new_start_ts: i64,
            new_end_ts: i64,
            #[serde(default = "default_scope")]
            scope: GestureScope,
        },
        #[serde(rename_all = "camelCase")]
        Delete {
            start_ts: i64,
            end_ts: i64,
            #[serde(default = "default_scope")]
            scope: GestureScope,
        },
    }

    /// The stored document and the fresh projection of the week the gesture landed in
    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub availabilities: AvailabilityDocument,
        pub events: Vec<SlotEventDTO>,
    }

    /// Body of the 422 answered when the engine refuses a gesture
    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RejectionResponse {
        pub message: String,
        pub reason: RejectReason,
    }
}
