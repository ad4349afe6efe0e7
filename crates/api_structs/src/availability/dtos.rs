use chrono::{DateTime, Utc};
use dispo_domain::{AvailabilityDocument, BucketKey, Intervenant, ID};
use serde::{Deserialize, Serialize};

/// A projected slot, timestamps are UTC millis
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotEventDTO {
    pub start_ts: i64,
    pub end_ts: i64,
    pub day_label: String,
    pub bucket: BucketKey,
}

/// What the holder of an access key gets to see about themselves
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervenantProfileDTO {
    pub id: ID,
    pub firstname: String,
    pub lastname: String,
    pub expires_at: DateTime<Utc>,
    pub availabilities: AvailabilityDocument,
}

impl IntervenantProfileDTO {
    pub fn new(intervenant: Intervenant) -> Self {
        Self {
            id: intervenant.id,
            firstname: intervenant.firstname,
            lastname: intervenant.lastname,
            expires_at: intervenant.expires_at,
            availabilities: intervenant.availabilities,
        }
    }
}
