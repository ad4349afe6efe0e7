use chrono::{DateTime, Utc};
use dispo_domain::{AvailabilityDocument, Intervenant, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervenantDTO {
    pub id: ID,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub key: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub availabilities: AvailabilityDocument,
}

impl IntervenantDTO {
    pub fn new(intervenant: Intervenant) -> Self {
        Self {
            id: intervenant.id,
            firstname: intervenant.firstname,
            lastname: intervenant.lastname,
            email: intervenant.email,
            key: intervenant.key,
            created_at: intervenant.created_at,
            updated_at: intervenant.updated_at,
            expires_at: intervenant.expires_at,
            availabilities: intervenant.availabilities,
        }
    }
}
