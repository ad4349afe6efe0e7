mod auth;
mod availability;
mod base;
mod intervenant;
mod status;

pub use auth::{AuthClient, RegisterUserInput, SignInInput};
pub use availability::{AvailabilityClient, CalendarView, GestureInput};
pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
pub use dispo_api_structs::dtos::*;
pub use dispo_domain::{
    AvailabilityDocument, BucketKey, GestureScope, RejectReason, Slot, SlotTime, SlotViolation,
    ViolationKind, ID,
};
pub use intervenant::{CreateIntervenantInput, IntervenantClient, UpdateIntervenantInput};
pub use status::StatusClient;
use std::sync::Arc;

// Domain
pub use dispo_api_structs::dtos::IntervenantDTO as Intervenant;
pub use dispo_api_structs::dtos::SlotEventDTO as SlotEvent;
pub use dispo_api_structs::dtos::UserDTO as User;

/// Dispo Scheduler Server SDK
///
/// The SDK contains methods for interacting with the Dispo Scheduler server
/// API. Admin routes need the token returned by `auth.sign_in`.
#[derive(Clone)]
pub struct DispoSDK {
    pub auth: AuthClient,
    pub availability: AvailabilityClient,
    pub intervenant: IntervenantClient,
    pub status: StatusClient,
}

impl DispoSDK {
    pub fn new(address: String, token: Option<String>) -> Self {
        let mut base = BaseClient::new(address);
        if let Some(token) = token {
            base.set_token(token);
        }
        let base = Arc::new(base);
        let auth = AuthClient::new(base.clone());
        let availability = AvailabilityClient::new(base.clone());
        let intervenant = IntervenantClient::new(base.clone());
        let status = StatusClient::new(base);

        Self {
            auth,
            availability,
            intervenant,
            status,
        }
    }
}
