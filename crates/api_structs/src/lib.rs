mod availability;
mod intervenant;
mod status;
mod user;

pub mod dtos {
    pub use crate::availability::dtos::*;
    pub use crate::intervenant::dtos::*;
    pub use crate::user::dtos::*;
}

pub use crate::availability::api::*;
pub use crate::intervenant::api::*;
pub use crate::status::api::*;
pub use crate::user::api::*;
