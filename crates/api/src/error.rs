use actix_web::{
    http::{header, StatusCode},
    HttpResponse,
};
use dispo_api_structs::apply_gesture::RejectionResponse;
use dispo_domain::RejectReason;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DispoError {
    #[error("Internal server error")]
    InternalError,
    #[error("Invalid data provided: Error message: `{0}`")]
    BadClientData(String),
    #[error("There was a conflict with the request. Error message: `{0}`")]
    Conflict(String),
    #[error("Unauthorized request. Error message: `{0}`")]
    Unauthorized(String),
    #[error("The access key has expired. Error message: `{0}`")]
    KeyExpired(String),
    #[error("404 Not found. Error message: `{0}`")]
    NotFound(String),
    #[error("The change was rejected. Error message: `{0}`")]
    RejectedGesture(RejectReason),
}

impl actix_web::error::ResponseError for DispoError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadClientData(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::KeyExpired(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::RejectedGesture(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::RejectedGesture(reason) => {
                HttpResponse::build(self.status_code()).json(RejectionResponse {
                    message: self.to_string(),
                    reason: *reason,
                })
            }
            _ => HttpResponse::build(self.status_code())
                .insert_header((header::CONTENT_TYPE, "text/html; charset=utf-8"))
                .body(self.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for DispoError {
    fn from(e: validator::ValidationErrors) -> Self {
        Self::BadClientData(e.to_string())
    }
}
