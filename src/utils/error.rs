use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::utils::helpers::{LOGIN_PATH, service_name};

#[derive(Debug, Error)]
pub enum CustomError {
    #[error("Unauthenticated: {0}")]
    UnauthenticatedError(String),

    #[error("Not Found: {0}")]
    NotFoundError(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl CustomError {
    /// Logs the underlying cause and returns an error whose response body
    /// only carries `public_message`.
    pub fn internal(public_message: &str, cause: impl std::fmt::Display) -> Self {
        log::error!("{public_message}: {cause}");
        CustomError::InternalServerError(public_message.to_string())
    }
}

impl ResponseError for CustomError {
    fn status_code(&self) -> StatusCode {
        match *self {
            CustomError::UnauthenticatedError(..) => StatusCode::FOUND,
            CustomError::NotFoundError(..) => StatusCode::NOT_FOUND,
            CustomError::InternalServerError(..) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let CustomError::UnauthenticatedError(..) = self {
            return HttpResponse::Found()
                .insert_header((header::LOCATION, LOGIN_PATH))
                .finish();
        }

        let error_message = json!({
            "success": false,
            "message": self.to_string(),
            "httpStatusCode": self.status_code().as_u16(),
            "error": match *self {
                CustomError::UnauthenticatedError(..) => "UNAUTHENTICATED_ERROR",
                CustomError::NotFoundError(..) => "NOT_FOUND_ERROR",
                CustomError::InternalServerError(..) => "INTERNAL_SERVER_ERROR",
            },
            "service": service_name(),
        });

        HttpResponse::build(self.status_code()).json(error_message)
    }
}
