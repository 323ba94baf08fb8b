//! Function error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use voyager_registration::RegistrationError;

use crate::cors::json_response;

#[derive(Debug, Error)]
pub enum FunctionError {
    #[error("{0} API key not set")]
    MissingKey(&'static str),

    #[error("{0}")]
    BadRequest(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error("{0}")]
    Internal(String),
}

impl FunctionError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingKey(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Registration(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

impl IntoResponse for FunctionError {
    fn into_response(self) -> Response {
        json_response(self.status(), &json!({ "message": self.to_string() }))
    }
}
