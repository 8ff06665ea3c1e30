//! HTTP error mapping

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::application::ApplicationError;

/// Errors surfaced by request handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Application(#[from] ApplicationError),

    #[error("worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// Request body could not be read as the expected JSON
    #[error("{message}")]
    BadRequest { status: StatusCode, message: String },
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Application(ApplicationError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Application(ApplicationError::DanglingOwner(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Application(ApplicationError::Domain(_)) => StatusCode::BAD_REQUEST,
            ApiError::BadRequest { status, .. } => *status,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Application(ApplicationError::NotFound(_)) => "Party not found".to_string(),
            ApiError::Application(ApplicationError::DanglingOwner(id)) => {
                format!("Owner not found: {id}")
            }
            ApiError::Application(ApplicationError::Domain(e)) => e.to_string(),
            ApiError::BadRequest { message, .. } => message.clone(),
            _ => {
                // Internal details stay in the log
                error!("request failed: {self}");
                "internal server error".to_string()
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
