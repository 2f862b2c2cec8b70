use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::{FieldErrors, ServiceError};

/// Service errors as they cross the HTTP boundary.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self.0 {
            ServiceError::Validation(errors) => {
                log::warn!("Rejected request: {}", errors);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        message: errors.to_string(),
                        errors: Some(errors),
                    },
                )
            }
            err @ ServiceError::NotFound { .. } => {
                log::warn!("{}", err);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        message: err.to_string(),
                        errors: None,
                    },
                )
            }
            ServiceError::Persistence(err) => {
                log::error!("Persistence failure: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        message: "Internal server error".to_string(),
                        errors: None,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError(ServiceError::Persistence(err))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(ServiceError::invalid("body", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError(ServiceError::invalid("id", rejection.body_text()))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
