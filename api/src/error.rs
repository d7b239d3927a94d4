//! Maps pipeline failures onto HTTP responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use syllabus_parser::ServiceError;

#[derive(Debug)]
pub enum ApiError {
    Service(ServiceError),
    /// Body was not a JSON object of the expected shape, or was too large.
    Rejected(JsonRejection),
}

/// Error response body
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<Value>,
}

impl ErrorResponse {
    fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            raw_text: None,
            raw_response: None,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::Service(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Rejected(rejection) => (
                rejection.status(),
                ErrorResponse::message(format!("Invalid request body: {}", rejection.body_text())),
            ),
            ApiError::Service(err) => match err {
                ServiceError::Input(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::message(msg)),
                ServiceError::Parse { message, raw_text } => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: message,
                        raw_text: Some(raw_text),
                        raw_response: None,
                    },
                ),
                ServiceError::Upstream { message, raw } => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: message,
                        raw_text: None,
                        // Upstream bodies are usually JSON; keep them structured when they are.
                        raw_response: raw.map(|body| {
                            serde_json::from_str(&body).unwrap_or(Value::String(body))
                        }),
                    },
                ),
                err @ ServiceError::ConversionTimeout { .. } => {
                    (StatusCode::GATEWAY_TIMEOUT, ErrorResponse::message(err.to_string()))
                }
                err @ (ServiceError::Extraction(_) | ServiceError::Http(_)) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::message(err.to_string()),
                ),
            },
        };

        (status, Json(body)).into_response()
    }
}
