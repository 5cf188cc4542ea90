//! Error responses for the HTTP API

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::{FieldError, PremiumError};

/// One entry of a validation error body
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Serialize)]
struct ValidationBody {
    detail: Vec<ErrorDetail>,
}

#[derive(Debug, Serialize)]
struct ServerErrorBody {
    detail: &'static str,
}

/// Errors a handler can return
#[derive(Debug)]
pub enum ApiError {
    /// Body could not be read into the request type
    Rejected(JsonRejection),
    /// Body parsed but values are out of range
    Invalid(Vec<FieldError>),
    /// Anything past validation
    Internal(PremiumError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected(rejection)
    }
}

impl From<PremiumError> for ApiError {
    fn from(err: PremiumError) -> Self {
        match err {
            PremiumError::Validation(fields) => ApiError::Invalid(fields),
            other => ApiError::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Rejected(rejection) => {
                let kind = match &rejection {
                    JsonRejection::JsonDataError(_) => "json_data",
                    JsonRejection::JsonSyntaxError(_) => "json_syntax",
                    JsonRejection::MissingJsonContentType(_) => "content_type",
                    _ => "body",
                };
                log::debug!("Rejected request body: {}", rejection.body_text());
                let detail = vec![ErrorDetail {
                    loc: vec!["body".to_string()],
                    msg: rejection.body_text(),
                    kind: kind.to_string(),
                }];
                validation_response(detail)
            }
            ApiError::Invalid(fields) => {
                log::debug!("Rejected out-of-range input: {:?}", fields);
                let detail = fields
                    .into_iter()
                    .map(|f| ErrorDetail {
                        loc: vec!["body".to_string(), f.field.to_string()],
                        msg: f.message,
                        kind: "value_error".to_string(),
                    })
                    .collect();
                validation_response(detail)
            }
            ApiError::Internal(err) => {
                log::error!("Prediction failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ServerErrorBody {
                        detail: "Internal Server Error",
                    }),
                )
                    .into_response()
            }
        }
    }
}

fn validation_response(detail: Vec<ErrorDetail>) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ValidationBody { detail }),
    )
        .into_response()
}
