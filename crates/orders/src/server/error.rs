use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::record::RecordError;
use crate::validate::ValidationError;

pub const ORDER_BOOK_NOT_FOUND: &str = "order book not found";
pub const LABEL_OR_PAIR_MISSING: &str = "label and pair not provided in query params";
pub const INVALID_ORDER_BOOK_BODY: &str = "You must provide correct exchange name pair";
pub const INVALID_HISTORY_BODY: &str = "Client or History not provided";

/// HTTP 응답으로 변환되는 에러. 백엔드 상세 내용은 응답에 싣지 않는다.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("request timed out")]
    Timeout,

    #[error("something went wrong")]
    Internal,
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<RecordError> for ApiError {
    fn from(e: RecordError) -> Self {
        match e {
            RecordError::RecordMissing => ApiError::BadRequest(e.to_string()),
            RecordError::DeadlineExceeded => ApiError::Timeout,
            RecordError::Database(_) | RecordError::Cancelled | RecordError::Other(_) => {
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
