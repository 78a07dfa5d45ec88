use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use super::validation::FieldViolation;
use crate::store::StoreError;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    Validation(Vec<FieldViolation>),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Validation(violations) => {
                write!(f, "Validation failed for {} field(s)", violations.len())
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
            }
            ApiError::Validation(violations) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": violations }))).into_response()
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Self::movie_not_found(),
        }
    }
}

impl ApiError {
    pub fn movie_not_found() -> Self {
        ApiError::NotFound("Movie not found".to_string())
    }
}
