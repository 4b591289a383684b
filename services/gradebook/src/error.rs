use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use grades::{Field, StudentId, ValidationErrors, BODY_KEY};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    /// The body or path never reached the validator.
    #[error("{key}: {message}")]
    Rejected {
        status: StatusCode,
        key: &'static str,
        message: String,
    },
    #[error("Grade {0} not found")]
    NotFound(StudentId),
    #[error("Nothing to update")]
    NothingToUpdate,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            key: BODY_KEY,
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            key: Field::StudentId.name(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_failed",
                    "errors": e.0
                }),
            ),
            ApiError::Rejected { status, key, message } => (
                status,
                json!({
                    "error": "validation_failed",
                    "errors": { key: message }
                }),
            ),
            ApiError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                json!({"error": "not_found", "studentId": id}),
            ),
            ApiError::NothingToUpdate => (
                StatusCode::BAD_REQUEST,
                json!({"error": "nothing_to_update"}),
            ),
            ApiError::Store(e) => {
                error!(error = %e, "store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({"error": e.to_string()}))
            }
        };
        (status, Json(body)).into_response()
    }
}
