use crate::validation::FieldError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),
    #[error("Failed to add school to the database: {0}")]
    InsertFailed(#[source] database::StoreError),
    #[error("Failed to retrieve schools: {0}")]
    ListFailed(#[from] locator::error::LocatorError),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                tracing::debug!(?errors, "Request rejected by validation.");
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            AppError::InsertFailed(store_err) => {
                tracing::error!(error = %store_err, "Store error while adding a school.");
                store_failure("Failed to add school to the database.", store_err.to_string())
            }
            AppError::ListFailed(locator_err) => {
                tracing::error!(error = %locator_err, "Store error while listing schools.");
                store_failure("Failed to retrieve schools.", locator_err.to_string())
            }
        }
    }
}

fn store_failure(error: &str, details: String) -> Response {
    let body = Json(json!({ "error": error, "details": details }));
    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}
