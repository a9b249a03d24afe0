//! Typed errors and HTTP mapping.

use crate::response::{error_body, errors_body};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
    #[error("invalid database url: {0}")]
    DatabaseUrl(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("validation errors: {0}")]
    Validation(String),
    #[error("{0}")]
    Referential(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),
    /// A store failure raised while a write was in flight. The transaction is already rolled back.
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("database: {0}")]
    Store(sqlx::Error),
}

impl AppError {
    /// Mutating handlers report store failures as rejected requests rather than server errors.
    pub fn into_write_failure(self) -> Self {
        match self {
            AppError::Store(e) => AppError::WriteFailed(e.to_string()),
            other => other,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_foreign_key_violation() {
                return AppError::Referential(
                    "referenced restaurant or pizza does not exist".into(),
                );
            }
            if db_err.is_check_violation() {
                return AppError::Validation(db_err.message().to_string());
            }
        }
        AppError::Store(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::MissingField(_)
            | AppError::Validation(_)
            | AppError::Referential(_)
            | AppError::BadRequest(_)
            | AppError::WriteFailed(_) => {
                tracing::warn!(error = %self, "request rejected");
                (StatusCode::BAD_REQUEST, Json(errors_body(vec![self.to_string()]))).into_response()
            }
            AppError::PayloadTooLarge(_) => {
                tracing::warn!(error = %self, "request rejected");
                (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    Json(errors_body(vec![self.to_string()])),
                )
                    .into_response()
            }
            AppError::NotFound(_) => {
                (StatusCode::NOT_FOUND, Json(error_body(self.to_string()))).into_response()
            }
            AppError::Store(_) | AppError::Config(_) => {
                tracing::error!(error = %self, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(error_body("internal server error".into())),
                )
                    .into_response()
            }
        }
    }
}
