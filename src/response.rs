//! Response body helpers. API payloads are bare JSON values; failures carry either a single
//! `error` string or an `errors` list.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorsBody {
    pub errors: Vec<String>,
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

pub fn error_body(message: String) -> ErrorBody {
    ErrorBody { error: message }
}

pub fn errors_body(messages: Vec<String>) -> ErrorsBody {
    ErrorsBody { errors: messages }
}
