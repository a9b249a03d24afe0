//! Query-string and path extractors that reject with `AppError` instead of plain text.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        FromRequestParts, Path, Query,
    },
    http::request::Parts,
};

/// `axum::extract::Query` with a 400 `{"errors": [...]}` rejection.
#[derive(Clone, Debug)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| QueryParams(value))
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
    }
}

/// `axum::extract::Path` with a 400 `{"errors": [...]}` rejection, e.g. for a segment that
/// does not percent-decode to UTF-8.
#[derive(Clone, Debug)]
pub struct PathParam<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for PathParam<T>
where
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| PathParam(value))
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
    }
}
