//! Route tables and the assembled application router.

pub mod api;
pub mod common;

pub use api::api_routes;
pub use common::common_routes;

use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;

/// Full application: informational routes, the API, and a request body size limit.
pub fn app(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(api_routes(state))
        .layer(ServiceBuilder::new().layer(RequestBodyLimitLayer::new(body_limit)))
}
