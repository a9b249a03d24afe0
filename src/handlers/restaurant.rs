//! Restaurant handlers: list, read with associations, delete.

use crate::error::AppError;
use crate::extractors::PathParam;
use crate::response::ok;
use crate::serializer::serialize_restaurant;
use crate::service::RestaurantService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};

/// Any id segment that is not an integer names a restaurant that cannot exist.
fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::NotFound("Restaurant"))
}

pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let restaurants = RestaurantService::list(&state.pool).await?;
    let data: Vec<serde_json::Value> = restaurants
        .iter()
        .map(|r| serialize_restaurant(r, None))
        .collect();
    Ok(ok(data))
}

pub async fn get_restaurant(
    State(state): State<AppState>,
    PathParam(id_str): PathParam<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let detail = RestaurantService::get_with_associations(&state.pool, id).await?;
    Ok(ok(serialize_restaurant(
        &detail.restaurant,
        Some(&detail.associations),
    )))
}

pub async fn delete_restaurant(
    State(state): State<AppState>,
    PathParam(id_str): PathParam<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    RestaurantService::delete(&state.pool, id)
        .await
        .map_err(AppError::into_write_failure)?;
    Ok(StatusCode::NO_CONTENT)
}
