use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::response::created;
use crate::serializer::serialize_association;
use crate::service::{AssociationService, RestaurantPizzaPayload};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub async fn create_restaurant_pizza(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RestaurantPizzaPayload>,
) -> Result<impl IntoResponse, AppError> {
    let result = AssociationService::create(&state.pool, &payload)
        .await
        .map_err(AppError::into_write_failure)?;
    Ok(created(serialize_association(&result.association)))
}
