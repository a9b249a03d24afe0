use crate::error::AppError;
use crate::extractors::QueryParams;
use crate::response::ok;
use crate::serializer::{parse_pizza_fields, serialize_pizza};
use crate::service::PizzaService;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct PizzaListParams {
    /// Comma-separated projection, e.g. `id,name`.
    pub fields: Option<String>,
}

pub async fn list_pizzas(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<PizzaListParams>,
) -> Result<impl IntoResponse, AppError> {
    let fields = parse_pizza_fields(params.fields.as_deref())?;
    let pizzas = PizzaService::list(&state.pool).await?;
    let data: Vec<serde_json::Value> = pizzas.iter().map(|p| serialize_pizza(p, &fields)).collect();
    Ok(ok(data))
}
