//! Request validation for new restaurant/pizza associations.

use crate::error::AppError;
use crate::models::NewRestaurantPizza;
use serde::Deserialize;
use serde_json::Value;

pub const MIN_PRICE: f64 = 1.0;
pub const MAX_PRICE: f64 = 30.0;

/// Body of `POST /restaurant_pizzas`. Every field is optional here so that an absent key is
/// reported as a missing field rather than a generic parse failure. `null` counts as absent.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RestaurantPizzaPayload {
    #[serde(default)]
    pub restaurant_id: Option<Value>,
    #[serde(default)]
    pub pizza_id: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
}

impl RestaurantPizzaPayload {
    pub fn new(restaurant_id: i64, pizza_id: i64, price: f64) -> Self {
        Self {
            restaurant_id: Some(restaurant_id.into()),
            pizza_id: Some(pizza_id.into()),
            price: Some(price.into()),
        }
    }
}

pub struct AssociationValidator;

impl AssociationValidator {
    /// Check presence of all fields, then their types, then the price range.
    /// Existence of the referenced rows is checked later, inside the write transaction.
    pub fn validate(payload: &RestaurantPizzaPayload) -> Result<NewRestaurantPizza, AppError> {
        let restaurant_id = required("restaurant_id", &payload.restaurant_id)?;
        let pizza_id = required("pizza_id", &payload.pizza_id)?;
        let price = required("price", &payload.price)?;

        Ok(NewRestaurantPizza {
            restaurant_id: integer_field("restaurant_id", restaurant_id)?,
            pizza_id: integer_field("pizza_id", pizza_id)?,
            price: validate_price(price)?,
        })
    }
}

fn required<'a>(field: &'static str, value: &'a Option<Value>) -> Result<&'a Value, AppError> {
    match value {
        Some(v) if !v.is_null() => Ok(v),
        _ => Err(AppError::MissingField(field)),
    }
}

fn integer_field(field: &str, value: &Value) -> Result<i64, AppError> {
    value
        .as_i64()
        .ok_or_else(|| AppError::Validation(format!("{} must be an integer", field)))
}

/// Price must be a finite number in `[MIN_PRICE, MAX_PRICE]`. Fractions are allowed.
pub fn validate_price(value: &Value) -> Result<f64, AppError> {
    let n = value
        .as_f64()
        .filter(|n| n.is_finite())
        .ok_or_else(|| AppError::Validation("price must be a number".into()))?;
    if !(MIN_PRICE..=MAX_PRICE).contains(&n) {
        return Err(AppError::Validation(format!(
            "price must be between {} and {}",
            MIN_PRICE, MAX_PRICE
        )));
    }
    Ok(n)
}
