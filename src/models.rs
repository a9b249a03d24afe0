//! Row types for the `restaurants`, `pizzas` and `restaurant_pizzas` tables.

use chrono::NaiveDateTime;

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Pizza {
    pub id: i64,
    pub name: String,
    /// Comma-delimited, e.g. "Dough, Tomato Sauce, Cheese".
    pub ingredients: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A restaurant selling a pizza at a price in `[1, 30]`. Prices need not be whole.
#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct RestaurantPizza {
    pub id: i64,
    pub price: f64,
    pub restaurant_id: i64,
    pub pizza_id: i64,
}

/// An association joined with the pizza it points at.
#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct AssociationDetail {
    pub id: i64,
    pub price: f64,
    pub restaurant_id: i64,
    pub pizza_id: i64,
    pub pizza_name: String,
    pub pizza_ingredients: String,
}

/// Validated input for a new association.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NewRestaurantPizza {
    pub restaurant_id: i64,
    pub pizza_id: i64,
    pub price: f64,
}
