//! JSON shapes for restaurants, pizzas and associations.

use crate::error::AppError;
use crate::models::{AssociationDetail, Pizza, Restaurant, RestaurantPizza};
use serde_json::{json, Map, Value};
use std::str::FromStr;

/// Pizza attributes a client may select with `?fields=`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PizzaField {
    Id,
    Name,
    Ingredients,
    CreatedAt,
    UpdatedAt,
}

// 2^53: beyond this an f64 no longer holds every integer.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

pub const DEFAULT_PIZZA_FIELDS: &[PizzaField] =
    &[PizzaField::Id, PizzaField::Name, PizzaField::Ingredients];

impl PizzaField {
    pub fn as_str(self) -> &'static str {
        match self {
            PizzaField::Id => "id",
            PizzaField::Name => "name",
            PizzaField::Ingredients => "ingredients",
            PizzaField::CreatedAt => "created_at",
            PizzaField::UpdatedAt => "updated_at",
        }
    }
}

impl FromStr for PizzaField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(PizzaField::Id),
            "name" => Ok(PizzaField::Name),
            "ingredients" => Ok(PizzaField::Ingredients),
            "created_at" => Ok(PizzaField::CreatedAt),
            "updated_at" => Ok(PizzaField::UpdatedAt),
            other => Err(AppError::Validation(format!("unknown pizza field: {}", other))),
        }
    }
}

/// Parse a comma-separated field list. Absent or blank input selects the default set.
pub fn parse_pizza_fields(raw: Option<&str>) -> Result<Vec<PizzaField>, AppError> {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Ok(DEFAULT_PIZZA_FIELDS.to_vec());
    };
    let mut fields = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let field = name.parse::<PizzaField>()?;
        if !fields.contains(&field) {
            fields.push(field);
        }
    }
    Ok(fields)
}

/// Base form is `{id, name, address}`. With associations, adds `restaurant_pizzas`.
pub fn serialize_restaurant(
    restaurant: &Restaurant,
    associations: Option<&[AssociationDetail]>,
) -> Value {
    let mut out = json!({
        "id": restaurant.id,
        "name": restaurant.name,
        "address": restaurant.address,
    });
    if let Some(associations) = associations {
        out["restaurant_pizzas"] = associations
            .iter()
            .map(serialize_association_detail)
            .collect::<Vec<_>>()
            .into();
    }
    out
}

pub fn serialize_pizza(pizza: &Pizza, fields: &[PizzaField]) -> Value {
    let mut out = Map::new();
    for field in fields {
        let value = match field {
            PizzaField::Id => json!(pizza.id),
            PizzaField::Name => json!(pizza.name),
            PizzaField::Ingredients => json!(pizza.ingredients),
            PizzaField::CreatedAt => json!(pizza.created_at),
            PizzaField::UpdatedAt => json!(pizza.updated_at),
        };
        out.insert(field.as_str().to_string(), value);
    }
    Value::Object(out)
}

/// Whole prices render as JSON integers (`10`, not `10.0`); others keep their fraction.
pub fn price_value(price: f64) -> Value {
    if price.fract() == 0.0 && price.abs() < MAX_EXACT_INTEGER {
        Value::from(price as i64)
    } else {
        Value::from(price)
    }
}

pub fn serialize_association(association: &RestaurantPizza) -> Value {
    json!({
        "id": association.id,
        "price": price_value(association.price),
        "restaurant_id": association.restaurant_id,
        "pizza_id": association.pizza_id,
    })
}

fn serialize_association_detail(detail: &AssociationDetail) -> Value {
    json!({
        "id": detail.id,
        "price": price_value(detail.price),
        "restaurant_id": detail.restaurant_id,
        "pizza_id": detail.pizza_id,
        "pizza": {
            "id": detail.pizza_id,
            "name": detail.pizza_name,
            "ingredients": detail.pizza_ingredients,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn cheese() -> Pizza {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        Pizza {
            id: 1,
            name: "Cheese".into(),
            ingredients: "Dough, Tomato Sauce, Cheese".into(),
            created_at: ts,
            updated_at: ts,
        }
    }

    fn dominos() -> Restaurant {
        Restaurant {
            id: 1,
            name: "Dominos".into(),
            address: None,
        }
    }

    #[test]
    fn restaurant_base_form_has_no_associations() {
        let value = serialize_restaurant(&dominos(), None);
        assert_eq!(
            value,
            json!({"id": 1, "name": "Dominos", "address": null})
        );
    }

    #[test]
    fn restaurant_detail_nests_pizza_summaries() {
        let details = vec![AssociationDetail {
            id: 3,
            price: 10.0,
            restaurant_id: 1,
            pizza_id: 1,
            pizza_name: "Cheese".into(),
            pizza_ingredients: "Dough, Tomato Sauce, Cheese".into(),
        }];
        let value = serialize_restaurant(&dominos(), Some(&details));
        assert_eq!(
            value["restaurant_pizzas"],
            json!([{
                "id": 3,
                "price": 10,
                "restaurant_id": 1,
                "pizza_id": 1,
                "pizza": {"id": 1, "name": "Cheese", "ingredients": "Dough, Tomato Sauce, Cheese"}
            }])
        );
    }

    #[test]
    fn restaurant_with_no_associations_gets_empty_list() {
        let value = serialize_restaurant(&dominos(), Some(&[]));
        assert_eq!(value["restaurant_pizzas"], json!([]));
    }

    #[test]
    fn pizza_default_projection() {
        let value = serialize_pizza(&cheese(), DEFAULT_PIZZA_FIELDS);
        assert_eq!(
            value,
            json!({"id": 1, "name": "Cheese", "ingredients": "Dough, Tomato Sauce, Cheese"})
        );
    }

    #[test]
    fn pizza_projection_can_select_timestamps() {
        let fields = parse_pizza_fields(Some("name, created_at")).unwrap();
        let value = serialize_pizza(&cheese(), &fields);
        assert_eq!(
            value,
            json!({"name": "Cheese", "created_at": "2024-03-01T12:30:00"})
        );
    }

    #[test]
    fn field_list_parsing() {
        assert_eq!(parse_pizza_fields(None).unwrap(), DEFAULT_PIZZA_FIELDS);
        assert_eq!(parse_pizza_fields(Some(" ")).unwrap(), DEFAULT_PIZZA_FIELDS);
        assert_eq!(
            parse_pizza_fields(Some("id,id,,name")).unwrap(),
            vec![PizzaField::Id, PizzaField::Name]
        );
        assert!(matches!(
            parse_pizza_fields(Some("id,price")),
            Err(AppError::Validation(ref m)) if m.contains("price")
        ));
    }

    #[test]
    fn association_shape_is_flat() {
        let value = serialize_association(&RestaurantPizza {
            id: 1,
            price: 10.0,
            restaurant_id: 1,
            pizza_id: 1,
        });
        assert_eq!(
            value,
            json!({"id": 1, "price": 10, "pizza_id": 1, "restaurant_id": 1})
        );
    }

    #[test]
    fn fractional_price_keeps_its_fraction() {
        let value = serialize_association(&RestaurantPizza {
            id: 2,
            price: 10.5,
            restaurant_id: 1,
            pizza_id: 1,
        });
        assert_eq!(value["price"], json!(10.5));
        assert_eq!(price_value(30.0), json!(30));
    }
}
