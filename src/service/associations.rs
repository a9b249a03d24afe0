//! Creation of restaurant/pizza associations, the only write path for `restaurant_pizzas`.

use super::validation::{AssociationValidator, RestaurantPizzaPayload};
use crate::error::AppError;
use crate::models::{Pizza, Restaurant, RestaurantPizza};
use crate::store;
use sqlx::SqlitePool;

/// A freshly persisted association together with the rows it references.
#[derive(Clone, Debug)]
pub struct CreatedAssociation {
    pub association: RestaurantPizza,
    pub restaurant: Restaurant,
    pub pizza: Pizza,
}

pub struct AssociationService;

impl AssociationService {
    /// Validate `payload` and insert one association.
    ///
    /// Referential checks and the insert share one transaction; any error drops it
    /// uncommitted, so a failed call leaves no row behind.
    pub async fn create(
        pool: &SqlitePool,
        payload: &RestaurantPizzaPayload,
    ) -> Result<CreatedAssociation, AppError> {
        let input = AssociationValidator::validate(payload)?;

        let mut tx = pool.begin().await?;
        let restaurant = store::find_restaurant(&mut tx, input.restaurant_id)
            .await?
            .ok_or_else(|| {
                AppError::Referential(format!("restaurant {} does not exist", input.restaurant_id))
            })?;
        let pizza = store::find_pizza(&mut tx, input.pizza_id)
            .await?
            .ok_or_else(|| AppError::Referential(format!("pizza {} does not exist", input.pizza_id)))?;
        let association = store::insert_association(&mut tx, &input).await?;
        tx.commit().await?;

        tracing::info!(
            id = association.id,
            restaurant_id = association.restaurant_id,
            pizza_id = association.pizza_id,
            price = association.price,
            "restaurant pizza created"
        );
        Ok(CreatedAssociation {
            association,
            restaurant,
            pizza,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::test_support::seeded_pool;

    async fn association_count(pool: &SqlitePool) -> i64 {
        let mut conn = pool.acquire().await.unwrap();
        store::count_associations(&mut conn).await.unwrap()
    }

    #[tokio::test]
    async fn create_returns_row_with_nested_summaries() {
        let (pool, restaurants, pizzas) = seeded_pool().await;
        let created = AssociationService::create(&pool, &RestaurantPizzaPayload::new(1, 2, 10.0))
            .await
            .unwrap();

        assert_eq!(
            created.association,
            RestaurantPizza {
                id: 1,
                price: 10.0,
                restaurant_id: 1,
                pizza_id: 2
            }
        );
        assert_eq!(created.restaurant, restaurants[0]);
        assert_eq!(created.pizza, pizzas[1]);
        assert_eq!(association_count(&pool).await, 1);
    }

    #[tokio::test]
    async fn unknown_restaurant_is_referential_and_writes_nothing() {
        let (pool, _, _) = seeded_pool().await;
        let err = AssociationService::create(&pool, &RestaurantPizzaPayload::new(42, 1, 10.0))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Referential(ref m) if m.contains("restaurant 42")));
        assert_eq!(association_count(&pool).await, 0);
    }

    #[tokio::test]
    async fn unknown_pizza_is_referential_and_writes_nothing() {
        let (pool, _, _) = seeded_pool().await;
        let err = AssociationService::create(&pool, &RestaurantPizzaPayload::new(1, 42, 10.0))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Referential(ref m) if m.contains("pizza 42")));
        assert_eq!(association_count(&pool).await, 0);
    }

    #[tokio::test]
    async fn price_is_checked_before_references() {
        let (pool, _, _) = seeded_pool().await;
        let err = AssociationService::create(&pool, &RestaurantPizzaPayload::new(42, 42, 31.0))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(association_count(&pool).await, 0);
    }

    #[tokio::test]
    async fn fractional_price_is_stored_as_given() {
        let (pool, _, _) = seeded_pool().await;
        let created = AssociationService::create(&pool, &RestaurantPizzaPayload::new(1, 1, 10.5))
            .await
            .unwrap();
        assert_eq!(created.association.price, 10.5);

        let mut conn = pool.acquire().await.unwrap();
        let details = store::associations_for_restaurant(&mut conn, 1).await.unwrap();
        assert_eq!(details[0].price, 10.5);
    }

    #[tokio::test]
    async fn same_pizza_may_be_priced_by_many_restaurants() {
        let (pool, _, _) = seeded_pool().await;
        for restaurant_id in [1, 2] {
            AssociationService::create(&pool, &RestaurantPizzaPayload::new(restaurant_id, 1, 9.0))
                .await
                .unwrap();
        }
        assert_eq!(association_count(&pool).await, 2);
    }
}
