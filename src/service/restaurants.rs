//! Restaurant reads and the cascading delete.

use crate::error::AppError;
use crate::models::{AssociationDetail, Restaurant};
use crate::store;
use sqlx::SqlitePool;

const RESTAURANT: &str = "Restaurant";

/// A restaurant with its associations in store order.
#[derive(Clone, Debug)]
pub struct RestaurantDetail {
    pub restaurant: Restaurant,
    pub associations: Vec<AssociationDetail>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeletedRestaurant {
    pub id: i64,
    pub associations_removed: u64,
}

pub struct RestaurantService;

impl RestaurantService {
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Restaurant>, AppError> {
        let mut conn = pool.acquire().await?;
        store::list_restaurants(&mut conn).await
    }

    pub async fn get_with_associations(
        pool: &SqlitePool,
        id: i64,
    ) -> Result<RestaurantDetail, AppError> {
        let mut conn = pool.acquire().await?;
        let restaurant = store::find_restaurant(&mut conn, id)
            .await?
            .ok_or(AppError::NotFound(RESTAURANT))?;
        let associations = store::associations_for_restaurant(&mut conn, id).await?;
        Ok(RestaurantDetail {
            restaurant,
            associations,
        })
    }

    /// Delete a restaurant and every association it owns in one transaction.
    /// A restaurant that does not exist (including one already deleted) is `NotFound`.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<DeletedRestaurant, AppError> {
        let mut tx = pool.begin().await?;
        if store::find_restaurant(&mut tx, id).await?.is_none() {
            return Err(AppError::NotFound(RESTAURANT));
        }
        let associations_removed = store::delete_associations_for_restaurant(&mut tx, id).await?;
        if store::delete_restaurant(&mut tx, id).await? == 0 {
            return Err(AppError::NotFound(RESTAURANT));
        }
        tx.commit().await?;

        tracing::info!(id, associations_removed, "restaurant deleted");
        Ok(DeletedRestaurant {
            id,
            associations_removed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::test_support::seeded_pool;
    use crate::service::{AssociationService, RestaurantPizzaPayload};

    #[tokio::test]
    async fn delete_removes_exactly_the_owned_associations() {
        let (pool, _, _) = seeded_pool().await;
        for (restaurant_id, pizza_id) in [(1, 1), (1, 2), (2, 1)] {
            AssociationService::create(
                &pool,
                &RestaurantPizzaPayload::new(restaurant_id, pizza_id, 10.0),
            )
            .await
            .unwrap();
        }

        let deleted = RestaurantService::delete(&pool, 1).await.unwrap();
        assert_eq!(
            deleted,
            DeletedRestaurant {
                id: 1,
                associations_removed: 2
            }
        );

        let mut conn = pool.acquire().await.unwrap();
        assert_eq!(store::count_associations(&mut conn).await.unwrap(), 1);
        assert_eq!(store::count_restaurants(&mut conn).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn second_delete_is_not_found() {
        let (pool, _, _) = seeded_pool().await;
        RestaurantService::delete(&pool, 2).await.unwrap();
        let err = RestaurantService::delete(&pool, 2).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound("Restaurant")));
    }

    #[tokio::test]
    async fn detail_lists_associations_with_pizza_names() {
        let (pool, _, _) = seeded_pool().await;
        AssociationService::create(&pool, &RestaurantPizzaPayload::new(2, 2, 14.0))
            .await
            .unwrap();

        let detail = RestaurantService::get_with_associations(&pool, 2).await.unwrap();
        assert_eq!(detail.restaurant.name, "Sottocasa");
        assert_eq!(detail.associations.len(), 1);
        assert_eq!(detail.associations[0].pizza_name, "Pepperoni");
        assert_eq!(detail.associations[0].price, 14.0);

        let err = RestaurantService::get_with_associations(&pool, 3)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
