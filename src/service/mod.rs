//! Validation & mutation services: business rules applied before anything reaches the store.

mod associations;
mod pizzas;
mod restaurants;
mod validation;
pub use associations::{AssociationService, CreatedAssociation};
pub use pizzas::PizzaService;
pub use restaurants::{DeletedRestaurant, RestaurantDetail, RestaurantService};
pub use validation::{
    validate_price, AssociationValidator, RestaurantPizzaPayload, MAX_PRICE, MIN_PRICE,
};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::{Pizza, Restaurant};
    use crate::store;
    use sqlx::SqlitePool;

    /// In-memory store with restaurants "Dominos" and "Sottocasa" and pizzas "Cheese" and
    /// "Pepperoni", all with ids 1 and 2.
    pub async fn seeded_pool() -> (SqlitePool, Vec<Restaurant>, Vec<Pizza>) {
        let pool = store::connect("sqlite::memory:", 1).await.unwrap();
        let mut conn = pool.acquire().await.unwrap();
        let restaurants = vec![
            store::insert_restaurant(&mut conn, "Dominos", Some("1 Main St"))
                .await
                .unwrap(),
            store::insert_restaurant(&mut conn, "Sottocasa", Some("298 Atlantic Ave"))
                .await
                .unwrap(),
        ];
        let pizzas = vec![
            store::insert_pizza(&mut conn, "Cheese", "Dough, Tomato Sauce, Cheese")
                .await
                .unwrap(),
            store::insert_pizza(&mut conn, "Pepperoni", "Dough, Tomato Sauce, Cheese, Pepperoni")
                .await
                .unwrap(),
        ];
        drop(conn);
        (pool, restaurants, pizzas)
    }
}
