//! Seed loader: wipes the database and inserts demo restaurants, pizzas and prices.
//!
//! Run from repo root: `cargo run -p pizza-seed`
//! Honours the same `DB_URI` / `DATABASE_URL` settings as the server.

use pizza_api::{store, AssociationService, RestaurantPizzaPayload, Settings};
use tracing_subscriber::EnvFilter;

const RESTAURANTS: &[(&str, &str)] = &[
    ("Karen's Pizza Shack", "address1"),
    ("Sanjay's Pizza", "address2"),
    ("Kiki's Pizza", "address3"),
];

const PIZZAS: &[(&str, &str)] = &[
    ("Emma", "Dough, Tomato Sauce, Cheese"),
    ("Geri", "Dough, Tomato Sauce, Cheese, Pepperoni"),
    ("Melanie", "Dough, Sauce, Ricotta, Red peppers, Mustard"),
];

/// (restaurant index, pizza index, price)
const PRICES: &[(usize, usize, f64)] = &[(0, 0, 1.0), (1, 1, 4.0), (2, 2, 5.0)];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pizza_api=info,pizza_seed=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let pool = store::connect(&settings.database_url, settings.max_connections).await?;

    let mut tx = pool.begin().await?;
    store::clear_all(&mut tx).await?;
    let mut restaurant_ids = Vec::with_capacity(RESTAURANTS.len());
    for &(name, address) in RESTAURANTS {
        restaurant_ids.push(store::insert_restaurant(&mut tx, name, Some(address)).await?.id);
    }
    let mut pizza_ids = Vec::with_capacity(PIZZAS.len());
    for &(name, ingredients) in PIZZAS {
        pizza_ids.push(store::insert_pizza(&mut tx, name, ingredients).await?.id);
    }
    tx.commit().await?;

    for &(r, p, price) in PRICES {
        let payload = RestaurantPizzaPayload::new(restaurant_ids[r], pizza_ids[p], price);
        let created = AssociationService::create(&pool, &payload).await?;
        tracing::info!(
            restaurant = %created.restaurant.name,
            pizza = %created.pizza.name,
            price = created.association.price,
            "priced"
        );
    }

    tracing::info!(
        restaurants = RESTAURANTS.len(),
        pizzas = PIZZAS.len(),
        prices = PRICES.len(),
        "seeding complete"
    );
    Ok(())
}
