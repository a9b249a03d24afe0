//! Pizza API: REST backend for restaurants, pizzas and the prices restaurants charge for them.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod serializer;
pub mod service;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use routes::{api_routes, app, common_routes};
pub use service::{AssociationService, PizzaService, RestaurantPizzaPayload, RestaurantService};
pub use state::AppState;
