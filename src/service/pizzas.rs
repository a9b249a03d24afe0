use crate::error::AppError;
use crate::models::Pizza;
use crate::store;
use sqlx::SqlitePool;

pub struct PizzaService;

impl PizzaService {
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Pizza>, AppError> {
        let mut conn = pool.acquire().await?;
        store::list_pizzas(&mut conn).await
    }
}
