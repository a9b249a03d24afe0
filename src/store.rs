//! Table DDL, pool bootstrap and row-level queries.
//!
//! Query functions take a `SqliteConnection` so the caller decides the transaction scope:
//! mutations pass a `Transaction`, reads pass a pooled connection.

use crate::error::{AppError, ConfigError};
use crate::models::{AssociationDetail, NewRestaurantPizza, Pizza, Restaurant, RestaurantPizza};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{SqliteConnection, SqlitePool};
use std::str::FromStr;
use std::time::Duration;

const TABLES_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS restaurants (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        address TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS pizzas (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        ingredients TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS restaurant_pizzas (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        price REAL NOT NULL,
        restaurant_id INTEGER NOT NULL REFERENCES restaurants (id) ON DELETE CASCADE,
        pizza_id INTEGER NOT NULL REFERENCES pizzas (id),
        CONSTRAINT restaurant_pizzas_price_range CHECK (price BETWEEN 1 AND 30)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS restaurant_pizzas_restaurant_id ON restaurant_pizzas (restaurant_id)",
];

const ASSOCIATION_DETAIL_SQL: &str = r#"
    SELECT rp.id, rp.price, rp.restaurant_id, rp.pizza_id,
           p.name AS pizza_name, p.ingredients AS pizza_ingredients
    FROM restaurant_pizzas rp
    JOIN pizzas p ON p.id = rp.pizza_id
    WHERE rp.restaurant_id = ?
    ORDER BY rp.id
"#;

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Open a pool for `database_url` and ensure the tables exist.
///
/// Foreign keys are enforced on every connection. File databases run in WAL mode. An
/// in-memory database lives only as long as its connection, so it gets exactly one
/// connection that is never reaped.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, AppError> {
    let in_memory = is_in_memory(database_url);
    let mut opts = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| ConfigError::DatabaseUrl(e.to_string()))?
        .create_if_missing(true)
        .foreign_keys(true);
    if !in_memory {
        opts = opts.journal_mode(SqliteJournalMode::Wal);
    }

    let pool = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(opts)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(opts)
            .await?
    };

    ensure_tables(&pool).await?;
    tracing::debug!(database_url = %database_url, in_memory, "database ready");
    Ok(pool)
}

/// Create the three tables and the association index if missing. Idempotent.
pub async fn ensure_tables(pool: &SqlitePool) -> Result<(), AppError> {
    for ddl in TABLES_DDL {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

pub async fn list_restaurants(conn: &mut SqliteConnection) -> Result<Vec<Restaurant>, AppError> {
    let rows = sqlx::query_as::<_, Restaurant>(
        "SELECT id, name, address FROM restaurants ORDER BY id",
    )
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

pub async fn find_restaurant(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<Restaurant>, AppError> {
    let row = sqlx::query_as::<_, Restaurant>(
        "SELECT id, name, address FROM restaurants WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(row)
}

pub async fn insert_restaurant(
    conn: &mut SqliteConnection,
    name: &str,
    address: Option<&str>,
) -> Result<Restaurant, AppError> {
    let id = sqlx::query("INSERT INTO restaurants (name, address) VALUES (?, ?)")
        .bind(name)
        .bind(address)
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();
    find_restaurant(conn, id)
        .await?
        .ok_or(AppError::Store(sqlx::Error::RowNotFound))
}

/// Remove a restaurant row. Returns the number of rows deleted (0 or 1).
pub async fn delete_restaurant(conn: &mut SqliteConnection, id: i64) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM restaurants WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}

pub async fn list_pizzas(conn: &mut SqliteConnection) -> Result<Vec<Pizza>, AppError> {
    let rows = sqlx::query_as::<_, Pizza>(
        "SELECT id, name, ingredients, created_at, updated_at FROM pizzas ORDER BY id",
    )
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

pub async fn find_pizza(conn: &mut SqliteConnection, id: i64) -> Result<Option<Pizza>, AppError> {
    let row = sqlx::query_as::<_, Pizza>(
        "SELECT id, name, ingredients, created_at, updated_at FROM pizzas WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(row)
}

pub async fn insert_pizza(
    conn: &mut SqliteConnection,
    name: &str,
    ingredients: &str,
) -> Result<Pizza, AppError> {
    let id = sqlx::query("INSERT INTO pizzas (name, ingredients) VALUES (?, ?)")
        .bind(name)
        .bind(ingredients)
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();
    find_pizza(conn, id)
        .await?
        .ok_or(AppError::Store(sqlx::Error::RowNotFound))
}

/// Associations of one restaurant joined with their pizzas, in insertion order.
pub async fn associations_for_restaurant(
    conn: &mut SqliteConnection,
    restaurant_id: i64,
) -> Result<Vec<AssociationDetail>, AppError> {
    let rows = sqlx::query_as::<_, AssociationDetail>(ASSOCIATION_DETAIL_SQL)
        .bind(restaurant_id)
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows)
}

pub async fn insert_association(
    conn: &mut SqliteConnection,
    input: &NewRestaurantPizza,
) -> Result<RestaurantPizza, AppError> {
    let sql = "INSERT INTO restaurant_pizzas (price, restaurant_id, pizza_id) VALUES (?, ?, ?)";
    tracing::debug!(sql = %sql, params = ?input, "query");
    let id = sqlx::query(sql)
        .bind(input.price)
        .bind(input.restaurant_id)
        .bind(input.pizza_id)
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();
    Ok(RestaurantPizza {
        id,
        price: input.price,
        restaurant_id: input.restaurant_id,
        pizza_id: input.pizza_id,
    })
}

/// Remove every association owned by a restaurant. Returns how many were removed.
pub async fn delete_associations_for_restaurant(
    conn: &mut SqliteConnection,
    restaurant_id: i64,
) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM restaurant_pizzas WHERE restaurant_id = ?")
        .bind(restaurant_id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}

pub async fn count_restaurants(conn: &mut SqliteConnection) -> Result<i64, AppError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM restaurants")
        .fetch_one(&mut *conn)
        .await?;
    Ok(count)
}

pub async fn count_associations(conn: &mut SqliteConnection) -> Result<i64, AppError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM restaurant_pizzas")
        .fetch_one(&mut *conn)
        .await?;
    Ok(count)
}

/// Delete all rows and reset the id sequences. Used by the seed loader.
pub async fn clear_all(conn: &mut SqliteConnection) -> Result<(), AppError> {
    for sql in [
        "DELETE FROM restaurant_pizzas",
        "DELETE FROM restaurants",
        "DELETE FROM pizzas",
        "DELETE FROM sqlite_sequence WHERE name IN ('restaurant_pizzas', 'restaurants', 'pizzas')",
    ] {
        sqlx::query(sql).execute(&mut *conn).await?;
    }
    Ok(())
}
