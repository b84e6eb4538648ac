use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Pool, Postgres};
use std::sync::OnceLock;

static DB_POOL: OnceLock<PgPool> = OnceLock::new();

pub async fn init_pool(database_url: &str) -> Result<(), sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    super::schema::ensure_schema(&pool).await?;

    DB_POOL.set(pool).map_err(|_| {
        sqlx::Error::Configuration(
            "Database pool already initialized".to_string().into(),
        )
    })?;

    Ok(())
}

/// `None` until `init_pool` succeeded; callers fall back to the in-memory store.
pub fn get_pool() -> Option<&'static Pool<Postgres>> {
    DB_POOL.get()
}
