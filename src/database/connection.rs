use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use tracing::{info, instrument};

use crate::database::schema::CURRENT_SCHEMA;
use crate::env::DatabaseSettings;
use crate::error::AppError;

/// Opens the pool described by `settings` and makes sure the tables exist.
///
/// Foreign keys are switched on per connection; SQLite leaves them off by
/// default and the achievement cascade depends on them.
#[instrument(skip_all, fields(url = %settings.url, max_connections = settings.max_connections))]
pub async fn connect(settings: &DatabaseSettings) -> Result<Pool<Sqlite>, AppError> {
    let options = SqliteConnectOptions::from_str(&settings.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(options)
        .await?;

    info!("Connected to database");

    init_schema(&pool).await?;

    Ok(pool)
}

#[instrument(skip(pool))]
pub async fn init_schema(pool: &Pool<Sqlite>) -> Result<(), AppError> {
    info!("Creating tables if absent");

    sqlx::raw_sql(CURRENT_SCHEMA)
        .execute(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create schema: {}", e)))?;

    Ok(())
}
