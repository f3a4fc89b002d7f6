use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

use super::PostgresConfig;
use crate::common::{RetryConfig, retry, retry_with_backoff};

async fn connect_with_options(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;
    info!("Successfully connected to PostgreSQL database");
    Ok(db)
}

/// Open a pool using `config`. Fails on the first error.
pub async fn connect_from_config(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    connect_with_options(config.into_connect_options()).await
}

/// Open a pool, retrying with exponential backoff while the database comes up.
///
/// `None` uses [`RetryConfig::default`].
///
/// ```ignore
/// let config = PostgresConfig::from_env()?;
/// let db = connect_from_config_with_retry(config, Some(RetryConfig::new().with_max_retries(10))).await?;
/// ```
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry_config: Option<RetryConfig>,
) -> Result<DatabaseConnection, DbErr> {
    info!(url = %config.redacted_url(), "Connecting to PostgreSQL");
    let options = config.into_connect_options();
    let attempt = || connect_with_options(options.clone());

    match retry_config {
        Some(policy) => retry_with_backoff(attempt, policy).await,
        None => retry(attempt).await,
    }
}
