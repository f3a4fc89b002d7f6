//! Configuration for Products API

use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration, composed from the shared config pieces
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // DATABASE_URL is required
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=8080 by default

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_requires_database_url() {
        temp_env::with_var_unset("DATABASE_URL", || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("DATABASE_URL"));
        });
    }

    #[test]
    fn test_config_from_env() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://shop:secret@db:5432/shop")),
                ("PORT", Some("3003")),
                ("APP_ENV", Some("production")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "products_api");
                assert_eq!(config.server.port, 3003);
                assert_eq!(config.database.url(), "postgres://shop:secret@db:5432/shop");
                assert!(config.environment.is_production());
            },
        );
    }

    #[test]
    fn test_config_rejects_bad_port() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://localhost/shop")),
                ("PORT", Some("eighty")),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("PORT"));
            },
        );
    }
}
