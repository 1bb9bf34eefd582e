//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `BOOKING` prefix and
//! `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use conference_booking::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use std::path::PathBuf;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL settings. Without them the service runs on the in-memory
    /// store, which is refused in production.
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Session token verification
    pub auth: AuthConfig,

    /// JSON seed file for the in-memory store. The built-in demo data is
    /// used when unset. Ignored when a database is configured.
    #[serde(default)]
    pub fixture_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `BOOKING` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `BOOKING__SERVER__PORT=4000` -> `server.port = 4000`
    /// - `BOOKING__DATABASE__URL=...` -> `database.url = ...`
    /// - `BOOKING__AUTH__JWT_SECRET=...` -> `auth.jwt_secret = ...`
    /// - `BOOKING__FIXTURE_PATH=...` -> `fixture_path = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("BOOKING")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        match &self.database {
            Some(database) => database.validate()?,
            None if self.is_production() => {
                return Err(ValidationError::MissingRequired("DATABASE_URL"))
            }
            None => {}
        }
        self.auth.validate(&self.server.environment)?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "BOOKING__DATABASE__URL",
        "BOOKING__DATABASE__RUN_MIGRATIONS",
        "BOOKING__AUTH__JWT_SECRET",
        "BOOKING__SERVER__PORT",
        "BOOKING__SERVER__ENVIRONMENT",
        "BOOKING__FIXTURE_PATH",
    ];

    fn set_minimal_env() {
        env::set_var("BOOKING__DATABASE__URL", "postgresql://test@localhost/booking");
        env::set_var("BOOKING__AUTH__JWT_SECRET", "dev-secret");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        let database = config.database.unwrap();
        assert_eq!(database.url, "postgresql://test@localhost/booking");
        assert_eq!(config.auth.jwt_secret.expose_secret(), "dev-secret");
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("BOOKING__DATABASE__RUN_MIGRATIONS", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
        assert!(config.database.unwrap().run_migrations);
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_missing_jwt_secret_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("BOOKING__DATABASE__URL", "postgresql://test@localhost/booking");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_database_is_optional_outside_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("BOOKING__AUTH__JWT_SECRET", "dev-secret");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.database.is_none());
        assert!(config.fixture_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fixture_path_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("BOOKING__AUTH__JWT_SECRET", "dev-secret");
        env::set_var("BOOKING__FIXTURE_PATH", "fixtures/demo.json");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.fixture_path, Some(PathBuf::from("fixtures/demo.json")));
    }

    #[test]
    fn test_production_requires_database() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("BOOKING__AUTH__JWT_SECRET", "x".repeat(40));
        env::set_var("BOOKING__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("DATABASE_URL"))
        );
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("BOOKING__SERVER__PORT", "5050");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 5050);
    }
}
