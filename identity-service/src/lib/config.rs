use std::env;

use auth::Authenticator;
use auth::PasswordError;
use auth::PasswordHasher;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    /// Put internal error details in responses. Never enable in production.
    #[serde(default)]
    pub expose_internal_errors: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL URL; when absent credentials are kept in memory.
    pub url: Option<String>,
    #[serde(default = "DatabaseConfig::default_max_connections")]
    pub max_connections: u32,
}

impl DatabaseConfig {
    fn default_max_connections() -> u32 {
        5
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: Self::default_max_connections(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "JwtConfig::default_access_ttl")]
    pub access_token_ttl_hours: i64,
    #[serde(default = "JwtConfig::default_refresh_ttl")]
    pub refresh_token_ttl_hours: i64,
}

impl JwtConfig {
    fn default_access_ttl() -> i64 {
        Authenticator::DEFAULT_ACCESS_TOKEN_TTL_HOURS
    }

    fn default_refresh_ttl() -> i64 {
        Authenticator::DEFAULT_REFRESH_TOKEN_TTL_HOURS
    }
}

/// Argon2id cost parameters.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: argon2::Params::DEFAULT_M_COST,
            iterations: argon2::Params::DEFAULT_T_COST,
            parallelism: argon2::Params::DEFAULT_P_COST,
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, DATABASE__URL, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }

    /// Build the authenticator described by the `jwt` and `password` sections.
    ///
    /// # Errors
    /// * `InvalidParameters` - Argon2 rejects the configured cost
    pub fn authenticator(&self) -> Result<Authenticator, PasswordError> {
        let hasher = PasswordHasher::with_params(
            self.password.memory_kib,
            self.password.iterations,
            self.password.parallelism,
        )?;

        Ok(Authenticator::new(self.jwt.secret.as_bytes())
            .with_password_hasher(hasher)
            .with_token_lifetimes(
                chrono::Duration::hours(self.jwt.access_token_ttl_hours),
                chrono::Duration::hours(self.jwt.refresh_token_ttl_hours),
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            server: ServerConfig {
                http_port: 8080,
                expose_internal_errors: false,
            },
            database: DatabaseConfig::default(),
            jwt: JwtConfig {
                secret: "test-secret-key-for-jwt-signing-at-least-32-bytes".to_string(),
                access_token_ttl_hours: 1,
                refresh_token_ttl_hours: 48,
            },
            password: PasswordConfig {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            },
        }
    }

    #[test]
    fn test_authenticator_uses_configured_lifetimes() {
        let authenticator = config().authenticator().unwrap();

        assert_eq!(authenticator.access_token_ttl(), chrono::Duration::hours(1));
        assert_eq!(authenticator.refresh_token_ttl(), chrono::Duration::hours(48));
    }

    #[test]
    fn test_authenticator_rejects_bad_cost() {
        let mut config = config();
        config.password.iterations = 0;

        assert!(config.authenticator().is_err());
    }

    #[test]
    fn test_password_defaults_follow_argon2() {
        let defaults = PasswordConfig::default();
        assert_eq!(defaults.memory_kib, 19 * 1024);
        assert_eq!(defaults.iterations, 2);
        assert_eq!(defaults.parallelism, 1);
    }
}
