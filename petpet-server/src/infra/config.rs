use std::env;

use anyhow::{Context, bail};

/// Server configuration, read from the environment with CLI overrides.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    /// Absent when running with the in-memory backend.
    pub database_url: Option<String>,
    pub cors_allowed_origins: Vec<String>,
    pub password_pepper: String,
    pub token_hmac_key: String,
    /// Bearer token lifetime in hours.
    pub session_ttl_hours: i64,
}

impl Config {
    pub const DEFAULT_HOST: &'static str = "127.0.0.1";
    pub const DEFAULT_PORT: u16 = 3000;
    pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24 * 7;

    /// Load configuration from `PETPET_*` environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let server_host = env::var("PETPET_HOST")
            .unwrap_or_else(|_| Self::DEFAULT_HOST.to_string());
        let server_port = match env::var("PETPET_PORT") {
            Ok(port) => port
                .parse::<u16>()
                .with_context(|| format!("invalid PETPET_PORT '{port}'"))?,
            Err(_) => Self::DEFAULT_PORT,
        };

        let database_url = env::var("DATABASE_URL").ok();

        let cors_allowed_origins = env::var("PETPET_CORS_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| {
                vec!["http://localhost:5173".to_string()]
            });

        let password_pepper = env::var("PETPET_PASSWORD_PEPPER")
            .context("PETPET_PASSWORD_PEPPER must be set")?;
        let token_hmac_key = env::var("PETPET_TOKEN_HMAC_KEY")
            .context("PETPET_TOKEN_HMAC_KEY must be set")?;

        let session_ttl_hours = match env::var("PETPET_SESSION_TTL_HOURS") {
            Ok(hours) => hours.parse::<i64>().with_context(|| {
                format!("invalid PETPET_SESSION_TTL_HOURS '{hours}'")
            })?,
            Err(_) => Self::DEFAULT_SESSION_TTL_HOURS,
        };

        let config = Self {
            server_host,
            server_port,
            database_url,
            cors_allowed_origins,
            password_pepper,
            token_hmac_key,
            session_ttl_hours,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.password_pepper.is_empty() {
            bail!("PETPET_PASSWORD_PEPPER must not be empty");
        }
        if self.token_hmac_key.is_empty() {
            bail!("PETPET_TOKEN_HMAC_KEY must not be empty");
        }
        if self.session_ttl_hours <= 0 {
            bail!("PETPET_SESSION_TTL_HOURS must be positive");
        }
        Ok(())
    }

    /// Configuration for the in-crate test suites.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            server_host: Self::DEFAULT_HOST.to_string(),
            server_port: 0,
            database_url: None,
            cors_allowed_origins: vec!["http://localhost:5173".to_string()],
            password_pepper: "test-pepper".to_string(),
            token_hmac_key: "test-token-key".to_string(),
            session_ttl_hours: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_bad_ttl_and_secrets() {
        let mut config = Config::for_tests();
        assert!(config.validate().is_ok());

        config.session_ttl_hours = 0;
        assert!(config.validate().is_err());

        let mut config = Config::for_tests();
        config.password_pepper.clear();
        assert!(config.validate().is_err());
    }
}
