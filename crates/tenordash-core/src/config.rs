//! Server configuration from the process environment (and `.env`).

use std::env::VarError;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Reads `.env` if present, then builds an [`AppConfig`] from the environment.
///
/// # Errors
///
/// Returns `ConfigError` when `DATABASE_URL` is unset or any `TENORDASH_*`
/// value fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Same as [`load_app_config`] without touching `.env`.
///
/// # Errors
///
/// See [`load_app_config`].
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Typed access to environment variables through an injectable lookup.
struct EnvReader<F> {
    lookup: F,
}

impl<F> EnvReader<F>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    fn required(&self, var: &str) -> Result<String, ConfigError> {
        (self.lookup)(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    }

    fn text(&self, var: &str, default: &str) -> String {
        (self.lookup)(var).unwrap_or_else(|_| default.to_string())
    }

    /// Trimmed value that must not end up empty.
    fn name(&self, var: &str, default: &str) -> Result<String, ConfigError> {
        let value = self.text(var, default).trim().to_string();
        if value.is_empty() {
            return Err(invalid(var, "must not be empty"));
        }
        Ok(value)
    }

    fn parsed<T>(&self, var: &str, default: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.text(var, default)
            .trim()
            .parse::<T>()
            .map_err(|e| invalid(var, e))
    }
}

fn invalid(var: &str, reason: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason: reason.to_string(),
    }
}

fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let env = EnvReader { lookup };

    Ok(AppConfig {
        database_url: env.required("DATABASE_URL")?,
        env: env
            .text("TENORDASH_ENV", "development")
            .parse::<Environment>()?,
        bind_addr: env.parsed::<SocketAddr>("TENORDASH_BIND_ADDR", "0.0.0.0:3000")?,
        log_level: env.text("TENORDASH_LOG_LEVEL", "info"),
        database_prefix: env.name("TENORDASH_DB_PREFIX", "tenor_database")?,
        rankings_collection: env.name("TENORDASH_COLLECTION", "gif_rankings")?,
        db_connect_timeout_secs: env.parsed("TENORDASH_DB_CONNECT_TIMEOUT_SECS", "10")?,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
