use std::net::SocketAddr;
use std::str::FromStr;

use crate::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Development, Self::Test, Self::Production]
            .into_iter()
            .find(|env| env.as_str() == s.trim())
            .ok_or_else(|| ConfigError::InvalidEnvVar {
                var: "TENORDASH_ENV".to_string(),
                reason: format!("unknown environment \"{s}\""),
            })
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings for `tenordash-server`, read from `TENORDASH_*` variables.
#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Prefix joined with the username to name each per-user database.
    pub database_prefix: String,
    /// Collection holding the ranking documents inside each user database.
    pub rankings_collection: String,
    pub db_connect_timeout_secs: u64,
}

// Connection strings carry credentials, so they never reach the logs.
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &"[redacted]")
            .field("env", &self.env.as_str())
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_prefix", &self.database_prefix)
            .field("rankings_collection", &self.rankings_collection)
            .field("db_connect_timeout_secs", &self.db_connect_timeout_secs)
            .finish()
    }
}
