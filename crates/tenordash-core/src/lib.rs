pub mod api;
pub mod app_config;
pub mod config;
pub mod normalize;
pub mod rankings;
pub mod username;

use thiserror::Error;

pub use api::{RankingsResponse, ResponseMeta};
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use normalize::{normalize_ranking, normalize_ranking_at, today_dmy, NOT_FOUND_RANK};
pub use rankings::{CanonicalRanking, ProcessingStatus, RawRankingRecord, StatsSummary};
pub use username::{database_name, extract_username, UsernameKey};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("username is required")]
    EmptyUsername,
}
