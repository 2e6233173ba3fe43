pub mod client;
pub mod error;
pub mod export;
pub mod state;
pub mod trend;

pub use client::{RankingsClient, RankingsFetcher};
pub use error::ClientError;
pub use export::{to_csv, CsvExport, ExportKind};
pub use state::{Dashboard, DashboardState, LoadedRankings, PendingRequest, RequestTicket};
pub use trend::{derive_trend, TrendPoint, TREND_LEN};
