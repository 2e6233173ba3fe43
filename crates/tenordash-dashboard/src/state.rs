//! Dashboard state machine: `Idle → Loading → {Success, Error}`.
//!
//! Every accepted submit is issued a [`RequestTicket`]. Only the response
//! carrying the ticket of the request currently in flight may change state;
//! anything else (a cancelled or superseded request) is dropped.

use tenordash_core::{extract_username, CanonicalRanking, RankingsResponse, StatsSummary};

use crate::client::RankingsFetcher;
use crate::error::ClientError;
use crate::export::{to_csv, CsvExport, ExportKind, StatsExportRow};
use crate::trend::{derive_trend, TrendPoint};

const INVALID_INPUT_MESSAGE: &str = "Please enter a valid Tenor profile URL or username";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// A submit the dashboard accepted; the caller performs the fetch and hands
/// the outcome back through [`Dashboard::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub ticket: RequestTicket,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedRankings {
    pub username: String,
    pub rankings: Vec<CanonicalRanking>,
    pub stats: StatsSummary,
    pub trend: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardState {
    Idle,
    Loading {
        ticket: RequestTicket,
        username: String,
    },
    Success(LoadedRankings),
    Error {
        message: String,
    },
}

#[derive(Debug)]
pub struct Dashboard {
    state: DashboardState,
    last_ticket: u64,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: DashboardState::Idle,
            last_ticket: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.state, DashboardState::Loading { .. })
    }

    /// Starts a request for a profile URL or bare username.
    ///
    /// Returns `None`, leaving the state untouched, when the input is blank
    /// or a request is already in flight. Input that is a profile URL with no
    /// username moves straight to `Error`.
    pub fn submit(&mut self, input: &str) -> Option<PendingRequest> {
        if self.is_loading() || input.trim().is_empty() {
            return None;
        }

        let username = extract_username(input).trim().to_string();
        if username.is_empty() {
            self.state = DashboardState::Error {
                message: INVALID_INPUT_MESSAGE.to_string(),
            };
            return None;
        }

        self.last_ticket += 1;
        let ticket = RequestTicket(self.last_ticket);
        self.state = DashboardState::Loading {
            ticket,
            username: username.clone(),
        };
        Some(PendingRequest { ticket, username })
    }

    /// Applies the outcome of the request identified by `ticket`.
    ///
    /// Returns `false` when the response is stale and was discarded.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<RankingsResponse, ClientError>,
    ) -> bool {
        let username = match &self.state {
            DashboardState::Loading {
                ticket: current,
                username,
            } if *current == ticket => username.clone(),
            _ => {
                tracing::debug!(?ticket, "discarding stale rankings response");
                return false;
            }
        };

        self.state = match outcome {
            Ok(response) if response.success => {
                let trend = derive_trend(&response.rankings);
                DashboardState::Success(LoadedRankings {
                    username,
                    rankings: response.rankings,
                    stats: response.stats,
                    trend,
                })
            }
            Ok(response) => DashboardState::Error {
                message: response
                    .error
                    .unwrap_or_else(|| "Failed to fetch data".to_string()),
            },
            Err(e) => {
                tracing::warn!(username = %username, error = %e, "error fetching rankings");
                DashboardState::Error {
                    message: e.to_string(),
                }
            }
        };
        true
    }

    /// Abandons the request in flight; its response will be discarded.
    ///
    /// Returns `false` if nothing was loading.
    pub fn cancel(&mut self) -> bool {
        if self.is_loading() {
            self.state = DashboardState::Idle;
            true
        } else {
            false
        }
    }

    /// Submits `input`, fetches through `fetcher` and applies the result.
    ///
    /// Returns `false` without calling `fetcher` when the submit is ignored.
    /// Dropping the future before it resolves (a timeout, say) returns the
    /// dashboard to `Idle` so the next submit is accepted.
    pub async fn load<F>(&mut self, fetcher: &F, input: &str) -> bool
    where
        F: RankingsFetcher + ?Sized,
    {
        let Some(pending) = self.submit(input) else {
            return false;
        };
        let mut in_flight = InFlight {
            dashboard: self,
            ticket: pending.ticket,
            settled: false,
        };
        let outcome = fetcher.fetch_rankings(&pending.username).await;
        in_flight.settled = true;
        in_flight.dashboard.complete(pending.ticket, outcome)
    }

    /// Drops back to `Idle` if `ticket` is still the request in flight.
    fn abandon(&mut self, ticket: RequestTicket) {
        if matches!(&self.state, DashboardState::Loading { ticket: current, .. } if *current == ticket)
        {
            tracing::debug!(?ticket, "rankings request abandoned");
            self.state = DashboardState::Idle;
        }
    }

    /// Rankings to show in the table; empty unless the last load succeeded.
    #[must_use]
    pub fn rankings(&self) -> &[CanonicalRanking] {
        match &self.state {
            DashboardState::Success(loaded) => &loaded.rankings,
            _ => &[],
        }
    }

    #[must_use]
    pub fn trend(&self) -> &[TrendPoint] {
        match &self.state {
            DashboardState::Success(loaded) => &loaded.trend,
            _ => &[],
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            DashboardState::Error { message } => Some(message),
            _ => None,
        }
    }

    /// Stats for the stat cards; always renderable.
    #[must_use]
    pub fn stats(&self) -> StatsSummary {
        match &self.state {
            DashboardState::Idle | DashboardState::Loading { .. } => StatsSummary::waiting(),
            DashboardState::Success(loaded) => loaded.stats.clone(),
            DashboardState::Error { .. } => StatsSummary::errored(),
        }
    }

    /// CSV for `kind`, or `None` when nothing has been loaded for it.
    ///
    /// Rankings need at least one loaded ranking; stats need a successful
    /// load, even an empty one.
    #[must_use]
    pub fn export_csv(&self, kind: ExportKind) -> Option<CsvExport> {
        let DashboardState::Success(loaded) = &self.state else {
            return None;
        };

        let rendered = match kind {
            ExportKind::Rankings if loaded.rankings.is_empty() => return None,
            ExportKind::Rankings => to_csv(&loaded.rankings),
            ExportKind::Stats => to_csv(&[StatsExportRow::from(&loaded.stats)]),
        };

        match rendered {
            Ok(content) => Some(CsvExport {
                filename: kind.filename(),
                content,
            }),
            Err(e) => {
                tracing::error!(error = %e, ?kind, "failed to render CSV export");
                None
            }
        }
    }
}

/// Undoes the `Loading` state of a [`Dashboard::load`] that never finished.
struct InFlight<'a> {
    dashboard: &'a mut Dashboard,
    ticket: RequestTicket,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.dashboard.abandon(self.ticket);
        }
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
