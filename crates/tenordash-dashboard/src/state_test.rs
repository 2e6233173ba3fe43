use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tenordash_core::{ProcessingStatus, ResponseMeta};

use super::*;

enum Outcome {
    Rankings(Vec<CanonicalRanking>),
    ApiFailure(&'static str),
    Transport,
}

struct StubFetcher {
    outcome: Outcome,
    calls: AtomicUsize,
    last_username: Mutex<Option<String>>,
}

impl StubFetcher {
    fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_username: Mutex::new(None),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RankingsFetcher for StubFetcher {
    async fn fetch_rankings(&self, username: &str) -> Result<RankingsResponse, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_username.lock().unwrap() = Some(username.to_string());
        match &self.outcome {
            Outcome::Rankings(rankings) => Ok(success_response(rankings.clone())),
            Outcome::ApiFailure(message) => Err(ClientError::Api((*message).to_string())),
            Outcome::Transport => Err(ClientError::UnexpectedStatus {
                status: 502,
                url: "http://localhost:3000/rankings".to_string(),
            }),
        }
    }
}

fn ranking(i: usize, rank: &str) -> CanonicalRanking {
    CanonicalRanking {
        id: format!("id-{i}"),
        gif_url: format!("https://tenor.com/view/gif-{i}"),
        search_term: "hello".to_string(),
        updated_rank: rank.to_string(),
        filter_keyword: "wave".to_string(),
        last_updated: format!("{:02}-06-2024", i + 1),
    }
}

fn success_response(rankings: Vec<CanonicalRanking>) -> RankingsResponse {
    let stats = StatsSummary::from_rankings(&rankings);
    RankingsResponse::success(rankings, stats, ResponseMeta::new("req-test"))
}

fn ten_rankings() -> Vec<CanonicalRanking> {
    (0..10)
        .map(|i| {
            if i == 2 {
                ranking(i, "#NOT_FOUND")
            } else {
                ranking(i, &format!("#{}", i + 1))
            }
        })
        .collect()
}

// -----------------------------------------------------------------------
// submit guards
// -----------------------------------------------------------------------

#[test]
fn blank_submit_is_ignored() {
    let mut dashboard = Dashboard::new();
    assert_eq!(dashboard.submit("   "), None);
    assert_eq!(dashboard.state(), &DashboardState::Idle);
}

#[test]
fn submit_extracts_username_from_profile_url() {
    let mut dashboard = Dashboard::new();
    let pending = dashboard
        .submit("https://tenor.com/users/SwissMote")
        .expect("accepted");
    assert_eq!(pending.username, "SwissMote");
    assert!(dashboard.is_loading());
}

#[test]
fn profile_url_without_username_is_an_error() {
    let mut dashboard = Dashboard::new();
    assert_eq!(dashboard.submit("https://tenor.com/users/"), None);
    assert!(dashboard.error().is_some());
    assert_eq!(dashboard.stats().processing_status, ProcessingStatus::Error);
}

#[tokio::test]
async fn submit_while_loading_makes_no_second_call() {
    let fetcher = StubFetcher::new(Outcome::Rankings(ten_rankings()));
    let mut dashboard = Dashboard::new();

    let first = dashboard.submit("swissmote").expect("first submit accepted");
    assert!(!dashboard.load(&fetcher, "someone-else").await);
    assert_eq!(dashboard.submit("someone-else"), None);
    assert_eq!(fetcher.calls(), 0);

    assert!(dashboard.complete(first.ticket, Ok(success_response(ten_rankings()))));
    assert_eq!(dashboard.rankings().len(), 10);
}

// -----------------------------------------------------------------------
// responses
// -----------------------------------------------------------------------

#[tokio::test]
async fn successful_load_stores_rankings_and_bounded_trend() {
    let fetcher = StubFetcher::new(Outcome::Rankings(ten_rankings()));
    let mut dashboard = Dashboard::new();

    assert!(dashboard.load(&fetcher, "https://tenor.com/users/swissmote").await);

    assert_eq!(fetcher.calls(), 1);
    assert_eq!(
        fetcher.last_username.lock().unwrap().as_deref(),
        Some("swissmote")
    );
    assert_eq!(dashboard.rankings().len(), 10);
    let trend = dashboard.trend();
    assert!(trend.len() <= 7);
    assert_eq!(trend.len(), 6, "the #NOT_FOUND entry is dropped");
    assert_eq!(trend[0].rank, 1);
    assert_eq!(trend[2].rank, 4);
    assert_eq!(dashboard.stats().total_gifs, 10);
    assert_eq!(dashboard.stats().processing_status, ProcessingStatus::Active);
    assert!(dashboard.error().is_none());
}

#[tokio::test]
async fn failure_clears_previous_data() {
    let mut dashboard = Dashboard::new();
    let ok = StubFetcher::new(Outcome::Rankings(ten_rankings()));
    assert!(dashboard.load(&ok, "swissmote").await);
    assert!(!dashboard.rankings().is_empty());

    let failing = StubFetcher::new(Outcome::Transport);
    assert!(dashboard.load(&failing, "swissmote").await);

    assert!(dashboard.rankings().is_empty());
    assert!(dashboard.trend().is_empty());
    assert!(dashboard
        .error()
        .expect("error message")
        .contains("502"));
    let stats = dashboard.stats();
    assert_eq!(stats.total_gifs, 0);
    assert_eq!(stats.last_update, "N/A");
    assert_eq!(stats.processing_status, ProcessingStatus::Error);
}

#[tokio::test]
async fn api_failure_message_is_shown() {
    let fetcher = StubFetcher::new(Outcome::ApiFailure("username is required"));
    let mut dashboard = Dashboard::new();
    assert!(dashboard.load(&fetcher, "x").await);
    assert_eq!(dashboard.error(), Some("username is required"));
}

#[test]
fn unsuccessful_envelope_becomes_error_state() {
    let mut dashboard = Dashboard::new();
    let pending = dashboard.submit("swissmote").expect("accepted");
    let response = RankingsResponse::failure("boom", ResponseMeta::new("req"));
    assert!(dashboard.complete(pending.ticket, Ok(response)));
    assert_eq!(dashboard.error(), Some("boom"));
}

#[test]
fn cancelled_request_response_is_discarded() {
    let mut dashboard = Dashboard::new();
    let pending = dashboard.submit("swissmote").expect("accepted");
    assert!(dashboard.cancel());
    assert!(!dashboard.complete(pending.ticket, Ok(success_response(ten_rankings()))));
    assert_eq!(dashboard.state(), &DashboardState::Idle);
}

#[test]
fn only_latest_request_may_update_state() {
    let mut dashboard = Dashboard::new();
    let first = dashboard.submit("first").expect("accepted");
    dashboard.cancel();
    let second = dashboard.submit("second").expect("accepted");

    assert!(!dashboard.complete(first.ticket, Ok(success_response(ten_rankings()))));
    assert!(dashboard.is_loading());
    assert!(dashboard.complete(second.ticket, Ok(success_response(vec![ranking(0, "#1")]))));
    match dashboard.state() {
        DashboardState::Success(loaded) => {
            assert_eq!(loaded.username, "second");
            assert_eq!(loaded.rankings.len(), 1);
        }
        other => panic!("expected success, got {other:?}"),
    }
}

#[test]
fn cancel_when_idle_is_a_no_op() {
    let mut dashboard = Dashboard::new();
    assert!(!dashboard.cancel());
}

// -----------------------------------------------------------------------
// export
// -----------------------------------------------------------------------

#[test]
fn nothing_to_export_before_a_load() {
    let dashboard = Dashboard::new();
    assert_eq!(dashboard.export_csv(ExportKind::Rankings), None);
    assert_eq!(dashboard.export_csv(ExportKind::Stats), None);
}

#[test]
fn exports_after_successful_load() {
    let mut dashboard = Dashboard::new();
    let pending = dashboard.submit("swissmote").expect("accepted");
    dashboard.complete(pending.ticket, Ok(success_response(vec![ranking(0, "#4")])));

    let rankings = dashboard.export_csv(ExportKind::Rankings).expect("rankings csv");
    assert_eq!(rankings.filename, "tenor_rankings.csv");
    assert!(rankings
        .content
        .starts_with("id,gif_url,search_term,updated_rank,filter_keyword,last_updated\n"));
    assert_eq!(rankings.content.lines().count(), 2);

    let stats = dashboard.export_csv(ExportKind::Stats).expect("stats csv");
    assert_eq!(stats.filename, "tenor_stats.csv");
    assert_eq!(
        stats.content,
        "total_gifs,pending_gifs,completed_gifs,last_update,status\n1,0,1,\"01-06-2024\",\"active\""
    );
}

#[test]
fn empty_success_exports_stats_but_not_rankings() {
    let mut dashboard = Dashboard::new();
    let pending = dashboard.submit("swissmote").expect("accepted");
    dashboard.complete(pending.ticket, Ok(success_response(Vec::new())));

    assert_eq!(dashboard.export_csv(ExportKind::Rankings), None);
    assert!(dashboard.export_csv(ExportKind::Stats).is_some());
}

struct StalledFetcher;

#[async_trait]
impl RankingsFetcher for StalledFetcher {
    async fn fetch_rankings(&self, _username: &str) -> Result<RankingsResponse, ClientError> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn dropped_load_returns_to_idle() {
    let mut dashboard = Dashboard::new();

    let timed_out = tokio::time::timeout(
        std::time::Duration::from_millis(10),
        dashboard.load(&StalledFetcher, "swissmote"),
    )
    .await;

    assert!(timed_out.is_err());
    assert_eq!(dashboard.state(), &DashboardState::Idle);

    let fetcher = StubFetcher::new(Outcome::Rankings(ten_rankings()));
    assert!(dashboard.load(&fetcher, "swissmote").await);
    assert_eq!(fetcher.calls(), 1);
    assert_eq!(dashboard.rankings().len(), 10);
}
