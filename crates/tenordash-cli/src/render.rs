//! Plain-text rendering of the dashboard for the terminal.

use std::fmt::Write as _;

use tenordash_core::{CanonicalRanking, StatsSummary};
use tenordash_dashboard::{Dashboard, TrendPoint};

const URL_WIDTH: usize = 48;

pub(crate) fn render_dashboard(dashboard: &Dashboard) -> String {
    let stats = dashboard.stats();
    let mut out = String::new();
    out.push_str(&status_line(&stats));
    out.push('\n');
    out.push_str(&stat_cards(&stats));
    out.push('\n');

    if let Some(message) = dashboard.error() {
        let _ = writeln!(out, "\nerror: {message}");
        return out;
    }

    let trend = dashboard.trend();
    if !trend.is_empty() {
        out.push('\n');
        out.push_str(&trend_chart(trend));
    }

    out.push('\n');
    out.push_str(&rankings_table(dashboard.rankings()));
    out
}

pub(crate) fn status_line(stats: &StatsSummary) -> String {
    format!(
        "Processing is {} | Last update: {}\n",
        stats.processing_status, stats.last_update
    )
}

pub(crate) fn stat_cards(stats: &StatsSummary) -> String {
    format!(
        "{:<14}{:<14}{:<14}{}\n{:<14}{:<14}{:<14}{}\n",
        "TOTAL GIFS",
        "PENDING",
        "COMPLETED",
        "LAST UPDATED",
        stats.total_gifs,
        stats.pending_gifs,
        stats.completed_gifs,
        stats.last_update,
    )
}

/// One bar per point; a better (lower) rank draws a longer bar.
pub(crate) fn trend_chart(trend: &[TrendPoint]) -> String {
    let worst = trend.iter().map(|p| p.rank).max().unwrap_or(0);
    let mut out = String::from("Ranking trend\n");
    for point in trend {
        let len = usize::try_from(worst - point.rank + 1).unwrap_or(1);
        let _ = writeln!(
            out,
            "{:<12}{:>6}  {}",
            point.date,
            format!("#{}", point.rank),
            "*".repeat(len.min(40))
        );
    }
    out
}

pub(crate) fn rankings_table(rankings: &[CanonicalRanking]) -> String {
    if rankings.is_empty() {
        return "No rankings found.\n".to_string();
    }

    let mut out = format!(
        "{:<width$}  {:<24}{:<12}{:<20}{}\n",
        "GIF URL",
        "SEARCH TERM",
        "RANK",
        "FILTER KEYWORD",
        "LAST UPDATED",
        width = URL_WIDTH,
    );
    out.push_str(&"-".repeat(URL_WIDTH + 2 + 24 + 12 + 20 + 12));
    out.push('\n');
    for ranking in rankings {
        let _ = writeln!(
            out,
            "{:<width$}  {:<24}{:<12}{:<20}{}",
            truncate(&ranking.gif_url, URL_WIDTH),
            truncate(&ranking.search_term, 22),
            ranking.updated_rank,
            truncate(&ranking.filter_keyword, 18),
            ranking.last_updated,
            width = URL_WIDTH,
        );
    }
    out
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        value.to_string()
    } else {
        let head: String = value.chars().take(max.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
