use serde::Serialize;
use tenordash_core::CanonicalRanking;

/// Number of rankings plotted on the trend chart.
pub const TREND_LEN: usize = 7;

/// One point on the ranking trend chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: String,
    pub rank: i64,
}

/// Chart series from the first [`TREND_LEN`] rankings.
///
/// Rankings whose rank is not an integer (`#NOT_FOUND`, free text) are left
/// out, so the series may be shorter than the window.
#[must_use]
pub fn derive_trend(rankings: &[CanonicalRanking]) -> Vec<TrendPoint> {
    rankings
        .iter()
        .take(TREND_LEN)
        .filter_map(|r| {
            r.rank_number().map(|rank| TrendPoint {
                date: r.last_updated.clone(),
                rank,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranking(i: usize, rank: &str) -> CanonicalRanking {
        CanonicalRanking {
            id: i.to_string(),
            gif_url: format!("https://tenor.com/view/{i}"),
            search_term: "cat".to_string(),
            updated_rank: rank.to_string(),
            filter_keyword: String::new(),
            last_updated: format!("{:02}-01-2024", i + 1),
        }
    }

    #[test]
    fn trend_is_capped_at_window() {
        let rankings: Vec<_> = (0..10).map(|i| ranking(i, &format!("#{i}"))).collect();
        let trend = derive_trend(&rankings);
        assert_eq!(trend.len(), TREND_LEN);
        assert_eq!(trend[0], TrendPoint { date: "01-01-2024".to_string(), rank: 0 });
        assert_eq!(trend[6].rank, 6);
    }

    #[test]
    fn unparsable_ranks_are_dropped() {
        let rankings: Vec<_> = (0..10)
            .map(|i| {
                if i % 3 == 0 {
                    ranking(i, "#NOT_FOUND")
                } else {
                    ranking(i, &format!("#{}", i * 2))
                }
            })
            .collect();
        let trend = derive_trend(&rankings);
        // Indices 0, 3 and 6 fall inside the window and are unparsable.
        assert_eq!(trend.len(), 4);
        assert!(trend.iter().all(|p| p.rank != 0));
        assert_eq!(
            trend.iter().map(|p| p.rank).collect::<Vec<_>>(),
            vec![2, 4, 8, 10]
        );
    }

    #[test]
    fn empty_rankings_give_empty_trend() {
        assert!(derive_trend(&[]).is_empty());
    }
}
