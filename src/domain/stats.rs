//! Platform counters shown on the home page.

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub news_count: u64,
    pub requests_count: u64,
    pub politicians_count: u64,
    /// Percentage of requests resolved, 0..=100.
    pub response_rate: u64,
}

impl Stats {
    pub fn new(news_count: u64, requests_count: u64, politicians_count: u64, resolved: u64) -> Self {
        Self {
            news_count,
            requests_count,
            politicians_count,
            response_rate: response_rate(resolved, requests_count),
        }
    }
}

/// `round(100 * resolved / total)` with halves rounded up, `0` for no requests.
pub fn response_rate(resolved: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    (200 * resolved + total) / (2 * total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_rate() {
        assert_eq!(response_rate(0, 0), 0);
        assert_eq!(response_rate(1, 3), 33);
        assert_eq!(response_rate(2, 3), 67);
        assert_eq!(response_rate(2, 4), 50);
        assert_eq!(response_rate(1, 8), 13);
        assert_eq!(response_rate(5, 5), 100);
    }

    #[test]
    fn test_stats_json_shape() {
        let json = serde_json::to_value(Stats::new(10, 4, 2, 2)).unwrap();
        assert_eq!(json["newsCount"], 10);
        assert_eq!(json["politiciansCount"], 2);
        assert_eq!(json["responseRate"], 50);
    }
}
