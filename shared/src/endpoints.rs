//! Paths of the analytics API, relative to the configured base URL.

pub const GAMER_ACTIVATION: &str = "/api/analytics/gamer-activation";
pub const GAMER_RETENTION: &str = "/api/analytics/gamer-retention";
pub const GAMER_REACTIVATION: &str = "/api/analytics/gamer-reactivation";
pub const GAMER_DEACTIVATION: &str = "/api/analytics/gamer-deactivation";
pub const HIGH_RETENTION_USERS: &str = "/api/analytics/high-retention-users";
pub const HIGH_RETENTION_SUMMARY: &str = "/api/analytics/high-retention-summary";
pub const GAMERS_BY_GAMES_PLAYED: &str = "/api/analytics/gamers-by-games-played";
pub const CROSS_GAME_GAMERS: &str = "/api/analytics/cross-game-gamers";
pub const GAMING_ACTIVITY_TOTAL: &str = "/api/analytics/gaming-activity-total";
pub const DAILY_GAMING_ACTIVITY: &str = "/api/analytics/daily-gaming-activity";
pub const USER_DAILY_ACTIVITY: &str = "/api/analytics/user-daily-activity";

pub const CHURN_PREDICTIONS: &str = "/api/ml/predictions/churn?method=ensemble";
pub const CHURN_BY_GAME: &str = "/api/ml/predictions/churn/by-game?method=ensemble";
pub const HIGH_RISK_USERS: &str = "/api/ml/predictions/high-risk-users";
pub const MODEL_LEADERBOARD: &str = "/api/ml/models/leaderboard";
pub const MODEL_INFO: &str = "/api/ml/models/info";

pub const CACHE_STATUS: &str = "/api/cache/status";
pub const HEALTH: &str = "/api/health";

/// Joins a base URL and an endpoint path with exactly one slash.
pub fn join(base: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Every analytics dataset endpoint, in dashboard order.
    const ANALYTICS: [&str; 11] = [
        GAMER_ACTIVATION,
        GAMER_RETENTION,
        GAMER_REACTIVATION,
        GAMER_DEACTIVATION,
        HIGH_RETENTION_USERS,
        HIGH_RETENTION_SUMMARY,
        GAMERS_BY_GAMES_PLAYED,
        CROSS_GAME_GAMERS,
        GAMING_ACTIVITY_TOTAL,
        DAILY_GAMING_ACTIVITY,
        USER_DAILY_ACTIVITY,
    ];

    #[test]
    fn test_join() {
        assert_eq!(join("https://api.example.com/", "/api/health"), "https://api.example.com/api/health");
        assert_eq!(join("https://api.example.com", "api/health"), "https://api.example.com/api/health");
    }

    #[test]
    fn test_analytics_paths_are_distinct() {
        let mut paths = ANALYTICS.to_vec();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), ANALYTICS.len());
        assert!(ANALYTICS.iter().all(|p| p.starts_with("/api/analytics/")));
    }
}
