pub mod models {
    pub mod envelope;
    pub mod analytics;
    pub mod ml;
    pub mod system;
}

pub mod insights {
    pub mod pivot;
    pub mod activity;
    pub mod lifecycle;
    pub mod retention;
    pub mod engagement;
    pub mod churn;
    pub mod models;
    pub mod overview;
    pub mod elite;
}

pub mod endpoints;
pub mod error;
pub mod format;
pub mod normalize;
pub mod refresh;
pub mod retry;
pub mod table;

// Re-export commonly used items
pub use error::{ApiError, Result};
pub use normalize::{Dataset, FieldReader, FromResponse, FromRow};
pub use refresh::{Phase, RefreshAction, RefreshState};
pub use retry::{retry_with_policy, RetryPolicy};
pub use table::{CellValue, SortDirection, TableRow, TableState, TableView};

// Re-export models
pub use models::{
    envelope::ApiMetadata,
    analytics::{
        CrossGameGamer, DailyGamingActivity, GamerActivation, GamerDeactivation, GamerReactivation,
        GamerRetention, GamersByGamesPlayed, GamingActivityTotal, HighRetentionSummary,
        HighRetentionUser, UserDailyActivity,
    },
    ml::{
        ChampionModel, ChurnByGame, ChurnByGameResponse, ChurnModelInfo, ChurnPrediction,
        ChurnResponse, ChurnSummary, HighRiskUsersResponse, LeaderboardEntry, ModelInfo,
        ModelLeaderboard, RiskLevel,
    },
    system::{CacheSource, CacheStatus, HealthStatus},
};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_dataset_decodes_envelope() {
        let body = json!({
            "metadata": { "last_updated": "2024-01-01 05:00:00.000 UTC", "row_count": 1 },
            "data": [{ "day": "2024-01-01", "project": "Aurory", "number_of_new_gamers": "12" }]
        });
        let dataset = Dataset::<GamerActivation>::from_response(&body).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.rows[0].new_gamers, 12.0);
        assert_eq!(dataset.last_updated(), Some("2024-01-01 05:00:00.000 UTC"));
    }

    #[test]
    fn test_ml_response_has_no_envelope_time() {
        let body = json!({ "status": "Active", "features": ["a", "b"] });
        let info = ModelInfo::from_response(&body).unwrap();
        assert_eq!(info.features.len(), 2);
        assert_eq!(info.last_updated(), None);
    }
}
