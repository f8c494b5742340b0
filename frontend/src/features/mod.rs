//! Dashboard features. Each one owns its endpoints and polls them itself.

use shared::format::format_short_day;

pub mod elite_scroller;
pub mod global_kpis;
pub mod live_alerts;
pub mod live_ticker;
pub mod methodology;

pub mod analytics {
    pub mod cross_game;
    pub mod daily_activity;
    pub mod elite_gamers;
    pub mod gamer_activation;
    pub mod gamer_deactivation;
    pub mod gamer_reactivation;
    pub mod gamer_retention;
    pub mod games_played;
    pub mod gaming_activity_total;
    pub mod high_retention_summary;
    pub mod high_retention_users;
    pub mod user_daily_activity;
}

pub mod ml {
    pub mod churn_by_game;
    pub mod churn_predictions;
    pub mod high_risk_users;
    pub mod ml_data_scope;
    pub mod model_info;
    pub mod model_leaderboard;
}

/// Chart axis labels for day or week keys, e.g. `Jan 05`.
pub(crate) fn day_labels(keys: &[String]) -> Vec<String> {
    keys.iter().map(|k| format_short_day(k)).collect()
}
