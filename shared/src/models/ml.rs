//! Responses of the `/api/ml/*` endpoints.
//!
//! These are not wrapped in the analytics envelope; each has its own shape
//! and a couple of historical variants that are accepted here.

use std::fmt;

use serde_json::Value;

use crate::error::{ApiError, Result};
use crate::normalize::{json_kind, rows_from, FieldReader, FromResponse, FromRow, Row};
use crate::table::{CellValue, TableRow};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RiskLevel {
    High,
    Medium,
    #[default]
    Low,
    Unknown,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low];

    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => RiskLevel::High,
            "medium" => RiskLevel::Medium,
            "low" => RiskLevel::Low,
            _ => RiskLevel::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "High",
            RiskLevel::Medium => "Medium",
            RiskLevel::Low => "Low",
            RiskLevel::Unknown => "Unknown",
        }
    }

    pub fn is_at_risk(&self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Medium)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn object<'a>(value: &'a Value, what: &str) -> Result<&'a Row> {
    value.as_object().ok_or_else(|| {
        ApiError::Decode(format!("{} response must be an object, got {}", what, json_kind(value)))
    })
}

/// Per-wallet churn prediction with the behavioural features it was scored on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChurnPrediction {
    pub user_wallet: String,
    pub project: String,
    pub churn_probability: f64,
    pub risk_level: RiskLevel,
    pub active_days_last_7: f64,
    pub transactions_last_7: f64,
    pub total_active_days: f64,
    pub total_transactions: f64,
    pub avg_transactions_per_day: f64,
    pub days_since_last_activity: f64,
    pub week1_transactions: f64,
    pub week_last_transactions: f64,
    pub early_to_late_momentum: f64,
    pub consistency_score: f64,
}

impl FromRow for ChurnPrediction {
    fn from_row(r: &FieldReader<'_>) -> Self {
        Self {
            user_wallet: r.text(&["user_wallet", "user wallet", "wallet", "user"], "Unknown"),
            project: r.text(&["project", "game", "game project"], "Unknown"),
            churn_probability: r.number(&["churn_probability", "churn probability"]),
            risk_level: RiskLevel::parse(&r.text(
                &["risk_level", "risk level", "churn_risk", "churn risk"],
                "Low",
            )),
            active_days_last_7: r.number(&["active_days_last_7"]),
            transactions_last_7: r.number(&["transactions_last_7"]),
            total_active_days: r.number(&["total_active_days"]),
            total_transactions: r.number(&["total_transactions"]),
            avg_transactions_per_day: r.number(&["avg_transactions_per_day"]),
            days_since_last_activity: r.number(&["days_since_last_activity"]),
            week1_transactions: r.number(&["week1_transactions"]),
            week_last_transactions: r.number(&["week_last_transactions"]),
            early_to_late_momentum: r.number(&["early_to_late_momentum"]),
            consistency_score: r.number(&["consistency_score"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChurnSummary {
    pub total_users: f64,
    pub high_risk: f64,
    pub medium_risk: f64,
    pub low_risk: f64,
    pub avg_churn_probability: f64,
}

impl FromRow for ChurnSummary {
    fn from_row(r: &FieldReader<'_>) -> Self {
        Self {
            total_users: r.number(&["total_users", "total users"]),
            high_risk: r.number(&["high_risk", "high_risk_users"]),
            medium_risk: r.number(&["medium_risk", "medium_risk_users"]),
            low_risk: r.number(&["low_risk", "low_risk_users"]),
            avg_churn_probability: r.number(&["avg_churn_probability", "avg churn probability"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChurnModelInfo {
    pub champion: String,
    pub roc_auc: f64,
    pub ensemble_models: Vec<String>,
}

impl FromRow for ChurnModelInfo {
    fn from_row(r: &FieldReader<'_>) -> Self {
        Self {
            champion: r.text(&["champion", "champion_model"], "-"),
            roc_auc: r.number(&["roc_auc"]),
            ensemble_models: r.list(&["ensemble_models"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChurnResponse {
    pub prediction_type: Option<String>,
    pub method: Option<String>,
    pub total_users: f64,
    pub summary: Option<ChurnSummary>,
    pub predictions: Vec<ChurnPrediction>,
    pub model_info: Option<ChurnModelInfo>,
}

impl FromResponse for ChurnResponse {
    fn from_response(value: &Value) -> Result<Self> {
        let root = object(value, "churn")?;
        let r = FieldReader::new(root);
        // Older deployments nest the payload one level down at `data[0]`.
        let nested = root
            .get("data")
            .and_then(Value::as_array)
            .and_then(|items| items.first())
            .and_then(Value::as_object);

        let predictions = match root.get("predictions").and_then(Value::as_array) {
            Some(items) => rows_from(items),
            None => nested
                .and_then(|n| n.get("predictions"))
                .and_then(Value::as_array)
                .map(|items| rows_from(items))
                .unwrap_or_default(),
        };

        let summary = r
            .object(&["summary"])
            .or_else(|| nested.and_then(|n| n.get("summary")).and_then(Value::as_object))
            .map(|s| ChurnSummary::from_row(&FieldReader::new(s)));

        Ok(Self {
            prediction_type: r.opt_text(&["prediction_type"]),
            method: r.opt_text(&["method"]),
            total_users: r.number(&["total_users"]),
            summary,
            predictions,
            model_info: r
                .object(&["model_info"])
                .map(|m| ChurnModelInfo::from_row(&FieldReader::new(m))),
        })
    }
}

/// Churn aggregate for one game.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChurnByGame {
    pub project: String,
    pub total_users: f64,
    pub avg_churn_probability: f64,
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl FromRow for ChurnByGame {
    fn from_row(r: &FieldReader<'_>) -> Self {
        Self {
            project: r.text(&["project", "game project", "game"], "Unknown"),
            total_users: r.number(&["total_users", "total users"]),
            avg_churn_probability: r.number(&["avg_churn_probability", "avg churn probability"]),
            high: r.number(&["High", "high_risk_count", "high risk count"]),
            medium: r.number(&["Medium", "medium_risk_count", "medium risk count"]),
            low: r.number(&["Low", "low_risk_count", "low risk count"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChurnByGameResponse {
    pub games: Vec<ChurnByGame>,
}

impl FromResponse for ChurnByGameResponse {
    fn from_response(value: &Value) -> Result<Self> {
        let games = match value {
            Value::Array(items) => rows_from(items),
            Value::Object(obj) => obj
                .get("data")
                .and_then(Value::as_array)
                .map(|items| rows_from(items))
                .unwrap_or_default(),
            other => {
                return Err(ApiError::Decode(format!(
                    "churn by game response must be an object or array, got {}",
                    json_kind(other)
                )))
            }
        };
        Ok(Self { games })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighRiskUsersResponse {
    pub users: Vec<ChurnPrediction>,
}

impl FromResponse for HighRiskUsersResponse {
    fn from_response(value: &Value) -> Result<Self> {
        let users = match value {
            Value::Array(items) => rows_from(items),
            other => {
                let root = object(other, "high risk users")?;
                root.get("users")
                    .or_else(|| root.get("predictions"))
                    .and_then(Value::as_array)
                    .map(|items| rows_from(items))
                    .unwrap_or_default()
            }
        };
        Ok(Self { users })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub model_name: String,
    pub roc_auc: f64,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub training_time_seconds: f64,
    pub is_champion: bool,
    pub in_ensemble: bool,
}

impl FromRow for LeaderboardEntry {
    fn from_row(r: &FieldReader<'_>) -> Self {
        Self {
            rank: r.int_prefix(&["rank"]),
            model_name: r.text(&["model_name", "model name", "model"], "Unknown"),
            roc_auc: r.number(&["roc_auc", "roc auc"]),
            accuracy: r.number(&["accuracy"]),
            precision: r.number(&["precision"]),
            recall: r.number(&["recall"]),
            training_time_seconds: r.number(&["training_time_seconds", "training_time"]),
            is_champion: r.flag(&["is_champion"]),
            in_ensemble: r.flag(&["in_ensemble"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelLeaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl FromResponse for ModelLeaderboard {
    fn from_response(value: &Value) -> Result<Self> {
        let entries = match value {
            Value::Array(items) => rows_from(items),
            other => {
                let root = object(other, "leaderboard")?;
                root.get("leaderboard")
                    .or_else(|| root.get("data"))
                    .and_then(Value::as_array)
                    .map(|items| rows_from(items))
                    .unwrap_or_default()
            }
        };
        Ok(Self { entries })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChampionModel {
    pub name: String,
    pub roc_auc: f64,
    pub accuracy: f64,
    pub trained_at: Option<String>,
}

impl FromRow for ChampionModel {
    fn from_row(r: &FieldReader<'_>) -> Self {
        Self {
            name: r.text(&["name", "model_name"], "Ensemble"),
            roc_auc: r.number(&["roc_auc"]),
            accuracy: r.number(&["accuracy"]),
            trained_at: r.opt_text(&["trained_at", "trained at"]),
        }
    }
}

/// Status of the deployed churn model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelInfo {
    pub status: String,
    pub champion: Option<ChampionModel>,
    pub ensemble_models: Vec<String>,
    pub ensemble_size: f64,
    pub features: Vec<String>,
    pub prediction_window_days: Option<f64>,
}

impl FromResponse for ModelInfo {
    fn from_response(value: &Value) -> Result<Self> {
        let root = object(value, "model info")?;
        let r = FieldReader::new(root);
        let ensemble = r.object(&["ensemble", "ensemble_details"]).map(FieldReader::new);
        let ensemble_models = ensemble.map(|e| e.list(&["models"])).unwrap_or_default();
        let ensemble_size = ensemble
            .and_then(|e| e.opt_number(&["size"]))
            .unwrap_or(ensemble_models.len() as f64);

        Ok(Self {
            status: r.text(&["status"], "Active"),
            champion: r
                .object(&["champion", "champion_model"])
                .map(|c| ChampionModel::from_row(&FieldReader::new(c))),
            ensemble_models,
            ensemble_size,
            features: r.list(&["features", "feature names"]),
            prediction_window_days: r.opt_number(&["prediction_window_days"]),
        })
    }
}

impl TableRow for ChurnPrediction {
    fn fields(&self) -> Vec<(&'static str, CellValue)> {
        vec![
            ("user_wallet", self.user_wallet.as_str().into()),
            ("project", self.project.as_str().into()),
            ("churn_probability", self.churn_probability.into()),
            ("risk_level", self.risk_level.as_str().into()),
            ("days_since_last_activity", self.days_since_last_activity.into()),
            ("total_transactions", self.total_transactions.into()),
            ("total_active_days", self.total_active_days.into()),
            ("consistency_score", self.consistency_score.into()),
        ]
    }
}

impl TableRow for ChurnByGame {
    fn fields(&self) -> Vec<(&'static str, CellValue)> {
        vec![
            ("project", self.project.as_str().into()),
            ("total_users", self.total_users.into()),
            ("avg_churn_probability", self.avg_churn_probability.into()),
            ("high", self.high.into()),
            ("medium", self.medium.into()),
            ("low", self.low.into()),
        ]
    }
}

impl TableRow for LeaderboardEntry {
    fn fields(&self) -> Vec<(&'static str, CellValue)> {
        vec![
            ("rank", self.rank.into()),
            ("model_name", self.model_name.as_str().into()),
            ("roc_auc", self.roc_auc.into()),
            ("accuracy", self.accuracy.into()),
            ("precision", self.precision.into()),
            ("recall", self.recall.into()),
            ("training_time_seconds", self.training_time_seconds.into()),
            ("is_champion", self.is_champion.into()),
            ("in_ensemble", self.in_ensemble.into()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_risk_level_parse() {
        assert_eq!(RiskLevel::parse("HIGH"), RiskLevel::High);
        assert_eq!(RiskLevel::parse("medium"), RiskLevel::Medium);
        assert_eq!(RiskLevel::parse(" Low "), RiskLevel::Low);
        assert_eq!(RiskLevel::parse("severe"), RiskLevel::Unknown);
        assert!(RiskLevel::High.is_at_risk());
        assert!(!RiskLevel::Low.is_at_risk());
    }

    #[test]
    fn test_churn_response_top_level() {
        let body = json!({
            "prediction_type": "churn",
            "method": "ensemble",
            "total_users": 3,
            "summary": {"total_users": 3, "high_risk": 1, "medium_risk": 1, "low_risk": 1, "avg_churn_probability": 0.4},
            "predictions": [
                {"user_wallet": "a", "project": "Aurory", "churn_probability": 0.9, "risk_level": "High"},
                {"user_wallet": "b", "churn_risk": "Medium", "churn_probability": "0.5"},
                {"user_wallet": "c"}
            ],
            "model_info": {"champion": "xgboost", "roc_auc": 0.91, "ensemble_models": ["xgboost", "lightgbm"]}
        });
        let resp = ChurnResponse::from_response(&body).unwrap();
        assert_eq!(resp.predictions.len(), 3);
        assert_eq!(resp.predictions[1].risk_level, RiskLevel::Medium);
        assert_eq!(resp.predictions[1].churn_probability, 0.5);
        assert_eq!(resp.predictions[2].risk_level, RiskLevel::Low);
        assert_eq!(resp.summary.unwrap().high_risk, 1.0);
        let info = resp.model_info.unwrap();
        assert_eq!(info.champion, "xgboost");
        assert_eq!(info.ensemble_models, vec!["xgboost", "lightgbm"]);
    }

    #[test]
    fn test_churn_response_nested_data() {
        let body = json!({"data": [{"predictions": [{"user_wallet": "z", "churn_probability": 0.2}]}]});
        let resp = ChurnResponse::from_response(&body).unwrap();
        assert_eq!(resp.predictions.len(), 1);
        assert!(resp.summary.is_none());
    }

    #[test]
    fn test_churn_by_game_columns() {
        let body = json!({"data": [
            {"project": "A", "total_users": 10, "avg_churn_probability": 0.3, "High": 2, "Medium": 3, "Low": 5},
            {"project": "B", "high_risk_count": 7}
        ]});
        let resp = ChurnByGameResponse::from_response(&body).unwrap();
        assert_eq!(resp.games[0].high + resp.games[0].medium + resp.games[0].low, 10.0);
        assert_eq!(resp.games[1].high, 7.0);

        let bare = ChurnByGameResponse::from_response(&json!([{"project": "C"}])).unwrap();
        assert_eq!(bare.games[0].project, "C");
    }

    #[test]
    fn test_high_risk_users_variants() {
        let users = HighRiskUsersResponse::from_response(&json!({"users": [{"user_wallet": "x"}]})).unwrap();
        assert_eq!(users.users.len(), 1);
        let preds = HighRiskUsersResponse::from_response(&json!({"predictions": [{}, {}]})).unwrap();
        assert_eq!(preds.users.len(), 2);
    }

    #[test]
    fn test_leaderboard_variants() {
        let body = json!({"leaderboard": [
            {"rank": 1, "model_name": "xgboost", "roc_auc": 0.92, "is_champion": true, "in_ensemble": true},
            {"rank": 2, "model_name": "rf", "roc_auc": 0.88, "in_ensemble": false}
        ]});
        let board = ModelLeaderboard::from_response(&body).unwrap();
        assert_eq!(board.entries.len(), 2);
        assert!(board.entries[0].is_champion);
        assert!(!board.entries[1].in_ensemble);

        let bare = ModelLeaderboard::from_response(&json!([{"model_name": "lr"}])).unwrap();
        assert_eq!(bare.entries[0].model_name, "lr");
    }

    #[test]
    fn test_model_info() {
        let body = json!({
            "status": "ready",
            "champion": {"name": "xgboost", "roc_auc": 0.9, "accuracy": 0.85, "trained_at": "2024-01-01 10:00:00"},
            "ensemble": {"models": ["xgboost", "lightgbm"], "size": 2},
            "features": ["active_days_last_7", "total_transactions"],
            "prediction_window_days": 14
        });
        let info = ModelInfo::from_response(&body).unwrap();
        assert_eq!(info.status, "ready");
        assert_eq!(info.champion.as_ref().unwrap().accuracy, 0.85);
        assert_eq!(info.ensemble_size, 2.0);
        assert_eq!(info.features.len(), 2);
        assert_eq!(info.prediction_window_days, Some(14.0));

        assert!(ModelInfo::from_response(&json!([1, 2])).is_err());
    }
}
