//! Model leaderboard and deployed model status.

use chrono::{DateTime, Utc};

use crate::format::{format_relative_hours, safe_date, MISSING};
use crate::models::ml::{LeaderboardEntry, ModelInfo};

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardKpis {
    pub champion: String,
    pub best_auc: f64,
    pub ensemble_size: usize,
}

pub fn leaderboard_kpis(entries: &[LeaderboardEntry]) -> LeaderboardKpis {
    LeaderboardKpis {
        champion: entries
            .iter()
            .find(|e| e.is_champion)
            .map(|e| e.model_name.clone())
            .unwrap_or_else(|| MISSING.to_string()),
        best_auc: entries.iter().map(|e| e.roc_auc).fold(0.0, f64::max),
        ensemble_size: entries.iter().filter(|e| e.in_ensemble).count(),
    }
}

pub const RADAR_AXES: [&str; 4] = ["AUC", "Accuracy", "Precision", "Recall"];

/// The first three models scored on each radar axis, in percent.
pub fn radar_models(entries: &[LeaderboardEntry]) -> Vec<(String, [f64; 4])> {
    entries
        .iter()
        .take(3)
        .map(|e| {
            (
                e.model_name.clone(),
                [e.roc_auc * 100.0, e.accuracy * 100.0, e.precision * 100.0, e.recall * 100.0],
            )
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelStatusKpis {
    pub status: String,
    pub last_trained: String,
    pub feature_count: usize,
}

pub fn model_status(info: &ModelInfo, now: DateTime<Utc>) -> ModelStatusKpis {
    let last_trained = info
        .champion
        .as_ref()
        .and_then(|c| c.trained_at.as_deref())
        .and_then(safe_date)
        .map(|at| format_relative_hours(at, now))
        .unwrap_or_else(|| MISSING.to_string());
    ModelStatusKpis {
        status: if info.status.is_empty() { "Active".to_string() } else { info.status.clone() },
        last_trained,
        feature_count: info.features.len(),
    }
}

/// Feature names in ranked order with a descending display weight.
///
/// The API publishes no importance scores, so the bar lengths only encode
/// rank. Seven-day feature names are relabelled to the eight-day window the
/// model is trained on.
pub fn feature_ranking(features: &[String]) -> Vec<(String, f64)> {
    features
        .iter()
        .enumerate()
        .map(|(i, name)| {
            (
                name.replacen("last_7", "last_8", 1),
                (1.0 - i as f64 * 0.08).max(0.0),
            )
        })
        .collect()
}
