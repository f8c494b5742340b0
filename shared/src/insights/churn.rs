//! Churn prediction aggregates.

use std::cmp::Ordering;

use crate::format::MISSING;
use crate::insights::pivot::mean_or_zero;
use crate::models::analytics::GamersByGamesPlayed;
use crate::models::ml::{ChurnByGame, ChurnPrediction, ChurnResponse, ModelInfo, RiskLevel};

/// Probability above which a wallet counts as high risk.
pub const HIGH_RISK_THRESHOLD: f64 = 0.4;
pub const CRITICAL_THRESHOLD: f64 = 0.6;
/// Assumed lifetime value per wallet, in USD.
pub const VALUE_PER_USER: f64 = 150.0;

/// `None` keeps every prediction.
pub fn filter_by_risk(predictions: &[ChurnPrediction], level: Option<RiskLevel>) -> Vec<&ChurnPrediction> {
    predictions
        .iter()
        .filter(|p| level.map_or(true, |l| p.risk_level == l))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChurnKpis {
    pub total_at_risk: f64,
    /// Mean churn probability in percent
    pub avg_probability_pct: f64,
    pub champion: String,
    pub accuracy_pct: f64,
    pub roc_auc_pct: f64,
}

/// Server summary wins; otherwise the KPIs are computed from the predictions.
pub fn churn_kpis(response: &ChurnResponse, model: Option<&ModelInfo>) -> ChurnKpis {
    let champion = response
        .model_info
        .as_ref()
        .map(|m| m.champion.clone())
        .unwrap_or_else(|| MISSING.to_string());
    let roc_auc_pct = response.model_info.as_ref().map_or(0.0, |m| m.roc_auc * 100.0);
    let accuracy_pct = model
        .and_then(|m| m.champion.as_ref())
        .map_or(0.0, |c| c.accuracy * 100.0);

    if let Some(summary) = &response.summary {
        return ChurnKpis {
            total_at_risk: summary.high_risk + summary.medium_risk,
            avg_probability_pct: summary.avg_churn_probability * 100.0,
            champion,
            accuracy_pct,
            roc_auc_pct,
        };
    }

    let predictions = &response.predictions;
    if predictions.is_empty() {
        return ChurnKpis {
            total_at_risk: 0.0,
            avg_probability_pct: 0.0,
            champion: MISSING.to_string(),
            accuracy_pct: 0.0,
            roc_auc_pct: 0.0,
        };
    }
    ChurnKpis {
        total_at_risk: predictions.iter().filter(|p| p.risk_level.is_at_risk()).count() as f64,
        avg_probability_pct: mean_or_zero(
            predictions.iter().map(|p| p.churn_probability).sum(),
            predictions.len(),
        ) * 100.0,
        champion,
        accuracy_pct,
        roc_auc_pct,
    }
}

/// High / Medium / Low counts, from the summary when present.
pub fn risk_distribution(response: &ChurnResponse) -> Vec<(RiskLevel, f64)> {
    if let Some(summary) = &response.summary {
        return vec![
            (RiskLevel::High, summary.high_risk),
            (RiskLevel::Medium, summary.medium_risk),
            (RiskLevel::Low, summary.low_risk),
        ];
    }
    RiskLevel::ALL
        .iter()
        .map(|level| {
            let count = response
                .predictions
                .iter()
                .filter(|p| p.risk_level == *level)
                .count();
            (*level, count as f64)
        })
        .collect()
}

pub fn risk_color(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::High => "#FF4444",
        RiskLevel::Medium => "#FFB800",
        RiskLevel::Low => "#00E676",
        RiskLevel::Unknown => "#8B8B9A",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameHealthKpis {
    pub riskiest: String,
    pub healthiest: String,
    /// `100 - mean churn probability * 100`
    pub avg_health: f64,
}

pub fn game_health_kpis(games: &[ChurnByGame]) -> GameHealthKpis {
    if games.is_empty() {
        return GameHealthKpis {
            riskiest: MISSING.to_string(),
            healthiest: MISSING.to_string(),
            avg_health: 0.0,
        };
    }
    let mut by_risk: Vec<&ChurnByGame> = games.iter().collect();
    by_risk.sort_by(|a, b| {
        b.avg_churn_probability
            .partial_cmp(&a.avg_churn_probability)
            .unwrap_or(Ordering::Equal)
    });
    let mean = mean_or_zero(games.iter().map(|g| g.avg_churn_probability).sum(), games.len());
    GameHealthKpis {
        riskiest: by_risk[0].project.clone(),
        healthiest: by_risk[by_risk.len() - 1].project.clone(),
        avg_health: 100.0 - mean * 100.0,
    }
}

/// `(game, users, churn %, high-risk users)` per game.
pub fn game_scatter(games: &[ChurnByGame]) -> Vec<(String, f64, f64, f64)> {
    games
        .iter()
        .map(|g| (g.project.clone(), g.total_users, g.avg_churn_probability * 100.0, g.high))
        .collect()
}

/// Wallets above [`HIGH_RISK_THRESHOLD`].
pub fn high_risk_users(users: &[ChurnPrediction]) -> Vec<&ChurnPrediction> {
    users
        .iter()
        .filter(|u| u.churn_probability > HIGH_RISK_THRESHOLD)
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct HighRiskKpis {
    pub count: usize,
    pub critical: usize,
    pub avg_risk_pct: f64,
    pub revenue_at_risk: f64,
}

pub fn high_risk_kpis(users: &[&ChurnPrediction]) -> HighRiskKpis {
    HighRiskKpis {
        count: users.len(),
        critical: users.iter().filter(|u| u.churn_probability > CRITICAL_THRESHOLD).count(),
        avg_risk_pct: mean_or_zero(users.iter().map(|u| u.churn_probability).sum(), users.len()) * 100.0,
        revenue_at_risk: users.len() as f64 * VALUE_PER_USER,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetentionAction {
    ImmediateIntervention,
    SendPromo,
    Monitor,
}

impl RetentionAction {
    pub fn for_probability(probability: f64) -> Self {
        if probability > 0.9 {
            RetentionAction::ImmediateIntervention
        } else if probability > 0.8 {
            RetentionAction::SendPromo
        } else {
            RetentionAction::Monitor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RetentionAction::ImmediateIntervention => "IMMEDIATE INTERVENTION",
            RetentionAction::SendPromo => "SEND PROMO",
            RetentionAction::Monitor => "MONITOR",
        }
    }
}

/// How much of the ecosystem the churn model actually scored.
#[derive(Debug, Clone, PartialEq)]
pub struct DataScope {
    pub ecosystem_users: f64,
    pub analyzed_users: f64,
    pub excluded_users: f64,
    pub coverage_pct: f64,
}

pub fn data_scope(distribution: Option<&[GamersByGamesPlayed]>, churn: Option<&ChurnResponse>) -> DataScope {
    let ecosystem_users: f64 = distribution
        .map(|rows| rows.iter().map(|r| r.gamers).sum())
        .unwrap_or(0.0);
    let analyzed_users = churn
        .and_then(|c| c.summary.as_ref())
        .map_or(0.0, |s| s.total_users);
    let denominator = if ecosystem_users > 0.0 { ecosystem_users } else { 1.0 };
    DataScope {
        ecosystem_users,
        analyzed_users,
        excluded_users: (ecosystem_users - analyzed_users).max(0.0),
        coverage_pct: analyzed_users / denominator * 100.0,
    }
}
