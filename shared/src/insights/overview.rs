//! Ecosystem-wide headline numbers, alerts and ticker events.

use crate::format::{format_fixed, format_number};
use crate::insights::pivot::mean_or_zero;
use crate::models::analytics::{
    GamersByGamesPlayed, GamingActivityTotal, HighRetentionSummary, HighRetentionUser, UNKNOWN,
};
use crate::models::ml::{ChurnResponse, ModelInfo};

/// Sources for the headline KPI strip. Each is `None` until its endpoint loads.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverviewSources<'a> {
    pub activity: Option<&'a [GamingActivityTotal]>,
    pub distribution: Option<&'a [GamersByGamesPlayed]>,
    pub churn: Option<&'a ChurnResponse>,
    pub elite: Option<&'a [HighRetentionUser]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlobalKpis {
    pub total_users: f64,
    pub total_transactions: f64,
    /// `100 - mean churn probability * 100`, rounded to one decimal
    pub ecosystem_health: f64,
    pub elite_gamers: usize,
}

pub fn global_kpis(sources: &OverviewSources<'_>) -> GlobalKpis {
    // The games-played distribution counts each wallet once; activity totals
    // count a wallet once per game.
    let total_users: f64 = match (sources.distribution, sources.activity) {
        (Some(dist), _) => dist.iter().map(|d| d.gamers).sum(),
        (None, Some(activity)) => activity.iter().map(|a| a.unique_users).sum(),
        (None, None) => 0.0,
    };
    let total_transactions: f64 = sources
        .activity
        .map(|a| a.iter().map(|r| r.transactions).sum())
        .unwrap_or(0.0);
    let ecosystem_health = match sources.churn {
        Some(churn) if !churn.predictions.is_empty() => {
            let avg = mean_or_zero(
                churn.predictions.iter().map(|p| p.churn_probability).sum(),
                churn.predictions.len(),
            );
            ((100.0 - avg * 100.0) * 10.0).round() / 10.0
        }
        _ => 0.0,
    };
    GlobalKpis {
        total_users,
        total_transactions,
        ecosystem_health,
        elite_gamers: sources.elite.map_or(0, |e| e.len()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Critical,
    Healthy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
    pub action: String,
}

pub const CRITICAL_SHARE_PCT: f64 = 5.0;
pub const HEALTHY_SHARE_PCT: f64 = 3.0;

/// At most one alert, driven by the share of high-risk wallets.
pub fn churn_alerts(churn: Option<&ChurnResponse>) -> Vec<Alert> {
    let Some(summary) = churn.and_then(|c| c.summary.as_ref()) else {
        return Vec::new();
    };
    let total = if summary.total_users > 0.0 { summary.total_users } else { 1.0 };
    let share = summary.high_risk / total * 100.0;

    if share > CRITICAL_SHARE_PCT {
        vec![Alert {
            kind: AlertKind::Critical,
            title: "HIGH CHURN RISK DETECTED".to_string(),
            message: format!(
                "{} users ({}%) are at HIGH risk of churning within 14 days.",
                format_number(summary.high_risk),
                format_fixed(share, 1)
            ),
            action: "Launch immediate retention campaign targeting these users.".to_string(),
        }]
    } else if share < HEALTHY_SHARE_PCT {
        vec![Alert {
            kind: AlertKind::Healthy,
            title: "ECOSYSTEM HEALTHY".to_string(),
            message: format!(
                "Only {}% of users at high churn risk - ecosystem performing well.",
                format_fixed(share, 1)
            ),
            action: "Maintain current engagement strategies.".to_string(),
        }]
    } else {
        Vec::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerKind {
    Model,
    Risk,
    Retention,
    Pulse,
    Network,
    Feed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickerEvent {
    pub kind: TickerKind,
    pub text: String,
}

impl TickerEvent {
    fn new(kind: TickerKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into() }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TickerSources<'a> {
    pub model: Option<&'a ModelInfo>,
    pub churn: Option<&'a ChurnResponse>,
    pub retention: Option<&'a [HighRetentionSummary]>,
    pub distribution: Option<&'a [GamersByGamesPlayed]>,
}

pub fn ticker_events(sources: &TickerSources<'_>) -> Vec<TickerEvent> {
    let mut events = Vec::new();

    if let Some(champion) = sources.model.and_then(|m| m.champion.as_ref()) {
        if champion.accuracy != 0.0 {
            let name = if champion.name.is_empty() { "Ensemble" } else { champion.name.as_str() };
            events.push(TickerEvent::new(
                TickerKind::Model,
                format!("ML Model Updated: Accuracy {}% ({})", format_fixed(champion.accuracy * 100.0, 1), name),
            ));
        }
    }

    if let Some(summary) = sources.churn.and_then(|c| c.summary.as_ref()) {
        if summary.high_risk != 0.0 {
            events.push(TickerEvent::new(
                TickerKind::Risk,
                format!("Risk Monitor: {} users flagged for churn risk", format_number(summary.high_risk)),
            ));
        }
    }

    if let Some(leader) = sources.retention.and_then(|r| r.first()) {
        let name = if leader.game.is_empty() { UNKNOWN } else { leader.game.as_str() };
        events.push(TickerEvent::new(
            TickerKind::Retention,
            format!(
                "Retention Leader: {} ({}% Avg Retention)",
                name,
                format_fixed(leader.avg_retention_rate_pct, 1)
            ),
        ));
    }

    if let Some(dist) = sources.distribution {
        let total: f64 = dist.iter().map(|d| d.gamers).sum();
        if total > 0.0 {
            events.push(TickerEvent::new(
                TickerKind::Pulse,
                format!("Ecosystem Pulse: {} Active Gamers Tracked", format_number(total)),
            ));
        }
    }

    if events.len() < 3 {
        events.push(TickerEvent::new(TickerKind::Network, "Solana Network: Optimal Performance"));
        events.push(TickerEvent::new(TickerKind::Feed, "Live Data Feed: Active"));
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ml::{ChampionModel, ChurnPrediction, ChurnSummary};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn churn_with(high: f64, total: f64) -> ChurnResponse {
        ChurnResponse {
            summary: Some(ChurnSummary { total_users: total, high_risk: high, ..Default::default() }),
            ..Default::default()
        }
    }

    #[test]
    fn test_global_kpis_prefer_distribution() {
        let activity = vec![
            GamingActivityTotal { project: "A".into(), transactions: 1000.0, unique_users: 80.0 },
            GamingActivityTotal { project: "B".into(), transactions: 500.0, unique_users: 40.0 },
        ];
        let dist = vec![GamersByGamesPlayed { games: 1, gamers: 100.0 }];
        let churn = ChurnResponse {
            predictions: vec![
                ChurnPrediction { churn_probability: 0.2, ..Default::default() },
                ChurnPrediction { churn_probability: 0.3, ..Default::default() },
            ],
            ..Default::default()
        };
        let elite = vec![HighRetentionUser::default(), HighRetentionUser::default()];

        let kpis = global_kpis(&OverviewSources {
            activity: Some(&activity[..]),
            distribution: Some(&dist[..]),
            churn: Some(&churn),
            elite: Some(&elite[..]),
        });
        assert_eq!(kpis.total_users, 100.0);
        assert_eq!(kpis.total_transactions, 1500.0);
        assert_eq!(kpis.ecosystem_health, 75.0);
        assert_eq!(kpis.elite_gamers, 2);

        let fallback = global_kpis(&OverviewSources { activity: Some(&activity[..]), ..Default::default() });
        assert_eq!(fallback.total_users, 120.0);
        assert_eq!(fallback.ecosystem_health, 0.0);
    }

    #[rstest]
    #[case(churn_with(60.0, 1000.0), Some(AlertKind::Critical))]
    #[case(churn_with(40.0, 1000.0), None)]
    #[case(churn_with(20.0, 1000.0), Some(AlertKind::Healthy))]
    #[case(ChurnResponse::default(), None)]
    fn test_churn_alerts(#[case] churn: ChurnResponse, #[case] expected: Option<AlertKind>) {
        let alerts = churn_alerts(Some(&churn));
        assert_eq!(alerts.first().map(|a| a.kind), expected);
    }

    #[test]
    fn test_alert_messages() {
        let critical = churn_alerts(Some(&churn_with(1200.0, 10000.0)));
        assert_eq!(critical[0].message, "1,200 users (12.0%) are at HIGH risk of churning within 14 days.");
        let healthy = churn_alerts(Some(&churn_with(25.0, 1000.0)));
        assert_eq!(healthy[0].message, "Only 2.5% of users at high churn risk - ecosystem performing well.");
        assert!(churn_alerts(None).is_empty());
    }

    #[test]
    fn test_ticker_with_all_sources() {
        let model = ModelInfo {
            champion: Some(ChampionModel { name: "".into(), accuracy: 0.912, ..Default::default() }),
            ..Default::default()
        };
        let churn = churn_with(340.0, 5000.0);
        let retention = vec![HighRetentionSummary { game: "Aurory".into(), avg_retention_rate_pct: 81.3, ..Default::default() }];
        let dist = vec![GamersByGamesPlayed { games: 1, gamers: 12000.0 }];

        let events = ticker_events(&TickerSources {
            model: Some(&model),
            churn: Some(&churn),
            retention: Some(&retention[..]),
            distribution: Some(&dist[..]),
        });
        let texts: Vec<&str> = events.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "ML Model Updated: Accuracy 91.2% (Ensemble)",
                "Risk Monitor: 340 users flagged for churn risk",
                "Retention Leader: Aurory (81.3% Avg Retention)",
                "Ecosystem Pulse: 12,000 Active Gamers Tracked",
            ]
        );
    }

    #[test]
    fn test_ticker_falls_back_to_system_events() {
        let events = ticker_events(&TickerSources::default());
        let kinds: Vec<TickerKind> = events.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![TickerKind::Network, TickerKind::Feed]);
    }
}
