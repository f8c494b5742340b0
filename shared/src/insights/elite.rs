//! Elite (high-retention) gamers joined with their churn outlook.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::insights::pivot::{group_count, group_sum, sorted_desc};
use crate::models::analytics::{HighRetentionUser, UNKNOWN};
use crate::models::ml::{ChurnPrediction, RiskLevel};
use crate::table::{CellValue, TableRow};

pub const UNKNOWN_GAME: &str = "Unknown Game";
pub const ELITE_PAGE_SIZE: usize = 50;
pub const SCROLLER_SIZE: usize = 20;

/// Interleaves groups one item per group per round.
///
/// Groups are taken in first-appearance order of their key; exhausted groups
/// drop out and the rounds continue until the largest group is drained.
pub fn round_robin<T, K, F>(items: Vec<T>, key: F) -> Vec<T>
where
    K: Eq + std::hash::Hash,
    F: Fn(&T) -> K,
{
    let mut groups: Vec<std::collections::VecDeque<T>> = Vec::new();
    let mut index: HashMap<K, usize> = HashMap::new();
    let total = items.len();
    for item in items {
        let k = key(&item);
        let slot = *index.entry(k).or_insert_with(|| {
            groups.push(Default::default());
            groups.len() - 1
        });
        groups[slot].push_back(item);
    }

    let mut out = Vec::with_capacity(total);
    while out.len() < total {
        for group in groups.iter_mut() {
            if let Some(item) = group.pop_front() {
                out.push(item);
            }
        }
    }
    out
}

/// Churn percent estimated from retention when the model has no prediction.
pub fn heuristic_risk(retention_rate_pct: f64) -> f64 {
    (10.0 - retention_rate_pct / 10.0).max(0.5)
}

#[derive(Debug, Clone, PartialEq)]
pub struct EliteGamer {
    pub wallet: String,
    pub game: String,
    pub weeks_active: f64,
    pub retention_rate: f64,
    /// Churn risk in percent
    pub churn_risk: f64,
    pub risk_level: RiskLevel,
}

impl EliteGamer {
    /// CSS class for the risk badge.
    pub fn risk_tone(&self) -> &'static str {
        if self.churn_risk < 20.0 {
            "risk-low"
        } else if self.churn_risk < 50.0 {
            "risk-medium"
        } else {
            "risk-high"
        }
    }
}

impl TableRow for EliteGamer {
    fn fields(&self) -> Vec<(&'static str, CellValue)> {
        vec![
            ("wallet", self.wallet.as_str().into()),
            ("game", self.game.as_str().into()),
            ("weeks_active", self.weeks_active.into()),
            ("retention_rate", self.retention_rate.into()),
            ("churn_risk", self.churn_risk.into()),
            ("risk_level", self.risk_level.as_str().into()),
        ]
    }
}

fn predictions_by_wallet(predictions: &[ChurnPrediction]) -> HashMap<&str, &ChurnPrediction> {
    let mut map = HashMap::new();
    for p in predictions {
        map.entry(p.user_wallet.as_str()).or_insert(p);
    }
    map
}

/// Every elite user with their churn outlook, interleaved by game.
pub fn elite_gamers(users: &[HighRetentionUser], predictions: &[ChurnPrediction]) -> Vec<EliteGamer> {
    let by_wallet = predictions_by_wallet(predictions);
    let gamers = users
        .iter()
        .map(|user| {
            let (churn_risk, risk_level) = match by_wallet.get(user.user.as_str()) {
                Some(p) => (p.churn_probability * 100.0, p.risk_level),
                None => (heuristic_risk(user.retention_rate_pct), RiskLevel::Low),
            };
            EliteGamer {
                wallet: if user.user.is_empty() { UNKNOWN.to_string() } else { user.user.clone() },
                game: if user.game.is_empty() || user.game == UNKNOWN {
                    UNKNOWN_GAME.to_string()
                } else {
                    user.game.clone()
                },
                weeks_active: user.weeks_active,
                retention_rate: user.retention_rate_pct,
                churn_risk,
                risk_level,
            }
        })
        .collect();
    round_robin(gamers, |g: &EliteGamer| g.game.clone())
}

#[derive(Debug, Clone, PartialEq)]
pub struct EliteAnalytics {
    /// Elite users per game, largest first
    pub by_game: Vec<(String, f64)>,
    /// Rounded mean retention per game, highest first
    pub retention_by_game: Vec<(String, f64)>,
    pub risk_distribution: Vec<(RiskLevel, f64)>,
}

pub fn elite_analytics(users: &[HighRetentionUser], predictions: &[ChurnPrediction]) -> EliteAnalytics {
    let by_wallet = predictions_by_wallet(predictions);
    let game_of = |u: &HighRetentionUser| {
        if u.game.is_empty() {
            UNKNOWN.to_string()
        } else {
            u.game.clone()
        }
    };

    let counts = group_count(users, game_of);
    let totals = group_sum(users, game_of, |u| u.retention_rate_pct);
    let retention_by_game = totals
        .into_iter()
        .zip(counts.iter())
        .map(|((game, total), (_, count))| (game, (total / count).round()))
        .collect();

    let mut risk = [0.0; 3];
    for user in users {
        let level = match by_wallet.get(user.user.as_str()) {
            Some(p) => p.risk_level,
            None => {
                let estimate = heuristic_risk(user.retention_rate_pct);
                if estimate >= 50.0 {
                    RiskLevel::High
                } else if estimate >= 20.0 {
                    RiskLevel::Medium
                } else {
                    RiskLevel::Low
                }
            }
        };
        if let Some(slot) = RiskLevel::ALL.iter().position(|l| *l == level) {
            risk[slot] += 1.0;
        }
    }

    EliteAnalytics {
        by_game: sorted_desc(counts),
        retention_by_game: sorted_desc(retention_by_game),
        risk_distribution: RiskLevel::ALL.iter().copied().zip(risk).collect(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollerEntry {
    pub wallet: String,
    pub retention_rate: f64,
    pub risk_level: RiskLevel,
    pub churn_probability: f64,
}

/// Top elite users by retention for the marquee.
pub fn scroller_entries(users: &[HighRetentionUser], predictions: &[ChurnPrediction]) -> Vec<ScrollerEntry> {
    let by_wallet = predictions_by_wallet(predictions);
    let mut ranked: Vec<&HighRetentionUser> = users.iter().collect();
    ranked.sort_by(|a, b| {
        b.retention_rate_pct
            .partial_cmp(&a.retention_rate_pct)
            .unwrap_or(Ordering::Equal)
    });
    ranked
        .into_iter()
        .take(SCROLLER_SIZE)
        .map(|u| {
            let prediction = by_wallet.get(u.user.as_str());
            ScrollerEntry {
                wallet: u.user.clone(),
                retention_rate: u.retention_rate_pct,
                risk_level: prediction.map_or(RiskLevel::Unknown, |p| p.risk_level),
                churn_probability: prediction.map_or(0.0, |p| p.churn_probability),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn user(wallet: &str, game: &str, rate: f64) -> HighRetentionUser {
        HighRetentionUser {
            user: wallet.into(),
            game: game.into(),
            retention_rate_pct: rate,
            weeks_active: 6.0,
            ..Default::default()
        }
    }

    fn prediction(wallet: &str, probability: f64, level: RiskLevel) -> ChurnPrediction {
        ChurnPrediction {
            user_wallet: wallet.into(),
            churn_probability: probability,
            risk_level: level,
            ..Default::default()
        }
    }

    #[test]
    fn test_round_robin_order() {
        let items = vec![("A", 1), ("A", 2), ("A", 3), ("B", 1), ("C", 1), ("C", 2)];
        let out = round_robin(items, |(k, _)| *k);
        assert_eq!(out, vec![("A", 1), ("B", 1), ("C", 1), ("A", 2), ("C", 2), ("A", 3)]);
    }

    #[test]
    fn test_elite_gamers_join() {
        let users = vec![user("w1", "Aurory", 90.0), user("w2", "", 100.0), user("w3", "Aurory", 80.0)];
        let predictions = vec![prediction("w1", 0.35, RiskLevel::Medium)];
        let gamers = elite_gamers(&users, &predictions);

        assert_eq!(gamers.len(), 3);
        assert_eq!(gamers[0].wallet, "w1");
        assert!((gamers[0].churn_risk - 35.0).abs() < 1e-9);
        assert_eq!(gamers[0].risk_level, RiskLevel::Medium);
        assert_eq!(gamers[0].risk_tone(), "risk-medium");

        assert_eq!(gamers[1].game, UNKNOWN_GAME);
        assert_eq!(gamers[1].churn_risk, 0.5);
        assert_eq!(gamers[1].risk_level, RiskLevel::Low);
        assert_eq!(gamers[2].churn_risk, 2.0);
    }

    #[test]
    fn test_elite_analytics() {
        let users = vec![user("w1", "A", 90.0), user("w2", "B", 70.0), user("w3", "B", 81.0)];
        let predictions = vec![prediction("w1", 0.9, RiskLevel::High)];
        let stats = elite_analytics(&users, &predictions);
        assert_eq!(stats.by_game[0], ("B".to_string(), 2.0));
        assert_eq!(stats.retention_by_game[0], ("A".to_string(), 90.0));
        assert_eq!(stats.retention_by_game[1], ("B".to_string(), 76.0));
        assert_eq!(
            stats.risk_distribution,
            vec![(RiskLevel::High, 1.0), (RiskLevel::Medium, 0.0), (RiskLevel::Low, 2.0)]
        );
    }

    #[test]
    fn test_scroller_entries() {
        let users: Vec<_> = (0..25).map(|i| user(&format!("w{}", i), "A", i as f64)).collect();
        let predictions = vec![prediction("w24", 0.1, RiskLevel::Low)];
        let entries = scroller_entries(&users, &predictions);
        assert_eq!(entries.len(), SCROLLER_SIZE);
        assert_eq!(entries[0].wallet, "w24");
        assert_eq!(entries[0].risk_level, RiskLevel::Low);
        assert_eq!(entries[1].risk_level, RiskLevel::Unknown);
        assert_eq!(entries[1].churn_probability, 0.0);
    }

    proptest! {
        #[test]
        fn prop_round_robin_keeps_every_item(keys in prop::collection::vec(0u8..5, 0..60)) {
            let items: Vec<(u8, usize)> = keys.iter().copied().zip(0..).collect();
            let out = round_robin(items.clone(), |(k, _)| *k);
            prop_assert_eq!(out.len(), items.len());

            // Within a group, relative order is preserved.
            for key in 0u8..5 {
                let before: Vec<_> = items.iter().filter(|(k, _)| *k == key).collect();
                let after: Vec<_> = out.iter().filter(|(k, _)| *k == key).collect();
                prop_assert_eq!(before, after);
            }

            // A new round starts whenever the group order wraps around, and
            // there are as many rounds as items in the largest group.
            let first_seen = |k: u8| keys.iter().position(|x| *x == k).unwrap_or(0);
            let mut rounds = 0;
            let mut previous: Option<usize> = None;
            for (k, _) in &out {
                let position = first_seen(*k);
                if previous.map_or(true, |p| position <= p) {
                    rounds += 1;
                }
                previous = Some(position);
            }
            let largest = (0u8..5)
                .map(|key| keys.iter().filter(|k| **k == key).count())
                .max()
                .unwrap_or(0);
            prop_assert_eq!(rounds, largest);
        }
    }
}
