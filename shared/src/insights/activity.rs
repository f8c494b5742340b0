//! Transaction and player volume aggregates.

use std::collections::HashSet;

use crate::format::{date_key, format_short_day, MISSING};
use crate::insights::pivot::{group_count, group_sum, mean_or_zero, sorted_desc, top_by, PivotTable};
use crate::models::analytics::{DailyGamingActivity, GamersByGamesPlayed, GamingActivityTotal, UserDailyActivity};

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityTotals {
    pub total_transactions: f64,
    pub total_users: f64,
    pub most_active: String,
}

pub fn activity_totals(rows: &[GamingActivityTotal]) -> ActivityTotals {
    let mut most_active: Option<&GamingActivityTotal> = None;
    for row in rows {
        if most_active.map_or(true, |best| row.transactions > best.transactions) {
            most_active = Some(row);
        }
    }
    ActivityTotals {
        total_transactions: rows.iter().map(|r| r.transactions).sum(),
        total_users: rows.iter().map(|r| r.unique_users).sum(),
        most_active: most_active
            .map(|r| r.project.clone())
            .unwrap_or_else(|| MISSING.to_string()),
    }
}

/// A game placed by audience size (x) and volume (y), sized by engagement.
#[derive(Debug, Clone, PartialEq)]
pub struct BubblePoint {
    pub name: String,
    pub users: f64,
    pub transactions: f64,
    pub engagement: f64,
}

pub fn bubble_points(rows: &[GamingActivityTotal]) -> Vec<BubblePoint> {
    rows.iter()
        .map(|r| BubblePoint {
            name: r.project.clone(),
            users: r.unique_users,
            transactions: r.transactions,
            engagement: r.engagement(),
        })
        .collect()
}

/// Games with the most transactions, largest first.
pub fn top_by_transactions(rows: &[GamingActivityTotal], limit: usize) -> Vec<(String, f64)> {
    let mut ranked = sorted_desc(rows.iter().map(|r| (r.project.clone(), r.transactions)).collect());
    ranked.truncate(limit);
    ranked
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DailyMetric {
    #[default]
    Gamers,
    Transactions,
}

impl DailyMetric {
    pub fn of(&self, row: &DailyGamingActivity) -> f64 {
        match self {
            DailyMetric::Gamers => row.gamers,
            DailyMetric::Transactions => row.transactions,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DailyMetric::Gamers => "Gamers",
            DailyMetric::Transactions => "Transactions",
        }
    }
}

pub fn daily_pivot(rows: &[DailyGamingActivity], metric: DailyMetric) -> PivotTable {
    PivotTable::build(
        rows.iter()
            .map(|r| (date_key(&r.day), r.project.clone(), metric.of(r))),
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyKpis {
    /// Day with the most transactions, e.g. `Jan 05`
    pub peak_day: String,
    /// Game reporting activity on the most days
    pub consistent_game: String,
}

pub fn daily_kpis(rows: &[DailyGamingActivity]) -> DailyKpis {
    let by_day = group_sum(rows, |r| date_key(&r.day), |r| r.transactions);
    let peak = top_by(&by_day);
    DailyKpis {
        peak_day: if peak == MISSING { peak } else { format_short_day(&peak) },
        consistent_game: top_by(&group_count(rows, |r| r.project.clone())),
    }
}

/// Relative intensity band of a heatmap cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intensity {
    Peak,
    High,
    Elevated,
    Moderate,
    Low,
}

impl Intensity {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > 0.8 {
            Intensity::Peak
        } else if ratio > 0.6 {
            Intensity::High
        } else if ratio > 0.4 {
            Intensity::Elevated
        } else if ratio > 0.2 {
            Intensity::Moderate
        } else {
            Intensity::Low
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Intensity::Peak => "#14F195",
            Intensity::High => "#9945FF",
            Intensity::Elevated => "#FFB800",
            Intensity::Moderate => "#FF4444",
            Intensity::Low => "rgba(255, 255, 255, 0.1)",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatCell {
    pub day: String,
    pub value: f64,
    pub intensity: Intensity,
}

/// Per-day totals across games, oldest first.
pub fn daily_heatmap(rows: &[DailyGamingActivity], metric: DailyMetric) -> Vec<HeatCell> {
    let pivot = daily_pivot(rows, metric);
    let max = pivot.max_key_total();
    pivot
        .keys
        .iter()
        .enumerate()
        .map(|(i, day)| {
            let value = pivot.key_total(i);
            let ratio = if max > 0.0 { value / max } else { 0.0 };
            HeatCell {
                day: day.clone(),
                value,
                intensity: Intensity::from_ratio(ratio),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserActivityKpis {
    pub total_transactions: f64,
    pub active_users: f64,
    /// Transactions per user-day row of the activity log
    pub avg_daily_transactions: f64,
}

/// Totals prefer the ecosystem-wide endpoints so the numbers agree with the
/// global KPI strip; the local log is the fallback.
pub fn user_activity_kpis(
    rows: &[UserDailyActivity],
    activity: Option<&[GamingActivityTotal]>,
    distribution: Option<&[GamersByGamesPlayed]>,
) -> UserActivityKpis {
    let local_tx: f64 = rows.iter().map(|r| r.daily_transactions).sum();
    let total_transactions = match activity {
        Some(totals) => totals.iter().map(|t| t.transactions).sum(),
        None => local_tx,
    };
    let active_users = match distribution {
        Some(d) => d.iter().map(|g| g.gamers).sum(),
        None => rows.iter().map(|r| r.wallet.as_str()).collect::<HashSet<_>>().len() as f64,
    };
    UserActivityKpis {
        total_transactions,
        active_users,
        avg_daily_transactions: if rows.is_empty() { 0.0 } else { mean_or_zero(local_tx, rows.len()) },
    }
}

/// Case-insensitive match on wallet or game.
pub fn filter_user_activity<'a>(rows: &'a [UserDailyActivity], term: &str) -> Vec<&'a UserDailyActivity> {
    let needle = term.trim().to_lowercase();
    rows.iter()
        .filter(|r| {
            needle.is_empty()
                || r.wallet.to_lowercase().contains(&needle)
                || r.project.to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn total(project: &str, tx: f64, users: f64) -> GamingActivityTotal {
        GamingActivityTotal { project: project.into(), transactions: tx, unique_users: users }
    }

    fn daily(day: &str, project: &str, gamers: f64, tx: f64) -> DailyGamingActivity {
        DailyGamingActivity { day: day.into(), project: project.into(), gamers, transactions: tx }
    }

    #[test]
    fn test_activity_totals() {
        let rows = vec![total("A", 100.0, 10.0), total("B", 300.0, 20.0), total("C", 300.0, 5.0)];
        let kpis = activity_totals(&rows);
        assert_eq!(kpis.total_transactions, 700.0);
        assert_eq!(kpis.total_users, 35.0);
        assert_eq!(kpis.most_active, "B");
        assert_eq!(activity_totals(&[]).most_active, MISSING);
    }

    #[test]
    fn test_top_by_transactions_limits() {
        let rows: Vec<_> = (0..15).map(|i| total(&format!("g{}", i), i as f64, 1.0)).collect();
        let top = top_by_transactions(&rows, 10);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].0, "g14");
    }

    #[test]
    fn test_daily_kpis_and_heatmap() {
        let rows = vec![
            daily("2024-01-01T00:00:00Z", "A", 5.0, 50.0),
            daily("2024-01-02 00:00:00.000 UTC", "A", 10.0, 10.0),
            daily("2024-01-02 00:00:00.000 UTC", "B", 10.0, 20.0),
        ];
        let kpis = daily_kpis(&rows);
        assert_eq!(kpis.peak_day, "Jan 01");
        assert_eq!(kpis.consistent_game, "A");

        let cells = daily_heatmap(&rows, DailyMetric::Gamers);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[1].value, 20.0);
        assert_eq!(cells[1].intensity, Intensity::Peak);
        assert_eq!(cells[0].intensity, Intensity::Moderate);
    }

    #[test]
    fn test_user_activity_prefers_global_endpoints() {
        let log = vec![
            UserDailyActivity { day: "d".into(), wallet: "w1".into(), project: "A".into(), daily_transactions: 4.0 },
            UserDailyActivity { day: "d".into(), wallet: "w1".into(), project: "B".into(), daily_transactions: 2.0 },
        ];
        let local = user_activity_kpis(&log, None, None);
        assert_eq!(local.total_transactions, 6.0);
        assert_eq!(local.active_users, 1.0);
        assert_eq!(local.avg_daily_transactions, 3.0);

        let totals = vec![total("A", 1000.0, 50.0)];
        let dist = vec![GamersByGamesPlayed { games: 1, gamers: 70.0 }];
        let global = user_activity_kpis(&log, Some(&totals[..]), Some(&dist[..]));
        assert_eq!(global.total_transactions, 1000.0);
        assert_eq!(global.active_users, 70.0);
        assert_eq!(global.avg_daily_transactions, 3.0);
    }

    #[test]
    fn test_filter_user_activity() {
        let log = vec![
            UserDailyActivity { day: "d".into(), wallet: "AbcWallet".into(), project: "Aurory".into(), daily_transactions: 1.0 },
            UserDailyActivity { day: "d".into(), wallet: "xyz".into(), project: "Genopets".into(), daily_transactions: 1.0 },
        ];
        assert_eq!(filter_user_activity(&log, "abc").len(), 1);
        assert_eq!(filter_user_activity(&log, "GENO").len(), 1);
        assert_eq!(filter_user_activity(&log, "").len(), 2);
    }
}
