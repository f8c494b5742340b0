//! Activation, reactivation and deactivation trends.

use std::collections::HashSet;

use crate::format::{date_key, format_week_range, MISSING};
use crate::insights::pivot::{group_sum, top_by, PivotTable};
use crate::models::analytics::{GamerActivation, GamerDeactivation, GamerReactivation};

fn distinct_days<'a>(days: impl Iterator<Item = &'a str>) -> usize {
    days.map(date_key)
        .filter(|d| !d.is_empty())
        .collect::<HashSet<_>>()
        .len()
}

/// New gamers per day, one series per game.
pub fn activation_pivot(rows: &[GamerActivation]) -> PivotTable {
    PivotTable::build(
        rows.iter()
            .map(|r| (date_key(&r.day), r.project.clone(), r.new_gamers)),
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivationKpis {
    pub total: f64,
    /// Rounded mean of new gamers per reported day
    pub avg_per_day: f64,
    pub top_game: String,
}

pub fn activation_kpis(rows: &[GamerActivation]) -> ActivationKpis {
    let total: f64 = rows.iter().map(|r| r.new_gamers).sum();
    let days = distinct_days(rows.iter().map(|r| r.day.as_str())).max(1);
    ActivationKpis {
        total,
        avg_per_day: (total / days as f64).round(),
        top_game: top_by(&group_sum(rows, |r| r.project.clone(), |r| r.new_gamers)),
    }
}

pub fn reactivation_pivot(rows: &[GamerReactivation]) -> PivotTable {
    PivotTable::build(
        rows.iter()
            .map(|r| (date_key(&r.week), r.project.clone(), r.users)),
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReactivationKpis {
    pub total: f64,
    pub avg_per_week: f64,
    /// Week range with the most returning gamers, e.g. `Jan 01 - Jan 07`
    pub best_week: String,
}

pub fn reactivation_kpis(rows: &[GamerReactivation]) -> ReactivationKpis {
    let total: f64 = rows.iter().map(|r| r.users).sum();
    let weeks = distinct_days(rows.iter().map(|r| r.week.as_str())).max(1);
    let best = top_by(&group_sum(rows, |r| date_key(&r.week), |r| r.users));
    ReactivationKpis {
        total,
        avg_per_week: (total / weeks as f64).round(),
        best_week: if best == MISSING || best.is_empty() {
            MISSING.to_string()
        } else {
            format_week_range(&best)
        },
    }
}

pub fn deactivation_pivot(rows: &[GamerDeactivation]) -> PivotTable {
    PivotTable::build(
        rows.iter()
            .map(|r| (date_key(&r.week), r.project.clone(), r.deactivated_users)),
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeactivationKpis {
    pub total: f64,
    pub highest_game: String,
}

pub fn deactivation_kpis(rows: &[GamerDeactivation]) -> DeactivationKpis {
    DeactivationKpis {
        total: rows.iter().map(|r| r.deactivated_users).sum(),
        highest_game: top_by(&group_sum(rows, |r| r.project.clone(), |r| r.deactivated_users)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn activation(day: &str, project: &str, n: f64) -> GamerActivation {
        GamerActivation { day: day.into(), project: project.into(), new_gamers: n }
    }

    #[test]
    fn test_activation_kpis() {
        let rows = vec![
            activation("2024-01-01 00:00:00.000 UTC", "Aurory", 10.0),
            activation("2024-01-01 00:00:00.000 UTC", "Genopets", 25.0),
            activation("2024-01-02 00:00:00.000 UTC", "Aurory", 6.0),
        ];
        let kpis = activation_kpis(&rows);
        assert_eq!(kpis.total, 41.0);
        assert_eq!(kpis.avg_per_day, 21.0);
        assert_eq!(kpis.top_game, "Genopets");

        let pivot = activation_pivot(&rows);
        assert_eq!(pivot.keys, vec!["2024-01-01", "2024-01-02"]);
        assert_eq!(pivot.series.len(), 2);
    }

    #[test]
    fn test_empty_activation() {
        let kpis = activation_kpis(&[]);
        assert_eq!(kpis.total, 0.0);
        assert_eq!(kpis.avg_per_day, 0.0);
        assert_eq!(kpis.top_game, MISSING);
        assert!(activation_pivot(&[]).is_empty());
    }

    #[test]
    fn test_reactivation_best_week() {
        let rows = vec![
            GamerReactivation { week: "2024-01-01".into(), project: "A".into(), users: 5.0 },
            GamerReactivation { week: "2024-01-08".into(), project: "A".into(), users: 7.0 },
            GamerReactivation { week: "2024-01-08".into(), project: "B".into(), users: 1.0 },
        ];
        let kpis = reactivation_kpis(&rows);
        assert_eq!(kpis.total, 13.0);
        assert_eq!(kpis.avg_per_week, 7.0);
        assert_eq!(kpis.best_week, "Jan 08 - Jan 14");
    }

    #[test]
    fn test_deactivation_highest_game() {
        let rows = vec![
            GamerDeactivation { week: "2024-01-01".into(), project: "A".into(), deactivated_users: 3.0 },
            GamerDeactivation { week: "2024-01-01".into(), project: "B".into(), deactivated_users: 9.0 },
        ];
        let kpis = deactivation_kpis(&rows);
        assert_eq!(kpis.total, 12.0);
        assert_eq!(kpis.highest_game, "B");
        assert_eq!(deactivation_pivot(&rows).keys.len(), 1);
    }
}
