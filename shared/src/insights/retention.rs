//! Cohort retention and high-retention wallets.

use std::cmp::Ordering;

use crate::format::MISSING;
use crate::insights::pivot::{chronological, group_count, group_sum, mean_or_zero, top_by, PivotTable, Series};
use crate::models::analytics::{GamerRetention, HighRetentionSummary, HighRetentionUser, RETENTION_WEEKS};

/// Cohort rows ordered by game, then by cohort date.
pub fn sorted_cohorts(rows: &[GamerRetention]) -> Vec<&GamerRetention> {
    let mut sorted: Vec<&GamerRetention> = rows.iter().collect();
    sorted.sort_by(|a, b| {
        a.game
            .cmp(&b.game)
            .then_with(|| chronological(&a.cohort_week, &b.cohort_week))
    });
    sorted
}

/// Distinct games, alphabetical, for the game filter.
pub fn cohort_games(rows: &[GamerRetention]) -> Vec<String> {
    let mut games: Vec<String> = rows.iter().map(|r| r.game.clone()).collect();
    games.sort();
    games.dedup();
    games
}

/// `None` keeps every row.
pub fn filter_by_game<'a>(rows: &'a [GamerRetention], game: Option<&str>) -> Vec<&'a GamerRetention> {
    rows.iter()
        .filter(|r| game.map_or(true, |g| r.game == g))
        .collect()
}

/// Rounded mean of each week column, ignoring cohorts with no data for it.
pub fn weekly_average_curve(rows: &[&GamerRetention]) -> [f64; RETENTION_WEEKS] {
    let mut curve = [0.0; RETENTION_WEEKS];
    for (week, slot) in curve.iter_mut().enumerate() {
        let present: Vec<f64> = rows
            .iter()
            .map(|r| r.weeks[week])
            .filter(|v| *v != 0.0)
            .collect();
        if !present.is_empty() {
            *slot = mean_or_zero(present.iter().sum(), present.len()).round();
        }
    }
    curve
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetentionKpis {
    /// `"<game> <cohort>"` of the cohort with the highest mean retention
    pub best_cohort: String,
    pub avg_week1: f64,
    pub champion_game: String,
}

pub fn retention_kpis(rows: &[&GamerRetention]) -> RetentionKpis {
    let mut best: Option<&GamerRetention> = None;
    for row in rows {
        if best.map_or(true, |b| row.mean_retention() > b.mean_retention()) {
            best = Some(row);
        }
    }

    let week1: Vec<f64> = rows.iter().map(|r| r.weeks[0]).filter(|v| *v != 0.0).collect();
    let game_means = group_sum(rows, |r| r.game.clone(), |r| r.mean_retention());
    let game_counts = group_count(rows, |r| r.game.clone());
    let averaged: Vec<(String, f64)> = game_means
        .into_iter()
        .zip(game_counts)
        .map(|((game, total), (_, count))| (game, mean_or_zero(total, count as usize)))
        .collect();

    RetentionKpis {
        best_cohort: best
            .map(|r| format!("{} {}", r.game, r.cohort_week))
            .unwrap_or_else(|| MISSING.to_string()),
        avg_week1: mean_or_zero(week1.iter().sum(), week1.len()).round(),
        champion_game: top_by(&averaged),
    }
}

/// Cell opacity for the cohort heatmap; 0 stays transparent.
pub fn heat_opacity(value: f64) -> f64 {
    if value <= 0.0 {
        0.0
    } else {
        (value / 50.0).max(0.1).min(1.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HighRetentionKpis {
    pub count: usize,
    pub avg_rate: f64,
    pub most_loyal_game: String,
}

pub fn high_retention_kpis(users: &[HighRetentionUser]) -> HighRetentionKpis {
    HighRetentionKpis {
        count: users.len(),
        avg_rate: mean_or_zero(users.iter().map(|u| u.retention_rate_pct).sum(), users.len()).round(),
        most_loyal_game: top_by(&group_count(users, |u| u.game.clone())),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Gold,
    Silver,
    Bronze,
    Plain,
}

impl Badge {
    pub fn for_rate(rate: f64) -> Self {
        if rate >= 100.0 {
            Badge::Gold
        } else if rate >= 90.0 {
            Badge::Silver
        } else if rate >= 70.0 {
            Badge::Bronze
        } else {
            Badge::Plain
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Badge::Gold => "badge badge-gold",
            Badge::Silver => "badge badge-silver",
            Badge::Bronze => "badge badge-bronze",
            Badge::Plain => "badge",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryKpis {
    pub top_game: String,
    pub avg_retention: f64,
    pub power_users: f64,
}

pub fn summary_kpis(rows: &[HighRetentionSummary]) -> SummaryKpis {
    SummaryKpis {
        top_game: top_by(
            &rows
                .iter()
                .map(|r| (r.game.clone(), r.avg_retention_rate_pct))
                .collect::<Vec<_>>(),
        ),
        avg_retention: mean_or_zero(rows.iter().map(|r| r.avg_retention_rate_pct).sum(), rows.len()).round(),
        power_users: rows.iter().map(|r| r.power_users()).sum(),
    }
}

/// Games as keys, one series per retention tier.
pub fn summary_tiers(rows: &[HighRetentionSummary]) -> PivotTable {
    let tier = |name: &str, f: fn(&HighRetentionSummary) -> f64| Series {
        name: name.to_string(),
        values: rows.iter().map(f).collect(),
    };
    PivotTable {
        keys: rows.iter().map(|r| r.game.clone()).collect(),
        series: vec![
            tier("High", |r| r.high_retention_users),
            tier("Very High", |r| r.very_high_retention_users),
            tier("Excellent", |r| r.excellent_retention_users),
        ],
    }
}

/// One game on the retention radar, each axis scaled to roughly 0..100.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarProfile {
    pub game: String,
    pub retention: f64,
    pub activity: f64,
    pub users: f64,
}

pub fn summary_radar(rows: &[HighRetentionSummary]) -> Vec<RadarProfile> {
    rows.iter()
        .map(|r| RadarProfile {
            game: r.game.clone(),
            retention: r.avg_retention_rate_pct,
            activity: r.avg_weeks_active * 10.0,
            users: r.power_users() / 10.0,
        })
        .collect()
}

/// Descending by rate; ties keep input order.
pub fn rank_by_rate(users: &[HighRetentionUser]) -> Vec<&HighRetentionUser> {
    let mut ranked: Vec<&HighRetentionUser> = users.iter().collect();
    ranked.sort_by(|a, b| {
        b.retention_rate_pct
            .partial_cmp(&a.retention_rate_pct)
            .unwrap_or(Ordering::Equal)
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn cohort(game: &str, week: &str, weeks: [f64; RETENTION_WEEKS]) -> GamerRetention {
        GamerRetention { cohort_week: week.into(), game: game.into(), new_users: 100.0, weeks }
    }

    fn sample() -> Vec<GamerRetention> {
        vec![
            cohort("Zed", "2024-01-01", [40.0, 20.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            cohort("Aurory", "2024-01-08", [30.0, 10.0, 5.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            cohort("Aurory", "2024-01-01", [20.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        ]
    }

    #[test]
    fn test_sorted_by_game_then_cohort() {
        let rows = sample();
        let sorted = sorted_cohorts(&rows);
        let order: Vec<(&str, &str)> = sorted.iter().map(|r| (r.game.as_str(), r.cohort_week.as_str())).collect();
        assert_eq!(order, vec![("Aurory", "2024-01-01"), ("Aurory", "2024-01-08"), ("Zed", "2024-01-01")]);
        assert_eq!(cohort_games(&rows), vec!["Aurory", "Zed"]);
    }

    #[test]
    fn test_weekly_curve_skips_zero_cells() {
        let rows = sample();
        let all = filter_by_game(&rows, None);
        let curve = weekly_average_curve(&all);
        assert_eq!(curve[0], 30.0);
        assert_eq!(curve[1], 15.0);
        assert_eq!(curve[2], 5.0);
        assert_eq!(curve[3], 0.0);
    }

    #[test]
    fn test_retention_kpis() {
        let rows = sample();
        let all = filter_by_game(&rows, None);
        let kpis = retention_kpis(&all);
        assert_eq!(kpis.best_cohort, "Zed 2024-01-01");
        assert_eq!(kpis.avg_week1, 30.0);
        assert_eq!(kpis.champion_game, "Zed");

        let aurory = filter_by_game(&rows, Some("Aurory"));
        assert_eq!(aurory.len(), 2);
        assert_eq!(retention_kpis(&[]).best_cohort, MISSING);
    }

    #[test_case(0.0 => 0.0)]
    #[test_case(2.0 => 0.1)]
    #[test_case(25.0 => 0.5)]
    #[test_case(80.0 => 1.0)]
    fn test_heat_opacity(value: f64) -> f64 {
        heat_opacity(value)
    }

    #[test_case(100.0 => Badge::Gold)]
    #[test_case(95.0 => Badge::Silver)]
    #[test_case(70.0 => Badge::Bronze)]
    #[test_case(50.0 => Badge::Plain)]
    fn test_badge(rate: f64) -> Badge {
        Badge::for_rate(rate)
    }

    #[test]
    fn test_high_retention_kpis() {
        let user = |game: &str, rate: f64| HighRetentionUser {
            user: "w".into(),
            game: game.into(),
            retention_rate_pct: rate,
            ..Default::default()
        };
        let users = vec![user("A", 80.0), user("B", 91.0), user("B", 100.0)];
        let kpis = high_retention_kpis(&users);
        assert_eq!(kpis.count, 3);
        assert_eq!(kpis.avg_rate, 90.0);
        assert_eq!(kpis.most_loyal_game, "B");
        assert_eq!(rank_by_rate(&users)[0].retention_rate_pct, 100.0);
    }

    #[test]
    fn test_summary_aggregates() {
        let rows = vec![
            HighRetentionSummary {
                game: "A".into(),
                high_retention_users: 10.0,
                very_high_retention_users: 5.0,
                excellent_retention_users: 5.0,
                avg_retention_rate_pct: 60.0,
                avg_weeks_active: 4.0,
            },
            HighRetentionSummary {
                game: "B".into(),
                high_retention_users: 1.0,
                avg_retention_rate_pct: 75.0,
                ..Default::default()
            },
        ];
        let kpis = summary_kpis(&rows);
        assert_eq!(kpis.top_game, "B");
        assert_eq!(kpis.avg_retention, 68.0);
        assert_eq!(kpis.power_users, 21.0);

        let tiers = summary_tiers(&rows);
        assert_eq!(tiers.keys, vec!["A", "B"]);
        assert_eq!(tiers.series[0].values, vec![10.0, 1.0]);

        let radar = summary_radar(&rows);
        assert_eq!(radar[0].activity, 40.0);
        assert_eq!(radar[0].users, 2.0);
    }
}
