//! Rows served by the `/api/analytics/*` endpoints.
//!
//! Each impl of [`FromRow`] carries the full key fallback chain for its
//! columns: the snake_case key first, then the spaced variants.

use crate::normalize::{FieldReader, FromRow};
use crate::table::{CellValue, TableRow};

pub const UNKNOWN: &str = "Unknown";

const PROJECT_KEYS: &[&str] = &["project", "game project", "game"];
const DAY_KEYS: &[&str] = &["day", "date"];
const WEEK_KEYS: &[&str] = &["week", "date"];
const WALLET_KEYS: &[&str] = &["user_wallet", "user wallet", "wallet"];

/// Number of weekly retention columns reported per cohort.
pub const RETENTION_WEEKS: usize = 8;

/// Spaced key of the retention column `week` (1-based), e.g.
/// `"% retention 2 weeks later"`.
pub fn retention_week_key(week: usize) -> String {
    format!(
        "% retention {} week{} later",
        week,
        if week > 1 { "s" } else { "" }
    )
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamerActivation {
    pub day: String,
    pub project: String,
    pub new_gamers: f64,
}

impl FromRow for GamerActivation {
    fn from_row(r: &FieldReader<'_>) -> Self {
        Self {
            day: r.text(DAY_KEYS, ""),
            project: r.text(PROJECT_KEYS, UNKNOWN),
            new_gamers: r.number(&["number_of_new_gamers", "number of new gamers"]),
        }
    }
}

/// One weekly cohort with its retention curve in percent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamerRetention {
    pub cohort_week: String,
    pub game: String,
    pub new_users: f64,
    pub weeks: [f64; RETENTION_WEEKS],
}

impl GamerRetention {
    pub fn mean_retention(&self) -> f64 {
        self.weeks.iter().sum::<f64>() / RETENTION_WEEKS as f64
    }
}

impl FromRow for GamerRetention {
    fn from_row(r: &FieldReader<'_>) -> Self {
        let mut weeks = [0.0; RETENTION_WEEKS];
        for (i, slot) in weeks.iter_mut().enumerate() {
            let spaced = retention_week_key(i + 1);
            let snake = format!("retention_week_{}", i + 1);
            *slot = r.number(&[spaced.as_str(), snake.as_str()]);
        }
        Self {
            cohort_week: r.text(&["cohort_week", "cohort week"], "-"),
            game: r.text(&["game_project", "game project", "game"], "-"),
            new_users: r.number(&["new_users", "new users"]),
            weeks,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamerReactivation {
    pub week: String,
    pub project: String,
    pub users: f64,
}

impl FromRow for GamerReactivation {
    fn from_row(r: &FieldReader<'_>) -> Self {
        Self {
            week: r.text(WEEK_KEYS, ""),
            project: r.text(PROJECT_KEYS, UNKNOWN),
            users: r.number(&["users", "reactivated users", "reactivated_users"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamerDeactivation {
    pub week: String,
    pub project: String,
    pub deactivated_users: f64,
}

impl FromRow for GamerDeactivation {
    fn from_row(r: &FieldReader<'_>) -> Self {
        Self {
            week: r.text(WEEK_KEYS, ""),
            project: r.text(PROJECT_KEYS, UNKNOWN),
            deactivated_users: r.number(&["deactivated_users", "deactivated users"]),
        }
    }
}

/// A wallet that kept playing a game for most weeks since it started.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighRetentionUser {
    pub user: String,
    pub game: String,
    pub first_active_week: String,
    pub weeks_active: f64,
    pub retention_rate_pct: f64,
    /// Lowercased; `active` when absent
    pub status: String,
    pub portfolio_link: Option<String>,
}

impl FromRow for HighRetentionUser {
    fn from_row(r: &FieldReader<'_>) -> Self {
        Self {
            user: r.text(&["user", "user_wallet", "user wallet", "wallet"], UNKNOWN),
            game: r.text(&["game", "game project", "project"], UNKNOWN),
            first_active_week: r.text(&["first_active_week", "first active week"], "-"),
            weeks_active: r.number(&["weeks_active", "weeks active"]),
            retention_rate_pct: r.number(&[
                "retention_rate_pct",
                "retention rate %",
                "retention_rate",
            ]),
            status: r.text(&["status"], "active").to_lowercase(),
            portfolio_link: r.opt_text(&["portfolio_link", "portfolio link"]),
        }
    }
}

/// Per-game counts of wallets in each retention tier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighRetentionSummary {
    pub game: String,
    pub high_retention_users: f64,
    pub very_high_retention_users: f64,
    pub excellent_retention_users: f64,
    pub avg_retention_rate_pct: f64,
    pub avg_weeks_active: f64,
}

impl HighRetentionSummary {
    pub fn power_users(&self) -> f64 {
        self.high_retention_users + self.very_high_retention_users + self.excellent_retention_users
    }
}

impl FromRow for HighRetentionSummary {
    fn from_row(r: &FieldReader<'_>) -> Self {
        Self {
            game: r.text(&["game", "game project", "project"], UNKNOWN),
            high_retention_users: r.number(&[
                "high retention users (50%+)",
                "high retention users (70-80%)",
                "high_retention_users",
            ]),
            very_high_retention_users: r.number(&[
                "very high retention users (70%+)",
                "very high retention users (80-90%)",
                "very_high_retention_users",
            ]),
            excellent_retention_users: r.number(&[
                "excellent retention users (90%+)",
                "excellent_retention_users",
            ]),
            avg_retention_rate_pct: r.number(&["avg retention rate %", "avg_retention_rate_pct"]),
            avg_weeks_active: r.number(&["avg weeks active", "avg_weeks_active"]),
        }
    }
}

/// How many wallets played exactly `games` distinct games.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamersByGamesPlayed {
    pub games: i64,
    pub gamers: f64,
}

impl GamersByGamesPlayed {
    /// `"1 Game"`, `"3 Games"`
    pub fn label(&self) -> String {
        format!("{} Game{}", self.games, if self.games == 1 { "" } else { "s" })
    }
}

impl FromRow for GamersByGamesPlayed {
    fn from_row(r: &FieldReader<'_>) -> Self {
        Self {
            games: r.int_prefix(&["number_of_games", "number of games"]),
            gamers: r.number(&["number_of_gamers", "number of gamers"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrossGameGamer {
    pub gamer: String,
    pub games: Vec<String>,
    pub games_played: f64,
    pub portfolio_link: Option<String>,
}

impl FromRow for CrossGameGamer {
    fn from_row(r: &FieldReader<'_>) -> Self {
        let games = r.list(&["games", "games list"]);
        let mut games_played = r.number(&["games_played", "games played"]);
        if games_played == 0.0 {
            games_played = games.len() as f64;
        }
        Self {
            gamer: r.text(&["gamer", "wallet", "user_wallet"], UNKNOWN),
            games,
            games_played,
            portfolio_link: r.opt_text(&["portfolio_link", "portfolio link"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamingActivityTotal {
    pub project: String,
    pub transactions: f64,
    pub unique_users: f64,
}

impl GamingActivityTotal {
    /// Transactions per unique user.
    pub fn engagement(&self) -> f64 {
        self.transactions / if self.unique_users == 0.0 { 1.0 } else { self.unique_users }
    }
}

impl FromRow for GamingActivityTotal {
    fn from_row(r: &FieldReader<'_>) -> Self {
        Self {
            project: r.text(PROJECT_KEYS, UNKNOWN),
            transactions: r.number(&["number_of_game_transactions", "number of game transactions"]),
            unique_users: r.number(&["number_of_unique_users", "number of unique users"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyGamingActivity {
    pub day: String,
    pub project: String,
    pub gamers: f64,
    pub transactions: f64,
}

impl FromRow for DailyGamingActivity {
    fn from_row(r: &FieldReader<'_>) -> Self {
        Self {
            day: r.text(DAY_KEYS, ""),
            project: r.text(PROJECT_KEYS, UNKNOWN),
            gamers: r.number(&["number_of_gamers", "number of gamers"]),
            transactions: r.number(&["number_of_transactions", "number of transactions"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserDailyActivity {
    pub day: String,
    pub wallet: String,
    pub project: String,
    pub daily_transactions: f64,
}

impl FromRow for UserDailyActivity {
    fn from_row(r: &FieldReader<'_>) -> Self {
        Self {
            day: r.text(DAY_KEYS, ""),
            wallet: r.text(WALLET_KEYS, UNKNOWN),
            project: r.text(PROJECT_KEYS, UNKNOWN),
            daily_transactions: r.number(&["daily_transactions", "daily transactions"]),
        }
    }
}

impl TableRow for HighRetentionUser {
    fn fields(&self) -> Vec<(&'static str, CellValue)> {
        vec![
            ("user", self.user.as_str().into()),
            ("game", self.game.as_str().into()),
            ("first_active_week", self.first_active_week.as_str().into()),
            ("weeks_active", self.weeks_active.into()),
            ("retention_rate_pct", self.retention_rate_pct.into()),
            ("status", self.status.as_str().into()),
        ]
    }
}

impl TableRow for HighRetentionSummary {
    fn fields(&self) -> Vec<(&'static str, CellValue)> {
        vec![
            ("game", self.game.as_str().into()),
            ("high_retention_users", self.high_retention_users.into()),
            ("very_high_retention_users", self.very_high_retention_users.into()),
            ("excellent_retention_users", self.excellent_retention_users.into()),
            ("avg_retention_rate_pct", self.avg_retention_rate_pct.into()),
            ("avg_weeks_active", self.avg_weeks_active.into()),
        ]
    }
}

impl TableRow for CrossGameGamer {
    fn fields(&self) -> Vec<(&'static str, CellValue)> {
        vec![
            ("gamer", self.gamer.as_str().into()),
            ("games", self.games.join(", ").into()),
            ("games_played", self.games_played.into()),
        ]
    }
}

impl TableRow for GamingActivityTotal {
    fn fields(&self) -> Vec<(&'static str, CellValue)> {
        vec![
            ("project", self.project.as_str().into()),
            ("transactions", self.transactions.into()),
            ("unique_users", self.unique_users.into()),
            ("engagement", self.engagement().into()),
        ]
    }
}

impl TableRow for UserDailyActivity {
    fn fields(&self) -> Vec<(&'static str, CellValue)> {
        vec![
            ("day", self.day.as_str().into()),
            ("wallet", self.wallet.as_str().into()),
            ("project", self.project.as_str().into()),
            ("daily_transactions", self.daily_transactions.into()),
        ]
    }
}
