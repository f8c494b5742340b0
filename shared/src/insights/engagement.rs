//! Multi-game engagement: how many games wallets play and which together.

use std::collections::HashMap;
use std::f64::consts::PI;

use crate::format::MISSING;
use crate::insights::pivot::{group_count, mean_or_zero, top_by};
use crate::models::analytics::{CrossGameGamer, GamersByGamesPlayed};

/// Distribution buckets ordered by number of games.
pub fn sorted_distribution(rows: &[GamersByGamesPlayed]) -> Vec<GamersByGamesPlayed> {
    let mut sorted = rows.to_vec();
    sorted.sort_by_key(|r| r.games);
    sorted
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistributionKpis {
    pub total_gamers: f64,
    pub multi_game_gamers: f64,
    pub avg_games: f64,
}

pub fn distribution_kpis(rows: &[GamersByGamesPlayed]) -> DistributionKpis {
    let total_gamers: f64 = rows.iter().map(|r| r.gamers).sum();
    let weighted: f64 = rows.iter().map(|r| r.games as f64 * r.gamers).sum();
    DistributionKpis {
        total_gamers,
        multi_game_gamers: rows.iter().filter(|r| r.games > 1).map(|r| r.gamers).sum(),
        avg_games: if total_gamers > 0.0 { weighted / total_gamers } else { 0.0 },
    }
}

/// Percent of all gamers in `row`'s bucket.
pub fn share_percent(row: &GamersByGamesPlayed, total_gamers: f64) -> f64 {
    if total_gamers > 0.0 {
        row.gamers / total_gamers * 100.0
    } else {
        0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrossGameKpis {
    pub total: usize,
    pub avg_games: f64,
    /// Most common set of games, e.g. `"Aurory + Star Atlas"`
    pub top_combo: String,
}

fn combo(gamer: &CrossGameGamer) -> String {
    let mut games = gamer.games.clone();
    games.sort();
    games.join(" + ")
}

pub fn cross_game_kpis(gamers: &[CrossGameGamer]) -> CrossGameKpis {
    let combos = group_count(gamers, combo);
    let top_combo = top_by(
        &combos
            .into_iter()
            .filter(|(k, _)| !k.is_empty())
            .collect::<Vec<_>>(),
    );
    CrossGameKpis {
        total: gamers.len(),
        avg_games: mean_or_zero(gamers.iter().map(|g| g.games_played).sum(), gamers.len()),
        top_combo: if top_combo.is_empty() { MISSING.to_string() } else { top_combo },
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkNode {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkLink {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameNetwork {
    pub nodes: Vec<NetworkNode>,
    pub links: Vec<NetworkLink>,
}

impl GameNetwork {
    pub const CENTER: f64 = 200.0;
    pub const RADIUS: f64 = 150.0;

    pub fn max_weight(&self) -> f64 {
        self.links.iter().map(|l| l.weight).fold(0.0, f64::max)
    }
}

/// Games as nodes on a circle, linked by how many wallets play both.
pub fn game_network(gamers: &[CrossGameGamer]) -> GameNetwork {
    let mut names: Vec<String> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for game in gamers.iter().flat_map(|g| g.games.iter()) {
        if !index.contains_key(game) {
            index.insert(game.clone(), names.len());
            names.push(game.clone());
        }
    }

    let mut pairs: Vec<(usize, usize)> = Vec::new();
    let mut weights: HashMap<(usize, usize), f64> = HashMap::new();
    for gamer in gamers {
        let mut games = gamer.games.clone();
        games.sort();
        games.dedup();
        for (i, a) in games.iter().enumerate() {
            for b in &games[i + 1..] {
                let key = (index[a], index[b]);
                let weight = weights.entry(key).or_insert_with(|| {
                    pairs.push(key);
                    0.0
                });
                *weight += 1.0;
            }
        }
    }

    let count = names.len().max(1) as f64;
    let nodes = names
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let angle = 2.0 * PI * i as f64 / count;
            NetworkNode {
                name,
                x: GameNetwork::CENTER + GameNetwork::RADIUS * angle.cos(),
                y: GameNetwork::CENTER + GameNetwork::RADIUS * angle.sin(),
            }
        })
        .collect();
    let links = pairs
        .into_iter()
        .map(|(source, target)| NetworkLink {
            source,
            target,
            weight: weights.get(&(source, target)).copied().unwrap_or(0.0),
        })
        .collect();

    GameNetwork { nodes, links }
}
