use shared::format::{format_fixed, format_number};
use shared::insights::engagement::{distribution_kpis, share_percent, sorted_distribution};
use shared::{endpoints, Dataset, GamersByGamesPlayed};
use yew::prelude::*;

use crate::components::chart_renderer::{bar_chart, donut_chart, palette};
use crate::components::{phase_view, Chart, ChartSize, GlassCard, KpiCard, KpiGrid};
use crate::config::Config;
use crate::hooks::use_auto_refresh;

/// How many distinct games each wallet plays.
#[function_component(GamesPlayedDistribution)]
pub fn games_played_distribution() -> Html {
    let state = use_auto_refresh::<Dataset<GamersByGamesPlayed>>(endpoints::GAMERS_BY_GAMES_PLAYED, Config::refresh_interval_ms());

    let body = phase_view(&state, "games played distribution", Dataset::is_empty, |data| {
        let kpis = distribution_kpis(&data.rows);
        let buckets = sorted_distribution(&data.rows);
        let bars: Vec<(String, f64)> = buckets.iter().map(|b| (b.label(), b.gamers)).collect();
        let slices: Vec<(String, f64, &str)> = buckets
            .iter()
            .enumerate()
            .map(|(i, b)| (b.label(), b.gamers, palette(i)))
            .collect();

        html! {
            <>
                <KpiGrid>
                    <KpiCard label="Total Gamers" value={format_number(kpis.total_gamers)} icon="👥" />
                    <KpiCard
                        label="Multi-Game Gamers"
                        value={format_number(kpis.multi_game_gamers)}
                        icon="🎮"
                        tone="text-emerald-400"
                    />
                    <KpiCard label="Avg Games per Gamer" value={format_fixed(kpis.avg_games, 2)} icon="📊" />
                </KpiGrid>
                <div class="grid grid-cols-1 xl:grid-cols-2 gap-6 mb-4">
                    <Chart svg={bar_chart(&bars, ChartSize::default())} />
                    <Chart svg={donut_chart(&slices, ChartSize::new(360.0, 320.0))} />
                </div>
                <ul class="grid grid-cols-2 md:grid-cols-4 gap-2 text-xs text-slate-300">
                    { for buckets.iter().map(|b| html! {
                        <li class="rounded bg-white/5 px-3 py-2">
                            <span class="font-semibold">{b.label()}</span>
                            {format!(": {} ({}%)", format_number(b.gamers), format_fixed(share_percent(b, kpis.total_gamers), 1))}
                        </li>
                    }) }
                </ul>
            </>
        }
    });

    html! {
        <GlassCard title="Games Played Distribution" subtitle="Wallets grouped by number of distinct games played">
            {body}
        </GlassCard>
    }
}
