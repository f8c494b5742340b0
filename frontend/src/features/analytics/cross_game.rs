use std::rc::Rc;

use shared::format::{format_fixed, format_number};
use shared::insights::engagement::{cross_game_kpis, game_network};
use shared::{endpoints, CrossGameGamer, Dataset};
use yew::prelude::*;

use crate::components::chart_renderer::network_chart;
use crate::components::{phase_view, Chart, Column, DataTable, GlassCard, KpiCard, KpiGrid};
use crate::config::Config;
use crate::features::analytics::high_retention_users::wallet_link;
use crate::hooks::use_auto_refresh;

fn columns() -> Vec<Column<CrossGameGamer>> {
    vec![
        Column::new("gamer", "Wallet")
            .with_render(|g: &CrossGameGamer| wallet_link(&g.gamer, g.portfolio_link.as_deref())),
        Column::new("games", "Games").with_render(|g: &CrossGameGamer| {
            html! {
                <div class="flex flex-wrap gap-1">
                    { for g.games.iter().map(|game| html! {
                        <span class="rounded bg-purple-500/20 px-2 py-0.5 text-xs">{game.clone()}</span>
                    }) }
                </div>
            }
        }),
        Column::new("games_played", "Games Played")
            .with_render(|g: &CrossGameGamer| html! { {format_number(g.games_played)} }),
    ]
}

/// Wallets playing several games and the games they share.
#[function_component(CrossGameEngagement)]
pub fn cross_game_engagement() -> Html {
    let state = use_auto_refresh::<Dataset<CrossGameGamer>>(endpoints::CROSS_GAME_GAMERS, Config::refresh_interval_ms());
    let columns = use_memo((), |_| columns());
    let rows = use_memo(state.data.clone(), |data| {
        data.as_ref().map(|d| d.rows.clone()).unwrap_or_default()
    });
    let network = use_memo(state.data.clone(), |data| {
        data.as_ref().map(|d| game_network(&d.rows)).unwrap_or_default()
    });

    let body = phase_view(&state, "cross-game gamers", Dataset::is_empty, |data| {
        let kpis = cross_game_kpis(&data.rows);
        html! {
            <>
                <KpiGrid>
                    <KpiCard label="Cross-Game Gamers" value={format_number(kpis.total as f64)} icon="🌐" />
                    <KpiCard label="Avg Games" value={format_fixed(kpis.avg_games, 1)} icon="🎮" />
                    <KpiCard label="Top Combo" value={kpis.top_combo} icon="🔗" tone="text-emerald-400" />
                </KpiGrid>
                <div class="grid grid-cols-1 xl:grid-cols-2 gap-6">
                    <Chart class="max-w-md mx-auto" svg={network_chart(&network)} />
                    <DataTable<CrossGameGamer>
                        rows={Rc::clone(&rows)}
                        columns={Rc::clone(&columns)}
                        placeholder="Search wallets or games..."
                    />
                </div>
            </>
        }
    });

    html! {
        <GlassCard title="Cross-Game Gamers" subtitle="Links show how many wallets two games share">
            {body}
        </GlassCard>
    }
}
