use std::rc::Rc;

use shared::format::{format_fixed, format_number};
use shared::insights::churn::{game_health_kpis, game_scatter};
use shared::{endpoints, ChurnByGame, ChurnByGameResponse};
use yew::prelude::*;

use crate::components::chart_renderer::{palette, scatter_chart, ScatterPoint};
use crate::components::{phase_view, Chart, ChartSize, Column, DataTable, GlassCard, KpiCard, KpiGrid};
use crate::config::Config;
use crate::features::ml::churn_predictions::probability_cell;
use crate::hooks::use_auto_refresh;

fn columns() -> Vec<Column<ChurnByGame>> {
    vec![
        Column::new("project", "Game"),
        Column::new("total_users", "Users").with_render(|g: &ChurnByGame| html! { {format_number(g.total_users)} }),
        Column::new("avg_churn_probability", "Avg Churn").with_render(|g: &ChurnByGame| probability_cell(g.avg_churn_probability)),
        Column::new("high", "High Risk")
            .with_render(|g: &ChurnByGame| html! { <span class="text-red-400">{format_number(g.high)}</span> }),
        Column::new("medium", "Medium Risk")
            .with_render(|g: &ChurnByGame| html! { <span class="text-amber-400">{format_number(g.medium)}</span> }),
        Column::new("low", "Low Risk")
            .with_render(|g: &ChurnByGame| html! { <span class="text-emerald-400">{format_number(g.low)}</span> }),
    ]
}

/// Churn outlook aggregated per game.
#[function_component(GameChurnAnalysis)]
pub fn game_churn_analysis() -> Html {
    let state = use_auto_refresh::<ChurnByGameResponse>(endpoints::CHURN_BY_GAME, Config::refresh_interval_ms());
    let columns = use_memo((), |_| columns());
    let rows = use_memo(state.data.clone(), |data| {
        data.as_ref().map(|d| d.games.clone()).unwrap_or_default()
    });

    let body = phase_view(&state, "churn by game", |d| d.games.is_empty(), |data| {
        let kpis = game_health_kpis(&data.games);
        let points: Vec<ScatterPoint> = game_scatter(&data.games)
            .into_iter()
            .enumerate()
            .map(|(i, (game, users, churn_pct, high))| ScatterPoint {
                label: game,
                x: users,
                y: churn_pct,
                size: high,
                color: palette(i).to_string(),
            })
            .collect();
        html! {
            <>
                <KpiGrid>
                    <KpiCard label="Riskiest Game" value={kpis.riskiest} icon="🔥" tone="text-red-400" />
                    <KpiCard label="Healthiest Game" value={kpis.healthiest} icon="💚" tone="text-emerald-400" />
                    <KpiCard label="Avg Game Health" value={format!("{}%", format_fixed(kpis.avg_health, 1))} icon="📊" />
                </KpiGrid>
                <Chart svg={scatter_chart(&points, "Users", "Avg churn %", ChartSize::default())} />
                <div class="mt-6">
                    <DataTable<ChurnByGame> rows={Rc::clone(&rows)} columns={Rc::clone(&columns)} placeholder="Search games..." />
                </div>
            </>
        }
    });

    html! {
        <GlassCard title="Churn Analysis by Game" subtitle="Bubble size shows high-risk users">
            {body}
        </GlassCard>
    }
}
