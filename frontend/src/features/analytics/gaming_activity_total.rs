use std::rc::Rc;

use shared::format::{format_fixed, format_number};
use shared::insights::activity::{activity_totals, bubble_points, top_by_transactions};
use shared::{endpoints, Dataset, GamingActivityTotal};
use yew::prelude::*;

use crate::components::chart_renderer::{horizontal_bar_chart, palette, scatter_chart, ScatterPoint};
use crate::components::{phase_view, Chart, ChartSize, Column, DataTable, GlassCard, KpiCard, KpiGrid};
use crate::config::Config;
use crate::hooks::use_auto_refresh;

const TOP_GAMES: usize = 10;

fn columns() -> Vec<Column<GamingActivityTotal>> {
    vec![
        Column::new("project", "Game"),
        Column::new("transactions", "Transactions")
            .with_render(|r: &GamingActivityTotal| html! { {format_number(r.transactions)} }),
        Column::new("unique_users", "Unique Users")
            .with_render(|r: &GamingActivityTotal| html! { {format_number(r.unique_users)} }),
        Column::new("engagement", "Tx per User")
            .with_render(|r: &GamingActivityTotal| html! { {format_fixed(r.engagement(), 1)} }),
    ]
}

/// Lifetime transactions and users per game.
#[function_component(TotalActivity)]
pub fn total_activity() -> Html {
    let state = use_auto_refresh::<Dataset<GamingActivityTotal>>(endpoints::GAMING_ACTIVITY_TOTAL, Config::refresh_interval_ms());
    let columns = use_memo((), |_| columns());
    let rows = use_memo(state.data.clone(), |data| {
        data.as_ref().map(|d| d.rows.clone()).unwrap_or_default()
    });

    let body = phase_view(&state, "activity totals", Dataset::is_empty, |data| {
        let totals = activity_totals(&data.rows);
        let bubbles: Vec<ScatterPoint> = bubble_points(&data.rows)
            .into_iter()
            .enumerate()
            .map(|(i, p)| ScatterPoint {
                label: p.name,
                x: p.users,
                y: p.transactions,
                size: p.engagement,
                color: palette(i).to_string(),
            })
            .collect();
        let top = top_by_transactions(&data.rows, TOP_GAMES);

        html! {
            <>
                <KpiGrid>
                    <KpiCard label="Total Transactions" value={format_number(totals.total_transactions)} icon="⚡" />
                    <KpiCard label="Total Users" value={format_number(totals.total_users)} hint="Summed per game" icon="👥" />
                    <KpiCard label="Most Active Game" value={totals.most_active} icon="🔥" tone="text-emerald-400" />
                </KpiGrid>
                <div class="grid grid-cols-1 xl:grid-cols-2 gap-6 mb-6">
                    <div>
                        <h3 class="mb-2 text-sm font-semibold text-slate-300">{"Users vs. Transactions"}</h3>
                        <Chart svg={scatter_chart(&bubbles, "Unique users", "Transactions", ChartSize::default())} />
                    </div>
                    <div>
                        <h3 class="mb-2 text-sm font-semibold text-slate-300">{"Top 10 Games by Transactions"}</h3>
                        <Chart svg={horizontal_bar_chart(&top, ChartSize::default())} />
                    </div>
                </div>
                <DataTable<GamingActivityTotal>
                    rows={Rc::clone(&rows)}
                    columns={Rc::clone(&columns)}
                    placeholder="Search games..."
                />
            </>
        }
    });

    html! {
        <GlassCard title="Gaming Activity Totals" subtitle="Transactions and unique users per game">
            {body}
        </GlassCard>
    }
}
