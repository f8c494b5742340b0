use std::rc::Rc;

use shared::format::{format_fixed, format_number};
use shared::insights::retention::{summary_kpis, summary_radar, summary_tiers};
use shared::{endpoints, Dataset, HighRetentionSummary};
use yew::prelude::*;

use crate::components::chart_renderer::{radar_chart, stacked_bar_chart};
use crate::components::{phase_view, Chart, ChartSize, Column, DataTable, GlassCard, KpiCard, KpiGrid};
use crate::config::Config;
use crate::hooks::use_auto_refresh;

const RADAR_AXES: [&str; 3] = ["Retention", "Activity", "Users"];

fn percent(value: f64) -> Html {
    html! { {format!("{}%", format_fixed(value, 1))} }
}

fn columns() -> Vec<Column<HighRetentionSummary>> {
    vec![
        Column::new("game", "Game"),
        Column::new("high_retention_users", "High (50%+)")
            .with_render(|r: &HighRetentionSummary| html! { {format_number(r.high_retention_users)} }),
        Column::new("very_high_retention_users", "Very High (70%+)")
            .with_render(|r: &HighRetentionSummary| html! { {format_number(r.very_high_retention_users)} }),
        Column::new("excellent_retention_users", "Excellent (90%+)")
            .with_render(|r: &HighRetentionSummary| html! { {format_number(r.excellent_retention_users)} }),
        Column::new("avg_retention_rate_pct", "Avg Retention").with_render(|r: &HighRetentionSummary| percent(r.avg_retention_rate_pct)),
        Column::new("avg_weeks_active", "Avg Weeks").with_render(|r: &HighRetentionSummary| html! { {format_fixed(r.avg_weeks_active, 1)} }),
    ]
}

/// Retention tiers per game.
#[function_component(RetentionSummary)]
pub fn retention_summary() -> Html {
    let state = use_auto_refresh::<Dataset<HighRetentionSummary>>(endpoints::HIGH_RETENTION_SUMMARY, Config::refresh_interval_ms());
    let columns = use_memo((), |_| columns());
    let rows = use_memo(state.data.clone(), |data| {
        data.as_ref().map(|d| d.rows.clone()).unwrap_or_default()
    });

    let body = phase_view(&state, "retention summary", Dataset::is_empty, |data| {
        let kpis = summary_kpis(&data.rows);
        let tiers = summary_tiers(&data.rows);
        let tier_chart = stacked_bar_chart(&tiers, &tiers.keys, ChartSize::default());
        let radar: Vec<(String, Vec<f64>)> = summary_radar(&data.rows)
            .into_iter()
            .map(|p| (p.game, vec![p.retention, p.activity, p.users]))
            .collect();
        let profile_chart = radar_chart(&RADAR_AXES, &radar, 100.0, ChartSize::new(420.0, 360.0));

        html! {
            <>
                <KpiGrid>
                    <KpiCard label="Top Game" value={kpis.top_game} icon="🏆" tone="text-yellow-400" />
                    <KpiCard
                        label="Avg Retention"
                        value={format!("{}%", format_fixed(kpis.avg_retention, 0))}
                        icon="📊"
                    />
                    <KpiCard
                        label="Power Users"
                        value={format_number(kpis.power_users)}
                        hint="Wallets across all retention tiers"
                        icon="⚡"
                        tone="text-emerald-400"
                    />
                </KpiGrid>
                <div class="grid grid-cols-1 xl:grid-cols-2 gap-6 mb-6">
                    <Chart svg={tier_chart} />
                    <Chart svg={profile_chart} />
                </div>
                <DataTable<HighRetentionSummary> rows={Rc::clone(&rows)} columns={Rc::clone(&columns)} searchable={false} />
            </>
        }
    });

    html! {
        <GlassCard title="High Retention Summary" subtitle="Loyal players per game, split by retention tier">
            {body}
        </GlassCard>
    }
}
