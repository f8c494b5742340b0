use shared::format::{format_number, format_short_day};
use shared::insights::activity::{daily_heatmap, daily_kpis, daily_pivot, DailyMetric};
use shared::{endpoints, Dataset, DailyGamingActivity};
use yew::prelude::*;

use crate::components::chart_renderer::pivot_line_chart;
use crate::components::{phase_view, Chart, ChartSize, GlassCard, KpiCard, KpiGrid};
use crate::config::Config;
use crate::features::day_labels;
use crate::hooks::use_auto_refresh;

const METRICS: [DailyMetric; 2] = [DailyMetric::Gamers, DailyMetric::Transactions];

/// Daily gamers or transactions per game, with a calendar strip of totals.
#[function_component(DailyActivityTrends)]
pub fn daily_activity_trends() -> Html {
    let state = use_auto_refresh::<Dataset<DailyGamingActivity>>(endpoints::DAILY_GAMING_ACTIVITY, Config::refresh_interval_ms());
    let metric = use_state(DailyMetric::default);

    let toggles = METRICS.iter().map(|m| {
        let m = *m;
        let metric = metric.clone();
        let active = *metric == m;
        let onclick = Callback::from(move |_: MouseEvent| metric.set(m));
        html! {
            <button
                class={classes!(
                    "px-3", "py-1", "rounded-md", "text-xs",
                    if active { "bg-purple-600 text-white" } else { "bg-white/5 text-slate-300" }
                )}
                {onclick}
            >
                {m.label()}
            </button>
        }
    });

    let body = phase_view(&state, "daily activity", Dataset::is_empty, |data| {
        let kpis = daily_kpis(&data.rows);
        let pivot = daily_pivot(&data.rows, *metric);
        let cells = daily_heatmap(&data.rows, *metric);
        html! {
            <>
                <KpiGrid>
                    <KpiCard label="Peak Day" value={kpis.peak_day} hint="Most transactions" icon="📅" />
                    <KpiCard label="Most Consistent Game" value={kpis.consistent_game} icon="🎯" tone="text-emerald-400" />
                </KpiGrid>
                <div class="flex gap-2 mb-3">{ for toggles }</div>
                <Chart svg={pivot_line_chart(&pivot, &day_labels(&pivot.keys), ChartSize::new(760.0, 340.0))} />
                <div class="heat-strip mt-6 grid grid-cols-7 md:grid-cols-10 gap-1">
                    { for cells.iter().map(|cell| html! {
                        <div
                            class="heat-cell h-8 rounded"
                            style={format!("background: {}", cell.intensity.color())}
                            title={format!("{}: {} {}", format_short_day(&cell.day), format_number(cell.value), metric.label())}
                        />
                    }) }
                </div>
            </>
        }
    });

    html! {
        <GlassCard title="Daily Gaming Activity" subtitle="Day-by-day volume per game">
            {body}
        </GlassCard>
    }
}
