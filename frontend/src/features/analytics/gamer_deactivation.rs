use shared::format::format_number;
use shared::insights::lifecycle::{deactivation_kpis, deactivation_pivot};
use shared::{endpoints, Dataset, GamerDeactivation};
use yew::prelude::*;

use crate::components::chart_renderer::stacked_bar_chart;
use crate::components::{phase_view, Chart, ChartSize, GlassCard, KpiCard, KpiGrid};
use crate::config::Config;
use crate::features::day_labels;
use crate::hooks::use_auto_refresh;

#[function_component(DeactivationTrends)]
pub fn deactivation_trends() -> Html {
    let state = use_auto_refresh::<Dataset<GamerDeactivation>>(endpoints::GAMER_DEACTIVATION, Config::refresh_interval_ms());

    let body = phase_view(&state, "deactivation data", Dataset::is_empty, |data| {
        let kpis = deactivation_kpis(&data.rows);
        let pivot = deactivation_pivot(&data.rows);
        let svg = stacked_bar_chart(&pivot, &day_labels(&pivot.keys), ChartSize::default());
        html! {
            <>
                <KpiGrid>
                    <KpiCard label="Total Deactivations" value={format_number(kpis.total)} icon="📉" tone="text-red-400" />
                    <KpiCard label="Highest Churn Game" value={kpis.highest_game} icon="⚠️" tone="text-amber-400" />
                </KpiGrid>
                <Chart {svg} />
            </>
        }
    });

    html! {
        <GlassCard title="Gamer Deactivation" subtitle="Players who stopped playing, by week and game">
            {body}
        </GlassCard>
    }
}
