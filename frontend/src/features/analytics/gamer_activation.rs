use shared::format::{format_fixed, format_number};
use shared::insights::lifecycle::{activation_kpis, activation_pivot};
use shared::{endpoints, Dataset, GamerActivation};
use yew::prelude::*;

use crate::components::chart_renderer::stacked_bar_chart;
use crate::components::{phase_view, Chart, ChartSize, GlassCard, KpiCard, KpiGrid};
use crate::config::Config;
use crate::features::day_labels;
use crate::hooks::use_auto_refresh;

/// New gamers per day, stacked by game.
#[function_component(ActivationTrends)]
pub fn activation_trends() -> Html {
    let state = use_auto_refresh::<Dataset<GamerActivation>>(endpoints::GAMER_ACTIVATION, Config::refresh_interval_ms());

    let body = phase_view(&state, "activation data", Dataset::is_empty, |data| {
        let kpis = activation_kpis(&data.rows);
        let pivot = activation_pivot(&data.rows);
        let svg = stacked_bar_chart(&pivot, &day_labels(&pivot.keys), ChartSize::default());
        html! {
            <>
                <KpiGrid>
                    <KpiCard label="Total Activations" value={format_number(kpis.total)} icon="🚀" />
                    <KpiCard label="Avg per Day" value={format_fixed(kpis.avg_per_day, 1)} icon="📅" />
                    <KpiCard label="Top Game" value={kpis.top_game} icon="🎯" tone="text-emerald-400" />
                </KpiGrid>
                <Chart {svg} />
            </>
        }
    });

    html! {
        <GlassCard title="Gamer Activation" subtitle="First-time players per game and day">
            {body}
        </GlassCard>
    }
}
