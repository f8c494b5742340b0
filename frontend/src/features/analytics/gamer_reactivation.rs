use shared::format::{format_fixed, format_number, format_week_range};
use shared::insights::lifecycle::{reactivation_kpis, reactivation_pivot};
use shared::{endpoints, Dataset, GamerReactivation};
use yew::prelude::*;

use crate::components::chart_renderer::pivot_line_chart;
use crate::components::{phase_view, Chart, ChartSize, GlassCard, KpiCard, KpiGrid};
use crate::config::Config;
use crate::features::day_labels;
use crate::hooks::use_auto_refresh;

/// Returning gamers per week and game.
#[function_component(ReactivationTrends)]
pub fn reactivation_trends() -> Html {
    let state = use_auto_refresh::<Dataset<GamerReactivation>>(endpoints::GAMER_REACTIVATION, Config::refresh_interval_ms());

    let body = phase_view(&state, "reactivation data", Dataset::is_empty, |data| {
        let kpis = reactivation_kpis(&data.rows);
        let pivot = reactivation_pivot(&data.rows);
        let svg = pivot_line_chart(&pivot, &day_labels(&pivot.keys), ChartSize::default());
        html! {
            <>
                <KpiGrid>
                    <KpiCard label="Total Reactivations" value={format_number(kpis.total)} icon="🔄" />
                    <KpiCard label="Avg per Week" value={format_fixed(kpis.avg_per_week, 1)} icon="📈" />
                    <KpiCard label="Best Week" value={format_week_range(&kpis.best_week)} icon="🏅" tone="text-emerald-400" />
                </KpiGrid>
                <Chart {svg} />
            </>
        }
    });

    html! {
        <GlassCard title="Gamer Reactivation" subtitle="Players returning after a week or more away">
            {body}
        </GlassCard>
    }
}
