use shared::format::{format_fixed, format_week_range};
use shared::insights::retention::{
    cohort_games, filter_by_game, heat_opacity, retention_kpis, sorted_cohorts, weekly_average_curve,
};
use shared::models::analytics::RETENTION_WEEKS;
use shared::{endpoints, Dataset, GamerRetention};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::components::chart_renderer::{heatmap_chart, line_chart};
use crate::components::{phase_view, Chart, ChartSize, GlassCard, KpiCard, KpiGrid};
use crate::config::Config;
use crate::hooks::use_auto_refresh;

const ALL_GAMES: &str = "all";

fn week_labels() -> Vec<String> {
    (1..=RETENTION_WEEKS).map(|w| format!("W{}", w)).collect()
}

/// Weekly cohort retention with a per-game filter.
#[function_component(RetentionCohorts)]
pub fn retention_cohorts() -> Html {
    let state = use_auto_refresh::<Dataset<GamerRetention>>(endpoints::GAMER_RETENTION, Config::refresh_interval_ms());
    let selected = use_state(|| None::<String>);

    let on_game = {
        let selected = selected.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let value = select.value();
            selected.set((value != ALL_GAMES).then_some(value));
        })
    };

    let body = phase_view(&state, "retention cohorts", Dataset::is_empty, |data| {
        let games = cohort_games(&data.rows);
        let filtered: Vec<GamerRetention> = filter_by_game(&data.rows, selected.as_deref())
            .into_iter()
            .cloned()
            .collect();
        let cohorts = sorted_cohorts(&filtered);
        let kpis = retention_kpis(&cohorts);

        let rows: Vec<String> = cohorts
            .iter()
            .map(|c| format!("{} · {}", format_week_range(&c.cohort_week), c.game))
            .collect();
        let values: Vec<Vec<f64>> = cohorts.iter().map(|c| c.weeks.to_vec()).collect();
        let heatmap = heatmap_chart(&rows, &week_labels(), &values, heat_opacity, ChartSize::new(760.0, 480.0));

        let curve = weekly_average_curve(&cohorts);
        let trend = line_chart(
            &week_labels(),
            &[("Average retention %".to_string(), curve.to_vec())],
            ChartSize::default(),
        );

        html! {
            <>
                <div class="flex items-center gap-3 mb-4">
                    <label class="text-sm text-slate-400" for="retention-game">{"Game"}</label>
                    <select
                        id="retention-game"
                        class="rounded-lg bg-white/5 border border-white/10 px-3 py-1 text-sm"
                        onchange={on_game}
                    >
                        <option value={ALL_GAMES} selected={selected.is_none()}>{"All games"}</option>
                        { for games.iter().map(|game| html! {
                            <option value={game.clone()} selected={selected.as_deref() == Some(game.as_str())}>
                                {game.clone()}
                            </option>
                        }) }
                    </select>
                </div>
                <KpiGrid>
                    <KpiCard label="Best Cohort" value={kpis.best_cohort} icon="🏆" />
                    <KpiCard
                        label="Avg Week 1 Retention"
                        value={format!("{}%", format_fixed(kpis.avg_week1, 1))}
                        icon="📊"
                        tone="text-emerald-400"
                    />
                    <KpiCard label="Champion Game" value={kpis.champion_game} icon="🎮" />
                </KpiGrid>
                <Chart svg={heatmap} />
                <h3 class="mt-6 mb-2 text-sm font-semibold text-slate-300">{"Average retention curve"}</h3>
                <Chart svg={trend} />
            </>
        }
    });

    html! {
        <GlassCard title="Gamer Retention" subtitle="Share of each weekly cohort still playing in later weeks">
            {body}
        </GlassCard>
    }
}
