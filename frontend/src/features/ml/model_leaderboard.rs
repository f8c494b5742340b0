use std::rc::Rc;

use shared::format::{format_fixed, format_number};
use shared::insights::models::{leaderboard_kpis, radar_models, RADAR_AXES};
use shared::{endpoints, LeaderboardEntry, ModelLeaderboard};
use yew::prelude::*;

use crate::components::chart_renderer::radar_chart;
use crate::components::{phase_view, Chart, ChartSize, Column, DataTable, GlassCard, KpiCard, KpiGrid};
use crate::config::Config;
use crate::hooks::use_auto_refresh;

fn pct(value: f64) -> Html {
    html! { {format!("{}%", format_fixed(value * 100.0, 1))} }
}

fn columns() -> Vec<Column<LeaderboardEntry>> {
    vec![
        Column::new("rank", "#"),
        Column::new("model_name", "Model").with_render(|e: &LeaderboardEntry| {
            html! {
                <span class="font-semibold">
                    {e.model_name.clone()}
                    if e.is_champion {
                        <span class="ml-2 text-yellow-400" title="Champion">{"👑"}</span>
                    }
                </span>
            }
        }),
        Column::new("roc_auc", "ROC-AUC").with_render(|e: &LeaderboardEntry| pct(e.roc_auc)),
        Column::new("accuracy", "Accuracy").with_render(|e: &LeaderboardEntry| pct(e.accuracy)),
        Column::new("precision", "Precision").with_render(|e: &LeaderboardEntry| pct(e.precision)),
        Column::new("recall", "Recall").with_render(|e: &LeaderboardEntry| pct(e.recall)),
        Column::new("training_time_seconds", "Train Time")
            .with_render(|e: &LeaderboardEntry| html! { {format!("{}s", format_fixed(e.training_time_seconds, 1))} }),
        Column::new("in_ensemble", "Ensemble")
            .with_render(|e: &LeaderboardEntry| html! { { if e.in_ensemble { "✓" } else { "" } } }),
    ]
}

/// Candidate models ranked by ROC-AUC.
#[function_component(ModelLeaderboardPanel)]
pub fn model_leaderboard_panel() -> Html {
    let state = use_auto_refresh::<ModelLeaderboard>(endpoints::MODEL_LEADERBOARD, Config::refresh_interval_ms());
    let columns = use_memo((), |_| columns());
    let rows = use_memo(state.data.clone(), |data| {
        data.as_ref().map(|d| d.entries.clone()).unwrap_or_default()
    });

    let body = phase_view(&state, "model leaderboard", |d| d.entries.is_empty(), |data| {
        let kpis = leaderboard_kpis(&data.entries);
        let series: Vec<(String, Vec<f64>)> = radar_models(&data.entries)
            .into_iter()
            .map(|(name, scores)| (name, scores.to_vec()))
            .collect();
        html! {
            <>
                <KpiGrid>
                    <KpiCard label="Champion" value={kpis.champion} icon="👑" tone="text-yellow-400" />
                    <KpiCard label="Best ROC-AUC" value={format!("{}%", format_fixed(kpis.best_auc * 100.0, 1))} icon="🎯" />
                    <KpiCard label="Ensemble Size" value={format_number(kpis.ensemble_size as f64)} icon="🧩" />
                </KpiGrid>
                <div class="grid grid-cols-1 xl:grid-cols-3 gap-6">
                    <Chart svg={radar_chart(&RADAR_AXES, &series, 100.0, ChartSize::new(420.0, 360.0))} />
                    <div class="xl:col-span-2">
                        <DataTable<LeaderboardEntry>
                            rows={Rc::clone(&rows)}
                            columns={Rc::clone(&columns)}
                            searchable={false}
                        />
                    </div>
                </div>
            </>
        }
    });

    html! {
        <GlassCard title="Model Leaderboard" subtitle="Top three models compared on every metric">
            {body}
        </GlassCard>
    }
}
