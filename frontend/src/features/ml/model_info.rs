use chrono::Utc;
use shared::format::{format_fixed, format_number};
use shared::insights::models::{feature_ranking, model_status};
use shared::{endpoints, ModelInfo};
use yew::prelude::*;

use crate::components::chart_renderer::horizontal_bar_chart;
use crate::components::{phase_view, Chart, ChartSize, GlassCard, KpiCard, KpiGrid};
use crate::config::Config;
use crate::hooks::use_auto_refresh;

/// Deployed champion, its ensemble and the features it ranks highest.
#[function_component(ModelPerformance)]
pub fn model_performance() -> Html {
    let state = use_auto_refresh::<ModelInfo>(endpoints::MODEL_INFO, Config::refresh_interval_ms());

    let body = phase_view(&state, "model info", |_| false, |info| {
        let status = model_status(info, Utc::now());
        let ranking = feature_ranking(&info.features);
        let champion = info.champion.as_ref();
        let window = info.prediction_window_days.unwrap_or(14.0);
        html! {
            <>
                <KpiGrid>
                    <KpiCard label="Status" value={status.status} icon="🟢" tone="text-emerald-400" />
                    <KpiCard label="Last Trained" value={status.last_trained} icon="🕒" />
                    <KpiCard label="Features" value={format_number(status.feature_count as f64)} icon="🧬" />
                    <KpiCard label="Prediction Window" value={format!("{} days", format_number(window))} icon="🔭" />
                </KpiGrid>
                if let Some(champion) = champion {
                    <div class="mb-6 rounded-xl border border-yellow-400/30 bg-yellow-400/5 p-4 text-sm">
                        <p class="font-bold text-yellow-300">{format!("👑 {}", champion.name)}</p>
                        <p class="text-slate-300">
                            {format!(
                                "ROC-AUC {}% · Accuracy {}%",
                                format_fixed(champion.roc_auc * 100.0, 1),
                                format_fixed(champion.accuracy * 100.0, 1)
                            )}
                        </p>
                    </div>
                }
                if !info.ensemble_models.is_empty() {
                    <div class="mb-6 flex flex-wrap gap-2">
                        { for info.ensemble_models.iter().map(|m| html! {
                            <span class="rounded bg-purple-500/20 px-2 py-1 text-xs">{m.clone()}</span>
                        }) }
                    </div>
                }
                <h3 class="mb-2 text-sm font-semibold text-slate-300">{"Feature ranking"}</h3>
                <Chart svg={horizontal_bar_chart(&ranking, ChartSize::new(640.0, 360.0))} />
            </>
        }
    });

    html! {
        <GlassCard title="ML Model Performance" subtitle="Champion model and feature ranking">
            {body}
        </GlassCard>
    }
}
