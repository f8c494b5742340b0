use shared::insights::overview::{churn_alerts, AlertKind};
use shared::{endpoints, ChurnResponse, Phase};
use yew::prelude::*;

use crate::components::{ErrorBanner, LoadingState};
use crate::config::Config;
use crate::hooks::use_auto_refresh;

#[function_component(LiveAlerts)]
pub fn live_alerts() -> Html {
    let churn = use_auto_refresh::<ChurnResponse>(endpoints::CHURN_PREDICTIONS, Config::refresh_interval_ms());

    let alerts = match churn.phase() {
        Phase::Loading => return html! { <LoadingState label="Checking churn alerts..." /> },
        Phase::Failed(error) => return html! { <ErrorBanner error={error.clone()} /> },
        Phase::Ready { data, .. } => churn_alerts(Some(data)),
    };

    html! {
        <div class="live-alerts space-y-3 mb-6">
            { for alerts.into_iter().map(|alert| {
                let (icon, class) = match alert.kind {
                    AlertKind::Critical => ("🚨", "border-red-500/50 bg-red-500/10"),
                    AlertKind::Healthy => ("✅", "border-emerald-500/50 bg-emerald-500/10"),
                };
                html! {
                    <div class={classes!("alert", "rounded-xl", "border", "p-4", class)} role="status">
                        <div class="flex items-start gap-3">
                            <span class="text-2xl">{icon}</span>
                            <div>
                                <p class="font-bold text-white">{alert.title}</p>
                                <p class="text-sm text-slate-300">{alert.message}</p>
                                <p class="text-xs text-slate-400 mt-1">{format!("Recommended: {}", alert.action)}</p>
                            </div>
                        </div>
                    </div>
                }
            }) }
        </div>
    }
}
