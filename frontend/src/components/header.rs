use shared::{endpoints, HealthStatus};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::live_indicator::LiveIndicator;
use crate::config::Config;
use crate::hooks::use_auto_refresh;
use crate::Route;

const LINKS: [(Route, &str); 3] = [
    (Route::Landing, "Home"),
    (Route::Dashboard, "Analytics"),
    (Route::Predictions, "Predictions"),
];

#[function_component(Header)]
pub fn header() -> Html {
    let current = use_route::<Route>().unwrap_or(Route::Dashboard);
    let health = use_auto_refresh::<HealthStatus>(endpoints::HEALTH, Config::refresh_interval_ms());

    let healthy = health.is_reachable() && health.data().map_or(true, HealthStatus::is_healthy);
    let champion = health
        .data()
        .and_then(|h| h.champion_model.clone())
        .map(|model| format!("Champion model: {}", model));

    html! {
        <header class="sticky top-0 z-20 bg-slate-950/80 backdrop-blur border-b border-white/10">
            <div class="container mx-auto flex items-center justify-between px-4 py-3">
                <Link<Route> to={Route::Landing} classes="flex items-center gap-3">
                    <span class="text-lg font-bold tracking-tight text-white">{"Solana Game Signals"}</span>
                    <span title={champion}>
                        <LiveIndicator online={healthy} label={if healthy { "LIVE" } else { "DEGRADED" }} />
                    </span>
                </Link<Route>>
                <nav class="flex items-center gap-1">
                    { for LINKS.iter().map(|(route, label)| {
                        let active = *route == current;
                        html! {
                            <Link<Route>
                                to={route.clone()}
                                classes={classes!(
                                    "px-3", "py-2", "rounded-md", "text-sm",
                                    if active { "bg-white/10 text-white" } else { "text-slate-400 hover:text-white" }
                                )}
                            >
                                {*label}
                            </Link<Route>>
                        }
                    }) }
                </nav>
            </div>
        </header>
    }
}
