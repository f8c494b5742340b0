use shared::format::{format_timestamp_utc, MISSING};
use shared::{endpoints, CacheStatus};
use yew::prelude::*;

use crate::components::live_indicator::LiveIndicator;
use crate::config::Config;
use crate::hooks::use_auto_refresh;

#[function_component(Footer)]
pub fn footer() -> Html {
    let cache = use_auto_refresh::<CacheStatus>(endpoints::CACHE_STATUS, Config::refresh_interval_ms());

    let online = cache.is_reachable();
    let last_updated = cache
        .data()
        .and_then(|status| status.last_updated())
        .map(format_timestamp_utc)
        .unwrap_or_else(|| MISSING.to_string());
    let sources = cache
        .data()
        .map(|status| format!("{}/{} sources fresh", status.fresh_sources(), status.sources.len()));

    html! {
        <footer class="mt-auto border-t border-white/10 bg-slate-950 text-slate-400">
            <div class="container mx-auto flex flex-col gap-2 px-4 py-6 text-xs md:flex-row md:items-center md:justify-between">
                <div>
                    <span class="font-semibold text-slate-200">{"Solana Game Signals"}</span>
                    {" · Analytics refreshed from on-chain data every few hours"}
                </div>
                <div class="flex items-center gap-4">
                    <span>{format!("Last updated: {}", last_updated)}</span>
                    if let Some(sources) = sources {
                        <span>{sources}</span>
                    }
                    <LiveIndicator online={online} label={if online { "API Online" } else { "API Offline" }} />
                </div>
            </div>
        </footer>
    }
}
