use shared::insights::overview::{ticker_events, TickerKind, TickerSources};
use shared::{endpoints, ChurnResponse, Dataset, GamersByGamesPlayed, HighRetentionSummary, ModelInfo};
use yew::prelude::*;

use crate::config::Config;
use crate::hooks::use_auto_refresh;

fn icon(kind: TickerKind) -> &'static str {
    match kind {
        TickerKind::Model => "🤖",
        TickerKind::Risk => "⚠️",
        TickerKind::Retention => "🏆",
        TickerKind::Pulse => "💓",
        TickerKind::Network => "🌐",
        TickerKind::Feed => "📡",
    }
}

/// Scrolling strip of the latest ecosystem signals.
#[function_component(LiveTicker)]
pub fn live_ticker() -> Html {
    let interval = Config::refresh_interval_ms();
    let model = use_auto_refresh::<ModelInfo>(endpoints::MODEL_INFO, interval);
    let churn = use_auto_refresh::<ChurnResponse>(endpoints::CHURN_PREDICTIONS, interval);
    let retention = use_auto_refresh::<Dataset<HighRetentionSummary>>(endpoints::HIGH_RETENTION_SUMMARY, interval);
    let distribution = use_auto_refresh::<Dataset<GamersByGamesPlayed>>(endpoints::GAMERS_BY_GAMES_PLAYED, interval);

    let events = ticker_events(&TickerSources {
        model: model.data(),
        churn: churn.data(),
        retention: retention.data().map(|d| d.rows.as_slice()),
        distribution: distribution.data().map(|d| d.rows.as_slice()),
    });

    // Rendered twice so the marquee loops without a gap.
    let items = events.iter().chain(events.iter()).map(|event| {
        html! {
            <span class="ticker-item inline-flex items-center gap-2 px-6 text-sm text-slate-200">
                <span>{icon(event.kind)}</span>
                {event.text.clone()}
            </span>
        }
    });

    html! {
        <div class="live-ticker overflow-hidden whitespace-nowrap border-y border-white/10 bg-black/40 py-2">
            <div class="ticker-track inline-block animate-marquee">{ for items }</div>
        </div>
    }
}
