use shared::format::{format_fixed, shorten_wallet, solscan_account_url};
use shared::insights::churn::risk_color;
use shared::insights::elite::scroller_entries;
use shared::{endpoints, ChurnResponse, Dataset, HighRetentionUser, Phase};
use yew::prelude::*;

use crate::components::{ErrorBanner, LoadingState};
use crate::config::Config;
use crate::hooks::use_auto_refresh;

/// Marquee of the twenty most loyal wallets with their churn outlook.
#[function_component(EliteScroller)]
pub fn elite_scroller() -> Html {
    let interval = Config::refresh_interval_ms();
    let users = use_auto_refresh::<Dataset<HighRetentionUser>>(endpoints::HIGH_RETENTION_USERS, interval);
    let churn = use_auto_refresh::<ChurnResponse>(endpoints::CHURN_PREDICTIONS, interval);

    let entries = use_memo(
        (users.data.clone(), churn.data.clone()),
        |(users, churn)| {
            let predictions = churn.as_ref().map(|c| c.predictions.as_slice()).unwrap_or(&[]);
            users
                .as_ref()
                .map(|u| scroller_entries(&u.rows, predictions))
                .unwrap_or_default()
        },
    );

    match users.phase() {
        Phase::Loading => return html! { <LoadingState label="Loading elite gamers..." /> },
        Phase::Failed(error) => return html! { <ErrorBanner error={error.clone()} /> },
        Phase::Ready { .. } if entries.is_empty() => return html! {},
        Phase::Ready { .. } => {}
    }

    let cards = entries.iter().chain(entries.iter()).map(|entry| {
        html! {
            <a
                class="elite-card inline-flex flex-col mx-2 rounded-lg border border-white/10 bg-white/5 px-4 py-2 text-xs"
                href={solscan_account_url(&entry.wallet)}
                target="_blank"
                rel="noopener noreferrer"
            >
                <span class="font-mono text-slate-200">{shorten_wallet(&entry.wallet)}</span>
                <span class="text-emerald-400">{format!("{}% retention", format_fixed(entry.retention_rate, 0))}</span>
                <span style={format!("color: {}", risk_color(entry.risk_level))}>
                    {format!("{} risk · {}%", entry.risk_level, format_fixed(entry.churn_probability * 100.0, 1))}
                </span>
            </a>
        }
    });

    html! {
        <div class="elite-scroller mb-6">
            <p class="mb-2 text-xs font-bold uppercase tracking-widest text-yellow-400">{"🏆 Elite Gamers"}</p>
            <div class="overflow-hidden whitespace-nowrap">
                <div class="inline-block animate-marquee">{ for cards }</div>
            </div>
        </div>
    }
}
