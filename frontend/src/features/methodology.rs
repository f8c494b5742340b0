use yew::prelude::*;

const DEFINITIONS: [(&str, &str); 4] = [
    (
        "Total Ecosystem Gamers",
        "Unique wallet addresses that played at least one game in the last 60 days.",
    ),
    (
        "Retained Gamers (>50%)",
        "Users active for at least half of their lifespan in the ecosystem, e.g. 4 out of 8 weeks.",
    ),
    (
        "Elite Gamers",
        "Retained gamers who have also been active for 3+ weeks and played within the last 7 days.",
    ),
    (
        "Game Activations vs. Unique Users",
        "Activations count events per game. A wallet that starts 3 games adds 3 activations but only 1 ecosystem gamer.",
    ),
];

/// Data window and metric definitions shown above the dashboard.
#[function_component(Methodology)]
pub fn methodology() -> Html {
    html! {
        <div class="methodology space-y-4 mb-8">
            <div class="rounded-xl border border-purple-500/30 bg-purple-500/10 p-4">
                <h4 class="font-bold text-white mb-1">{"Data Scope & Methodology"}</h4>
                <p class="text-sm text-slate-300">
                    {"All metrics cover the last 60 days of Solana gaming activity. Churn models use this history to forecast the next 14 days."}
                </p>
            </div>
            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                { for DEFINITIONS.iter().map(|(term, definition)| html! {
                    <div class="rounded-xl border border-white/10 bg-white/5 p-4">
                        <h5 class="font-bold text-sm text-white mb-1">{*term}</h5>
                        <p class="text-xs text-slate-400">{*definition}</p>
                    </div>
                }) }
            </div>
        </div>
    }
}
