use yew::prelude::*;
use yew_router::prelude::*;

use crate::hooks::use_page_title;
use crate::Route;

const FEATURES: [(&str, &str, &str); 3] = [
    ("🤖", "AI PREDICTION", "ML-driven churn forecasting & LTV modeling"),
    ("📡", "LIVE TELEMETRY", "Real-time ecosystem health & transaction tracking"),
    ("🐋", "ELITE TRACKING", "Deep dive analysis of whale & power user behavior"),
];

#[function_component(Landing)]
pub fn landing() -> Html {
    use_page_title("Solana Gaming Analytics");
    let navigator = use_navigator();

    let on_enter = Callback::from(move |_: MouseEvent| {
        if let Some(navigator) = &navigator {
            navigator.push(&Route::Dashboard);
        }
    });

    html! {
        <div class="landing-page min-h-[80vh] flex flex-col items-center justify-center px-4 text-center">
            <p class="mb-4 text-xs font-bold uppercase tracking-[0.3em] text-emerald-400">{"Powered by Predictive AI/ML"}</p>
            <h1 class="text-5xl sm:text-7xl font-black leading-tight text-white">
                {"SOLANA"}<br />
                <span class="text-purple-400">{"ANALYTICS"}</span>
            </h1>
            <p class="mt-6 max-w-2xl text-slate-400">
                {"Retention, engagement and churn predictions across the Solana gaming ecosystem, refreshed continuously from on-chain data."}
            </p>
            <button
                class="mt-10 rounded-xl bg-purple-600 px-8 py-4 text-lg font-semibold text-white hover:bg-purple-500"
                onclick={on_enter}
            >
                {"Initialize System"}
            </button>
            <div class="mt-16 grid w-full max-w-5xl grid-cols-1 md:grid-cols-3 gap-6">
                { for FEATURES.iter().map(|(icon, title, text)| html! {
                    <div class="rounded-2xl border border-white/10 bg-white/5 p-6 text-left">
                        <div class="mb-3 text-3xl">{*icon}</div>
                        <h3 class="font-bold text-white">{*title}</h3>
                        <p class="mt-1 text-sm text-slate-400">{*text}</p>
                    </div>
                }) }
            </div>
        </div>
    }
}
