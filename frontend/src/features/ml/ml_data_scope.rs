use shared::format::{format_fixed, format_number};
use shared::insights::churn::data_scope;
use shared::{endpoints, ChurnResponse, Dataset, GamersByGamesPlayed};
use yew::prelude::*;

use crate::components::{GlassCard, KpiCard, KpiGrid, LoadingState};
use crate::config::Config;
use crate::hooks::use_auto_refresh;

/// How much of the ecosystem the churn model covers.
#[function_component(MlDataScope)]
pub fn ml_data_scope() -> Html {
    let interval = Config::refresh_interval_ms();
    let distribution = use_auto_refresh::<Dataset<GamersByGamesPlayed>>(endpoints::GAMERS_BY_GAMES_PLAYED, interval);
    let churn = use_auto_refresh::<ChurnResponse>(endpoints::CHURN_PREDICTIONS, interval);

    if distribution.data.is_none() && churn.data.is_none() && (distribution.loading || churn.loading) {
        return html! { <LoadingState label="Loading model coverage..." /> };
    }

    let scope = data_scope(distribution.data().map(|d| d.rows.as_slice()), churn.data());

    html! {
        <GlassCard title="ML Data Scope" subtitle="Wallets with enough history are scored; the rest are excluded">
            <KpiGrid>
                <KpiCard label="Ecosystem Users" value={format_number(scope.ecosystem_users)} icon="🌐" />
                <KpiCard label="Analyzed by Model" value={format_number(scope.analyzed_users)} icon="🤖" tone="text-purple-300" />
                <KpiCard label="Excluded" value={format_number(scope.excluded_users)} hint="Too little activity to score" icon="🚫" />
                <KpiCard
                    label="Coverage"
                    value={format!("{}%", format_fixed(scope.coverage_pct, 1))}
                    icon="📐"
                    tone="text-emerald-400"
                />
            </KpiGrid>
        </GlassCard>
    }
}
