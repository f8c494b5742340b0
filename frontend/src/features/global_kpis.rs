use shared::format::{format_fixed, format_number};
use shared::insights::overview::{self, OverviewSources};
use shared::{endpoints, ChurnResponse, Dataset, GamersByGamesPlayed, GamingActivityTotal, HighRetentionUser};
use yew::prelude::*;

use crate::components::{ErrorBanner, KpiCard, KpiGrid, LoadingState};
use crate::config::Config;
use crate::hooks::use_auto_refresh;

fn health_tone(score: f64) -> &'static str {
    if score >= 70.0 {
        "text-emerald-400"
    } else if score >= 50.0 {
        "text-amber-400"
    } else {
        "text-red-400"
    }
}

/// Ecosystem headline numbers across every game.
#[function_component(GlobalKpis)]
pub fn global_kpis() -> Html {
    let interval = Config::refresh_interval_ms();
    let activity = use_auto_refresh::<Dataset<GamingActivityTotal>>(endpoints::GAMING_ACTIVITY_TOTAL, interval);
    let distribution = use_auto_refresh::<Dataset<GamersByGamesPlayed>>(endpoints::GAMERS_BY_GAMES_PLAYED, interval);
    let churn = use_auto_refresh::<ChurnResponse>(endpoints::CHURN_PREDICTIONS, interval);
    let elite = use_auto_refresh::<Dataset<HighRetentionUser>>(endpoints::HIGH_RETENTION_USERS, interval);

    let nothing_loaded = activity.data.is_none()
        && distribution.data.is_none()
        && churn.data.is_none()
        && elite.data.is_none();
    if nothing_loaded {
        let errors = [&activity.error, &distribution.error, &churn.error, &elite.error];
        if errors.iter().all(|e| e.is_some()) {
            if let Some(error) = errors.iter().find_map(|e| e.as_ref()) {
                return html! { <ErrorBanner error={error.clone()} title={AttrValue::from("Could not load ecosystem KPIs")} /> };
            }
        }
        return html! { <LoadingState label="Loading ecosystem KPIs..." /> };
    }

    let kpis = overview::global_kpis(&OverviewSources {
        activity: activity.data().map(|d| d.rows.as_slice()),
        distribution: distribution.data().map(|d| d.rows.as_slice()),
        churn: churn.data(),
        elite: elite.data().map(|d| d.rows.as_slice()),
    });

    html! {
        <KpiGrid>
            <KpiCard
                label="Total Ecosystem Users"
                value={format_number(kpis.total_users)}
                hint="Unique wallets, last 60 days"
                icon="👥"
            />
            <KpiCard
                label="Total Transactions"
                value={format_number(kpis.total_transactions)}
                hint="Across all tracked games"
                icon="⚡"
            />
            <KpiCard
                label="Ecosystem Health Score"
                value={format!("{}%", format_fixed(kpis.ecosystem_health, 1))}
                hint="100 minus mean churn probability"
                icon="💚"
                tone={health_tone(kpis.ecosystem_health)}
            />
            <KpiCard
                label="Total Elite Gamers"
                value={format_number(kpis.elite_gamers as f64)}
                hint="High retention, long-lived, recently active"
                icon="🏆"
                tone="text-yellow-400"
            />
        </KpiGrid>
    }
}
