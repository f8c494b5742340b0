use std::rc::Rc;

use shared::format::{format_currency, format_fixed, format_number};
use shared::insights::churn::{high_risk_kpis, high_risk_users, RetentionAction};
use shared::{endpoints, ChurnPrediction, HighRiskUsersResponse};
use yew::prelude::*;

use crate::components::{phase_view, Column, DataTable, GlassCard, KpiCard, KpiGrid};
use crate::config::Config;
use crate::features::analytics::high_retention_users::wallet_link;
use crate::features::ml::churn_predictions::{probability_cell, risk_badge};
use crate::hooks::use_auto_refresh;

fn action_class(action: RetentionAction) -> &'static str {
    match action {
        RetentionAction::ImmediateIntervention => "bg-red-500/20 text-red-300",
        RetentionAction::SendPromo => "bg-amber-500/20 text-amber-300",
        RetentionAction::Monitor => "bg-white/10 text-slate-300",
    }
}

fn columns() -> Vec<Column<ChurnPrediction>> {
    vec![
        Column::new("user_wallet", "Wallet").with_render(|p: &ChurnPrediction| wallet_link(&p.user_wallet, None)),
        Column::new("project", "Game"),
        Column::new("churn_probability", "Churn Risk").with_render(|p: &ChurnPrediction| probability_cell(p.churn_probability)),
        Column::new("days_since_last_activity", "Days Inactive")
            .with_render(|p: &ChurnPrediction| html! { {format_number(p.days_since_last_activity)} }),
        Column::new("risk_level", "Recommended Action").with_render(|p: &ChurnPrediction| {
            let action = RetentionAction::for_probability(p.churn_probability);
            html! {
                <div class="flex items-center gap-2">
                    {risk_badge(p.risk_level)}
                    <span class={classes!("rounded", "px-2", "py-0.5", "text-xs", "font-bold", action_class(action))}>
                        {action.label()}
                    </span>
                </div>
            }
        }),
    ]
}

/// Wallets most likely to churn, with the suggested intervention.
#[function_component(HighRiskInterventions)]
pub fn high_risk_interventions() -> Html {
    let state = use_auto_refresh::<HighRiskUsersResponse>(endpoints::HIGH_RISK_USERS, Config::refresh_interval_ms());
    let columns = use_memo((), |_| columns());
    let rows = use_memo(state.data.clone(), |data| {
        data.as_ref()
            .map(|d| high_risk_users(&d.users).into_iter().cloned().collect::<Vec<_>>())
            .unwrap_or_default()
    });

    let body = phase_view(&state, "high risk users", |d| d.users.is_empty(), |data| {
        let flagged = high_risk_users(&data.users);
        let kpis = high_risk_kpis(&flagged);
        html! {
            <>
                <KpiGrid>
                    <KpiCard label="High Risk Users" value={format_number(kpis.count as f64)} icon="🚨" tone="text-red-400" />
                    <KpiCard label="Critical (>60%)" value={format_number(kpis.critical as f64)} icon="⛔" tone="text-red-500" />
                    <KpiCard label="Avg Risk" value={format!("{}%", format_fixed(kpis.avg_risk_pct, 1))} icon="📉" />
                    <KpiCard
                        label="Revenue at Risk"
                        value={format_currency(kpis.revenue_at_risk)}
                        hint="Estimated lifetime value"
                        icon="💰"
                        tone="text-amber-400"
                    />
                </KpiGrid>
                <DataTable<ChurnPrediction> rows={Rc::clone(&rows)} columns={Rc::clone(&columns)} placeholder="Search wallets..." />
            </>
        }
    });

    html! {
        <GlassCard title="High Risk Users" subtitle="Wallets above 40% churn probability">
            {body}
        </GlassCard>
    }
}
