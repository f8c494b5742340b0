use std::rc::Rc;

use shared::format::{format_fixed, format_number};
use shared::insights::churn::{churn_kpis, filter_by_risk, risk_color, risk_distribution};
use shared::{endpoints, ChurnPrediction, ChurnResponse, ModelInfo, RiskLevel};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::components::chart_renderer::donut_chart;
use crate::components::{phase_view, Chart, ChartSize, Column, DataTable, GlassCard, KpiCard, KpiGrid};
use crate::config::Config;
use crate::features::analytics::high_retention_users::wallet_link;
use crate::hooks::use_auto_refresh;

pub(crate) fn probability_cell(probability: f64) -> Html {
    let pct = probability * 100.0;
    html! {
        <div class="flex items-center gap-2">
            <div class="h-1.5 w-16 rounded bg-white/10">
                <div class="h-1.5 rounded bg-red-500" style={format!("width: {:.0}%", pct.clamp(0.0, 100.0))}></div>
            </div>
            <span>{format!("{}%", format_fixed(pct, 1))}</span>
        </div>
    }
}

pub(crate) fn risk_badge(level: RiskLevel) -> Html {
    html! {
        <span class="badge" style={format!("color: {}; border-color: {}", risk_color(level), risk_color(level))}>
            {level.as_str()}
        </span>
    }
}

fn columns() -> Vec<Column<ChurnPrediction>> {
    vec![
        Column::new("user_wallet", "Wallet").with_render(|p: &ChurnPrediction| wallet_link(&p.user_wallet, None)),
        Column::new("project", "Game"),
        Column::new("churn_probability", "Churn Probability").with_render(|p: &ChurnPrediction| probability_cell(p.churn_probability)),
        Column::new("risk_level", "Risk").with_render(|p: &ChurnPrediction| risk_badge(p.risk_level)),
        Column::new("days_since_last_activity", "Days Inactive")
            .with_render(|p: &ChurnPrediction| html! { {format_number(p.days_since_last_activity)} }),
        Column::new("total_transactions", "Transactions")
            .with_render(|p: &ChurnPrediction| html! { {format_number(p.total_transactions)} }),
        Column::new("consistency_score", "Consistency")
            .with_render(|p: &ChurnPrediction| html! { {format_fixed(p.consistency_score, 2)} }),
    ]
}

fn parse_filter(value: &str) -> Option<RiskLevel> {
    RiskLevel::ALL.iter().copied().find(|l| l.as_str() == value)
}

/// Per-wallet churn forecast with a risk filter.
#[function_component(ChurnRiskOverview)]
pub fn churn_risk_overview() -> Html {
    let interval = Config::refresh_interval_ms();
    let state = use_auto_refresh::<ChurnResponse>(endpoints::CHURN_PREDICTIONS, interval);
    let model = use_auto_refresh::<ModelInfo>(endpoints::MODEL_INFO, interval);
    let filter = use_state(|| None::<RiskLevel>);
    let columns = use_memo((), |_| columns());
    let rows = use_memo((state.data.clone(), *filter), |(data, filter)| {
        data.as_ref()
            .map(|d| filter_by_risk(&d.predictions, *filter).into_iter().cloned().collect::<Vec<_>>())
            .unwrap_or_default()
    });

    let on_filter = {
        let filter = filter.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            filter.set(parse_filter(&select.value()));
        })
    };

    let body = phase_view(&state, "churn predictions", |d| d.predictions.is_empty(), |data| {
        let kpis = churn_kpis(data, model.data());
        let slices: Vec<(String, f64, &str)> = risk_distribution(data)
            .into_iter()
            .map(|(level, count)| (format!("{} Risk", level), count, risk_color(level)))
            .collect();
        html! {
            <>
                <KpiGrid>
                    <KpiCard label="Users at Risk" value={format_number(kpis.total_at_risk)} hint="High and medium risk" icon="⚠️" tone="text-red-400" />
                    <KpiCard label="Avg Churn Probability" value={format!("{}%", format_fixed(kpis.avg_probability_pct, 1))} icon="📉" />
                    <KpiCard label="Champion Model" value={kpis.champion} icon="🤖" tone="text-purple-300" />
                    <KpiCard
                        label="Model Accuracy"
                        value={format!("{}%", format_fixed(kpis.accuracy_pct, 1))}
                        hint={format!("ROC-AUC {}%", format_fixed(kpis.roc_auc_pct, 1))}
                        icon="🎯"
                        tone="text-emerald-400"
                    />
                </KpiGrid>
                <div class="grid grid-cols-1 xl:grid-cols-3 gap-6">
                    <Chart svg={donut_chart(&slices, ChartSize::new(320.0, 300.0))} />
                    <div class="xl:col-span-2">
                        <div class="flex items-center gap-3 mb-3">
                            <label class="text-sm text-slate-400" for="risk-filter">{"Risk level"}</label>
                            <select
                                id="risk-filter"
                                class="rounded-lg bg-white/5 border border-white/10 px-3 py-1 text-sm"
                                onchange={on_filter}
                            >
                                <option value="all" selected={filter.is_none()}>{"All"}</option>
                                { for RiskLevel::ALL.iter().map(|level| html! {
                                    <option value={level.as_str()} selected={*filter == Some(*level)}>{level.as_str()}</option>
                                }) }
                            </select>
                        </div>
                        <DataTable<ChurnPrediction>
                            rows={Rc::clone(&rows)}
                            columns={Rc::clone(&columns)}
                            placeholder="Search wallets or games..."
                        />
                    </div>
                </div>
            </>
        }
    });

    html! {
        <GlassCard title="Churn Risk Predictions" subtitle="Probability that each wallet stops playing in the next 14 days">
            {body}
        </GlassCard>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter() {
        assert_eq!(parse_filter("High"), Some(RiskLevel::High));
        assert_eq!(parse_filter("Low"), Some(RiskLevel::Low));
        assert_eq!(parse_filter("all"), None);
    }
}
