use std::rc::Rc;

use shared::format::{format_fixed, format_number};
use shared::insights::churn::risk_color;
use shared::insights::elite::{elite_analytics, elite_gamers, EliteGamer, ELITE_PAGE_SIZE};
use shared::{endpoints, ChurnPrediction, ChurnResponse, Dataset, HighRetentionUser};
use yew::prelude::*;

use crate::components::chart_renderer::{bar_chart, donut_chart, horizontal_bar_chart};
use crate::components::{phase_view, Chart, ChartSize, Column, DataTable, GlassCard};
use crate::config::Config;
use crate::features::analytics::high_retention_users::wallet_link;
use crate::hooks::use_auto_refresh;

fn columns() -> Vec<Column<EliteGamer>> {
    vec![
        Column::new("wallet", "Wallet").with_render(|g: &EliteGamer| wallet_link(&g.wallet, None)),
        Column::new("game", "Game"),
        Column::new("weeks_active", "Weeks Active").with_render(|g: &EliteGamer| html! { {format_number(g.weeks_active)} }),
        Column::new("retention_rate", "Retention")
            .with_render(|g: &EliteGamer| html! { {format!("{}%", format_fixed(g.retention_rate, 1))} }),
        Column::new("churn_risk", "Churn Risk").with_render(|g: &EliteGamer| {
            html! {
                <span class={classes!("badge", g.risk_tone())}>
                    {format!("{}%", format_fixed(g.churn_risk, 1))}
                </span>
            }
        }),
        Column::new("risk_level", "Risk Level"),
    ]
}

fn predictions(churn: &Option<Rc<ChurnResponse>>) -> &[ChurnPrediction] {
    churn.as_ref().map(|c| c.predictions.as_slice()).unwrap_or(&[])
}

/// Where elite gamers play and how likely they are to leave.
#[function_component(EliteGamersAnalytics)]
pub fn elite_gamers_analytics() -> Html {
    let interval = Config::refresh_interval_ms();
    let users = use_auto_refresh::<Dataset<HighRetentionUser>>(endpoints::HIGH_RETENTION_USERS, interval);
    let churn = use_auto_refresh::<ChurnResponse>(endpoints::CHURN_PREDICTIONS, interval);

    let body = phase_view(&users, "elite gamer analytics", Dataset::is_empty, |data| {
        let analytics = elite_analytics(&data.rows, predictions(&churn.data));
        let slices: Vec<(String, f64, &str)> = analytics
            .risk_distribution
            .iter()
            .map(|(level, count)| (format!("{} Risk", level), *count, risk_color(*level)))
            .collect();
        html! {
            <div class="grid grid-cols-1 xl:grid-cols-3 gap-6">
                <div>
                    <h3 class="mb-2 text-sm font-semibold text-slate-300">{"Elite Gamers by Game"}</h3>
                    <Chart svg={bar_chart(&analytics.by_game, ChartSize::new(420.0, 300.0))} />
                </div>
                <div>
                    <h3 class="mb-2 text-sm font-semibold text-slate-300">{"Avg Retention by Game"}</h3>
                    <Chart svg={horizontal_bar_chart(&analytics.retention_by_game, ChartSize::new(420.0, 300.0))} />
                </div>
                <div>
                    <h3 class="mb-2 text-sm font-semibold text-slate-300">{"Churn Risk Mix"}</h3>
                    <Chart svg={donut_chart(&slices, ChartSize::new(320.0, 300.0))} />
                </div>
            </div>
        }
    });

    html! {
        <GlassCard title="Elite Gamers Analytics">
            {body}
        </GlassCard>
    }
}

/// Directory of elite gamers, interleaved across games.
#[function_component(EliteGamersTable)]
pub fn elite_gamers_table() -> Html {
    let interval = Config::refresh_interval_ms();
    let users = use_auto_refresh::<Dataset<HighRetentionUser>>(endpoints::HIGH_RETENTION_USERS, interval);
    let churn = use_auto_refresh::<ChurnResponse>(endpoints::CHURN_PREDICTIONS, interval);
    let columns = use_memo((), |_| columns());
    let rows = use_memo((users.data.clone(), churn.data.clone()), |(users, churn)| {
        users
            .as_ref()
            .map(|u| elite_gamers(&u.rows, predictions(churn)))
            .unwrap_or_default()
    });

    let body = phase_view(&users, "elite gamers", Dataset::is_empty, |_| {
        html! {
            <DataTable<EliteGamer>
                rows={Rc::clone(&rows)}
                columns={Rc::clone(&columns)}
                page_size={ELITE_PAGE_SIZE}
                placeholder="Search elite wallets or games..."
            />
        }
    });

    html! {
        <GlassCard
            title="Elite Gamers Directory"
            subtitle="Retained gamers with 3+ weeks active who played in the last 7 days"
        >
            {body}
        </GlassCard>
    }
}
