use std::rc::Rc;

use shared::format::{format_fixed, format_number, format_week_range, shorten_wallet, solscan_account_url};
use shared::insights::retention::{high_retention_kpis, rank_by_rate, Badge};
use shared::{endpoints, Dataset, HighRetentionUser};
use yew::prelude::*;

use crate::components::{phase_view, Column, DataTable, GlassCard, KpiCard, KpiGrid};
use crate::config::Config;
use crate::hooks::use_auto_refresh;

pub(crate) fn wallet_link(wallet: &str, portfolio: Option<&str>) -> Html {
    let href = portfolio.map(str::to_string).unwrap_or_else(|| solscan_account_url(wallet));
    html! {
        <a class="font-mono text-purple-300 hover:underline" {href} target="_blank" rel="noopener noreferrer" title={wallet.to_string()}>
            {shorten_wallet(wallet)}
        </a>
    }
}

fn columns() -> Vec<Column<HighRetentionUser>> {
    vec![
        Column::new("user", "Wallet").with_render(|u: &HighRetentionUser| wallet_link(&u.user, u.portfolio_link.as_deref())),
        Column::new("game", "Game"),
        Column::new("first_active_week", "First Active")
            .with_render(|u: &HighRetentionUser| html! { {format_week_range(&u.first_active_week)} }),
        Column::new("weeks_active", "Weeks Active")
            .with_render(|u: &HighRetentionUser| html! { {format_number(u.weeks_active)} }),
        Column::new("retention_rate_pct", "Retention").with_render(|u: &HighRetentionUser| {
            html! {
                <span class={Badge::for_rate(u.retention_rate_pct).css_class()}>
                    {format!("{}%", format_fixed(u.retention_rate_pct, 1))}
                </span>
            }
        }),
        Column::new("status", "Status"),
    ]
}

/// Wallets that kept playing for most of their lifetime.
#[function_component(HighRetentionTable)]
pub fn high_retention_table() -> Html {
    let state = use_auto_refresh::<Dataset<HighRetentionUser>>(endpoints::HIGH_RETENTION_USERS, Config::refresh_interval_ms());
    let columns = use_memo((), |_| columns());
    let ranked = use_memo(state.data.clone(), |data| {
        data.as_ref()
            .map(|d| rank_by_rate(&d.rows).into_iter().cloned().collect::<Vec<_>>())
            .unwrap_or_default()
    });

    let body = phase_view(&state, "high retention users", Dataset::is_empty, |data| {
        let kpis = high_retention_kpis(&data.rows);
        html! {
            <>
                <KpiGrid>
                    <KpiCard label="Retained Gamers" value={format_number(kpis.count as f64)} icon="💎" />
                    <KpiCard
                        label="Avg Retention"
                        value={format!("{}%", format_fixed(kpis.avg_rate, 0))}
                        icon="📈"
                        tone="text-emerald-400"
                    />
                    <KpiCard label="Most Loyal Game" value={kpis.most_loyal_game} icon="🎮" />
                </KpiGrid>
                <DataTable<HighRetentionUser>
                    rows={Rc::clone(&ranked)}
                    columns={Rc::clone(&columns)}
                    placeholder="Search wallets or games..."
                />
            </>
        }
    });

    html! {
        <GlassCard title="High Retention Users" subtitle="Retention rate of 50% or higher">
            {body}
        </GlassCard>
    }
}
