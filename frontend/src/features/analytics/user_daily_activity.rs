use std::rc::Rc;

use shared::format::{format_day_label, format_fixed, format_number};
use shared::insights::activity::{filter_user_activity, user_activity_kpis};
use shared::{endpoints, Dataset, GamersByGamesPlayed, GamingActivityTotal, UserDailyActivity};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::{phase_view, Column, DataTable, GlassCard, KpiCard, KpiGrid};
use crate::config::Config;
use crate::features::analytics::high_retention_users::wallet_link;
use crate::hooks::use_auto_refresh;

fn columns() -> Vec<Column<UserDailyActivity>> {
    vec![
        Column::new("day", "Day").with_render(|r: &UserDailyActivity| html! { {format_day_label(&r.day)} }),
        Column::new("wallet", "Wallet").with_render(|r: &UserDailyActivity| wallet_link(&r.wallet, None)),
        Column::new("project", "Game"),
        Column::new("daily_transactions", "Transactions")
            .with_render(|r: &UserDailyActivity| html! { {format_number(r.daily_transactions)} }),
    ]
}

/// Per-wallet daily transaction log.
#[function_component(UserActivityLog)]
pub fn user_activity_log() -> Html {
    let interval = Config::refresh_interval_ms();
    let state = use_auto_refresh::<Dataset<UserDailyActivity>>(endpoints::USER_DAILY_ACTIVITY, interval);
    let activity = use_auto_refresh::<Dataset<GamingActivityTotal>>(endpoints::GAMING_ACTIVITY_TOTAL, interval);
    let distribution = use_auto_refresh::<Dataset<GamersByGamesPlayed>>(endpoints::GAMERS_BY_GAMES_PLAYED, interval);
    let term = use_state(String::new);
    let columns = use_memo((), |_| columns());
    let rows = use_memo((state.data.clone(), (*term).clone()), |(data, term)| {
        data.as_ref()
            .map(|d| filter_user_activity(&d.rows, term).into_iter().cloned().collect::<Vec<_>>())
            .unwrap_or_default()
    });

    let on_filter = {
        let term = term.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            term.set(input.value());
        })
    };

    let body = phase_view(&state, "user activity", Dataset::is_empty, |data| {
        let kpis = user_activity_kpis(
            &data.rows,
            activity.data().map(|d| d.rows.as_slice()),
            distribution.data().map(|d| d.rows.as_slice()),
        );
        html! {
            <>
                <KpiGrid>
                    <KpiCard label="Total Transactions" value={format_number(kpis.total_transactions)} icon="⚡" />
                    <KpiCard label="Active Users" value={format_number(kpis.active_users)} icon="👥" />
                    <KpiCard
                        label="Avg Daily Transactions"
                        value={format_fixed(kpis.avg_daily_transactions, 1)}
                        hint="Per wallet and day"
                        icon="📈"
                    />
                </KpiGrid>
                <input
                    type="search"
                    class="mb-3 w-full rounded-lg bg-white/5 border border-white/10 px-3 py-2 text-sm"
                    placeholder="Filter by wallet or game..."
                    value={(*term).clone()}
                    oninput={on_filter}
                />
                <DataTable<UserDailyActivity> rows={Rc::clone(&rows)} columns={Rc::clone(&columns)} searchable={false} />
            </>
        }
    });

    html! {
        <GlassCard title="User Daily Activity" subtitle="Transactions per wallet, game and day">
            {body}
        </GlassCard>
    }
}
