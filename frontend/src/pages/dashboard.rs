use log::debug;
use yew::prelude::*;

use crate::components::{GlassCard, Tabs};
use crate::features::analytics::cross_game::CrossGameEngagement;
use crate::features::analytics::daily_activity::DailyActivityTrends;
use crate::features::analytics::elite_gamers::{EliteGamersAnalytics, EliteGamersTable};
use crate::features::analytics::gamer_activation::ActivationTrends;
use crate::features::analytics::gamer_deactivation::DeactivationTrends;
use crate::features::analytics::gamer_reactivation::ReactivationTrends;
use crate::features::analytics::gamer_retention::RetentionCohorts;
use crate::features::analytics::games_played::GamesPlayedDistribution;
use crate::features::analytics::gaming_activity_total::TotalActivity;
use crate::features::analytics::high_retention_summary::RetentionSummary;
use crate::features::analytics::high_retention_users::HighRetentionTable;
use crate::features::analytics::user_daily_activity::UserActivityLog;
use crate::features::elite_scroller::EliteScroller;
use crate::features::global_kpis::GlobalKpis;
use crate::features::live_alerts::LiveAlerts;
use crate::features::live_ticker::LiveTicker;
use crate::features::methodology::Methodology;
use crate::features::ml::churn_by_game::GameChurnAnalysis;
use crate::features::ml::churn_predictions::ChurnRiskOverview;
use crate::features::ml::high_risk_users::HighRiskInterventions;
use crate::features::ml::ml_data_scope::MlDataScope;
use crate::features::ml::model_info::ModelPerformance;
use crate::features::ml::model_leaderboard::ModelLeaderboardPanel;
use crate::hooks::use_page_title;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardTab {
    Overview,
    Lifecycle,
    Engagement,
    Activity,
    Predictions,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 5] = [
        DashboardTab::Overview,
        DashboardTab::Lifecycle,
        DashboardTab::Engagement,
        DashboardTab::Activity,
        DashboardTab::Predictions,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DashboardTab::Overview => "📊 Overview",
            DashboardTab::Lifecycle => "🔄 User Lifecycle",
            DashboardTab::Engagement => "🎮 Engagement",
            DashboardTab::Activity => "⚡ Activity & Volume",
            DashboardTab::Predictions => "🤖 ML Predictions",
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(DashboardTab::Overview)
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }
}

fn section(title: &str) -> Html {
    html! {
        <h2 class="mt-10 mb-4 text-2xl font-bold text-white">{title.to_string()}</h2>
    }
}

fn tab_content(tab: DashboardTab) -> Html {
    match tab {
        DashboardTab::Overview => html! {
            <>
                {section("Retention & Loyalty Overview")}
                <RetentionCohorts />
                <RetentionSummary />
                <HighRetentionTable />
                {section("🏆 Elite Gamers Directory")}
                <EliteGamersAnalytics />
                <EliteGamersTable />
            </>
        },
        DashboardTab::Lifecycle => html! {
            <>
                {section("User Acquisition & Activation")}
                <ActivationTrends />
                {section("Reactivation & Deactivation")}
                <ReactivationTrends />
                <DeactivationTrends />
            </>
        },
        DashboardTab::Engagement => html! {
            <>
                {section("Cross-Game Engagement")}
                <CrossGameEngagement />
                {section("Games Played Distribution")}
                <GamesPlayedDistribution />
            </>
        },
        DashboardTab::Activity => html! {
            <>
                {section("Total Activity Metrics")}
                <TotalActivity />
                {section("Daily Activity Trends")}
                <DailyActivityTrends />
                {section("User Activity Log")}
                <UserActivityLog />
            </>
        },
        DashboardTab::Predictions => html! {
            <>
                <MlDataScope />
                {section("Churn Risk Predictions")}
                <ChurnRiskOverview />
                {section("High Risk Users")}
                <HighRiskInterventions />
                {section("Churn Analysis by Game")}
                <GameChurnAnalysis />
                {section("Model Leaderboard")}
                <ModelLeaderboardPanel />
                {section("ML Model Performance")}
                <ModelPerformance />
            </>
        },
    }
}

/// Analytics dashboard. Only the active tab is mounted.
#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    use_page_title("Dashboard | Solana Gaming Analytics");
    let active = use_state(|| DashboardTab::Overview);

    let on_select = {
        let active = active.clone();
        Callback::from(move |index: usize| {
            let tab = DashboardTab::from_index(index);
            debug!("Switching dashboard tab to {:?}", tab);
            active.set(tab);
        })
    };

    let labels: Vec<AttrValue> = DashboardTab::ALL.iter().map(|t| AttrValue::from(t.label())).collect();

    html! {
        <div class="dashboard-page">
            <LiveTicker />
            <div class="container mx-auto px-4 py-8">
                <Methodology />
                <EliteScroller />
                <GlassCard title="Ecosystem Overview">
                    <GlobalKpis />
                </GlassCard>
                <LiveAlerts />
                <Tabs labels={labels} active={active.index()} {on_select} />
                { tab_content(*active) }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_index_round_trip_and_fallback() {
        for tab in DashboardTab::ALL {
            assert_eq!(DashboardTab::from_index(tab.index()), tab);
        }
        assert_eq!(DashboardTab::from_index(42), DashboardTab::Overview);
    }
}
