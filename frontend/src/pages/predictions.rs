use yew::prelude::*;

use crate::features::ml::churn_by_game::GameChurnAnalysis;
use crate::features::ml::churn_predictions::ChurnRiskOverview;
use crate::features::ml::high_risk_users::HighRiskInterventions;
use crate::features::ml::model_info::ModelPerformance;
use crate::features::ml::model_leaderboard::ModelLeaderboardPanel;
use crate::hooks::use_page_title;

#[function_component(Predictions)]
pub fn predictions() -> Html {
    use_page_title("Predictions | Solana Gaming Analytics");

    html! {
        <div class="predictions-page container mx-auto px-4 py-8">
            <header class="mb-10">
                <h1 class="text-4xl font-black text-white">{"Predictive Intelligence"}</h1>
                <p class="mt-2 text-slate-400">
                    {"AI-powered insights forecasting user churn and ecosystem health using ensemble models."}
                </p>
            </header>

            <h2 class="mb-4 text-2xl font-bold text-white">{"Churn Risk Analysis"}</h2>
            <ChurnRiskOverview />
            <GameChurnAnalysis />

            <h2 class="mt-10 mb-4 text-2xl font-bold text-white">{"High Priority Interventions"}</h2>
            <HighRiskInterventions />

            <h2 class="mt-10 mb-4 text-2xl font-bold text-white">{"Model Performance & Specs"}</h2>
            <ModelLeaderboardPanel />
            <ModelPerformance />
        </div>
    }
}
