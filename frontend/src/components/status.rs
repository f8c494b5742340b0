use chrono::{DateTime, Utc};
use shared::{ApiError, Phase, RefreshState};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoadingStateProps {
    #[prop_or(AttrValue::from("Loading data..."))]
    pub label: AttrValue,
}

#[function_component(LoadingState)]
pub fn loading_state(props: &LoadingStateProps) -> Html {
    html! {
        <div class="loading-state flex items-center justify-center py-12 text-slate-400">
            <div class="spinner mr-3"></div>
            <span>{props.label.clone()}</span>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ErrorBannerProps {
    pub error: ApiError,
    #[prop_or_default]
    pub title: Option<AttrValue>,
}

#[function_component(ErrorBanner)]
pub fn error_banner(props: &ErrorBannerProps) -> Html {
    html! {
        <div class="error-banner rounded-lg border border-red-500/40 bg-red-500/10 p-4 text-red-200" role="alert">
            if let Some(title) = &props.title {
                <p class="font-semibold">{title.clone()}</p>
            }
            <p>{props.error.user_message()}</p>
            <p class="text-xs text-red-300/70 mt-1">{props.error.to_string()}</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct EmptyStateProps {
    #[prop_or(AttrValue::from("No data available"))]
    pub message: AttrValue,
}

#[function_component(EmptyState)]
pub fn empty_state(props: &EmptyStateProps) -> Html {
    html! {
        <div class="empty-state py-10 text-center text-slate-400">{props.message.clone()}</div>
    }
}

#[derive(Properties, PartialEq)]
pub struct StaleBannerProps {
    pub error: ApiError,
    pub last_update: Option<DateTime<Utc>>,
}

/// Shown above data that survived a failed refresh.
#[function_component(StaleBanner)]
pub fn stale_banner(props: &StaleBannerProps) -> Html {
    let since = props
        .last_update
        .map(|at| format!(" Showing data from {}.", at.format("%b %-d, %H:%M UTC")))
        .unwrap_or_default();
    html! {
        <div class="stale-banner rounded-md bg-amber-500/10 px-3 py-2 text-xs text-amber-200 mb-3">
            {format!("Refresh failed: {}.{}", props.error.user_message(), since)}
        </div>
    }
}

/// Renders loading, error, empty or ready content for a polled feature.
///
/// `is_empty` decides whether loaded data still deserves the empty state.
pub fn phase_view<T, E, B>(state: &RefreshState<T>, title: &str, is_empty: E, body: B) -> Html
where
    E: Fn(&T) -> bool,
    B: FnOnce(&T) -> Html,
{
    match state.phase() {
        Phase::Loading => html! { <LoadingState label={format!("Loading {}...", title)} /> },
        Phase::Failed(error) => html! {
            <ErrorBanner error={error.clone()} title={AttrValue::from(format!("Could not load {}", title))} />
        },
        Phase::Ready { data, stale } => {
            let stale = stale.map(|error| html! {
                <StaleBanner error={error.clone()} last_update={state.last_update} />
            });
            if is_empty(data) {
                html! { <>{for stale}<EmptyState /></> }
            } else {
                html! { <>{for stale}{body(data)}</> }
            }
        }
    }
}
