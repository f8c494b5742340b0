use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LiveIndicatorProps {
    #[prop_or(true)]
    pub online: bool,
    #[prop_or(AttrValue::from("LIVE"))]
    pub label: AttrValue,
}

#[function_component(LiveIndicator)]
pub fn live_indicator(props: &LiveIndicatorProps) -> Html {
    let dot = if props.online { "bg-emerald-400 animate-pulse" } else { "bg-red-500" };
    html! {
        <span class="live-indicator inline-flex items-center gap-2 text-xs font-semibold text-slate-200">
            <span class={classes!("inline-block", "h-2", "w-2", "rounded-full", dot)}></span>
            {props.label.clone()}
        </span>
    }
}
