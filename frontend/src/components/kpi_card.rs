use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct KpiCardProps {
    pub label: AttrValue,
    pub value: AttrValue,
    #[prop_or_default]
    pub hint: Option<AttrValue>,
    #[prop_or_default]
    pub icon: Option<AttrValue>,
    /// Accent colour class, e.g. `text-emerald-400`
    #[prop_or(AttrValue::from("text-white"))]
    pub tone: AttrValue,
}

#[function_component(KpiCard)]
pub fn kpi_card(props: &KpiCardProps) -> Html {
    html! {
        <div class="kpi-card rounded-xl bg-white/5 border border-white/10 p-4">
            <div class="flex items-center justify-between text-xs uppercase tracking-wide text-slate-400">
                <span>{props.label.clone()}</span>
                if let Some(icon) = &props.icon {
                    <span class="text-lg">{icon.clone()}</span>
                }
            </div>
            <div class={classes!("kpi-value", "text-2xl", "font-bold", "mt-2", props.tone.to_string())}>
                {props.value.clone()}
            </div>
            if let Some(hint) = &props.hint {
                <div class="text-xs text-slate-500 mt-1">{hint.clone()}</div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct KpiGridProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(KpiGrid)]
pub fn kpi_grid(props: &KpiGridProps) -> Html {
    html! {
        <div class="kpi-grid grid grid-cols-2 lg:grid-cols-4 gap-4 mb-6">
            {props.children.clone()}
        </div>
    }
}
