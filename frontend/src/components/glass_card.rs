use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct GlassCardProps {
    #[prop_or_default]
    pub title: Option<AttrValue>,
    #[prop_or_default]
    pub subtitle: Option<AttrValue>,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

/// Frosted panel wrapping one dashboard feature.
#[function_component(GlassCard)]
pub fn glass_card(props: &GlassCardProps) -> Html {
    html! {
        <section class={classes!("glass-card", "rounded-2xl", "bg-slate-900/60", "border", "border-white/10", "p-6", "mb-6", props.class.clone())}>
            if let Some(title) = &props.title {
                <header class="mb-4">
                    <h2 class="text-xl font-semibold text-white">{title.clone()}</h2>
                    if let Some(subtitle) = &props.subtitle {
                        <p class="text-sm text-slate-400">{subtitle.clone()}</p>
                    }
                </header>
            }
            {props.children.clone()}
        </section>
    }
}
