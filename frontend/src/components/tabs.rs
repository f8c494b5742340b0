use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TabsProps {
    pub labels: Vec<AttrValue>,
    pub active: usize,
    pub on_select: Callback<usize>,
}

#[function_component(Tabs)]
pub fn tabs(props: &TabsProps) -> Html {
    html! {
        <nav class="tabs flex flex-wrap gap-2 mb-6" role="tablist">
            { for props.labels.iter().enumerate().map(|(index, label)| {
                let on_select = props.on_select.clone();
                let selected = index == props.active;
                let onclick = Callback::from(move |_: MouseEvent| on_select.emit(index));
                html! {
                    <button
                        role="tab"
                        aria-selected={selected.to_string()}
                        class={classes!(
                            "tab", "px-4", "py-2", "rounded-lg", "text-sm", "font-medium",
                            if selected { "bg-purple-600 text-white" } else { "bg-white/5 text-slate-300 hover:bg-white/10" }
                        )}
                        {onclick}
                    >
                        {label.clone()}
                    </button>
                }
            }) }
        </nav>
    }
}
