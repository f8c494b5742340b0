use std::rc::Rc;

use shared::table::DEFAULT_PAGE_SIZE;
use shared::{TableRow, TableState, TableView};
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// One table column. Without a renderer the cell shows the row's field value.
pub struct Column<R> {
    pub key: &'static str,
    pub label: &'static str,
    pub render: Option<Rc<dyn Fn(&R) -> Html>>,
}

impl<R> Column<R> {
    pub fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label, render: None }
    }

    pub fn with_render(mut self, render: impl Fn(&R) -> Html + 'static) -> Self {
        self.render = Some(Rc::new(render));
        self
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            label: self.label,
            render: self.render.clone(),
        }
    }
}

impl<R> PartialEq for Column<R> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.label == other.label
            && match (&self.render, &other.render) {
                (Some(a), Some(b)) => Rc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
    }
}

#[derive(Properties, PartialEq)]
pub struct DataTableProps<R: PartialEq + 'static> {
    pub rows: Rc<Vec<R>>,
    pub columns: Rc<Vec<Column<R>>>,
    #[prop_or(DEFAULT_PAGE_SIZE)]
    pub page_size: usize,
    #[prop_or(true)]
    pub searchable: bool,
    #[prop_or(AttrValue::from("Search..."))]
    pub placeholder: AttrValue,
}

/// Searchable, sortable, paginated table over any [`TableRow`].
#[function_component(DataTable)]
pub fn data_table<R>(props: &DataTableProps<R>) -> Html
where
    R: TableRow + PartialEq + 'static,
{
    let state = use_state(|| TableState::new(props.page_size));
    let view = TableView::build(props.rows.as_slice(), &state);

    let on_search = {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*state).clone();
            next.set_search(input.value());
            state.set(next);
        })
    };

    let on_prev = {
        let state = state.clone();
        let total_pages = view.total_pages;
        Callback::from(move |_: MouseEvent| {
            let mut next = (*state).clone();
            next.prev_page(total_pages);
            state.set(next);
        })
    };

    let on_next = {
        let state = state.clone();
        let total_pages = view.total_pages;
        Callback::from(move |_: MouseEvent| {
            let mut next = (*state).clone();
            next.next_page(total_pages);
            state.set(next);
        })
    };

    let on_show_all = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*state).clone();
            next.toggle_show_all();
            state.set(next);
        })
    };

    let header = props.columns.iter().map(|column| {
        let state = state.clone();
        let key = column.key;
        let onclick = Callback::from(move |_: MouseEvent| {
            let mut next = (*state).clone();
            next.toggle_sort(key);
            state.set(next);
        });
        let arrow = state.sort_arrow(key).unwrap_or("↕");
        html! {
            <th class="px-3 py-2 text-left cursor-pointer select-none whitespace-nowrap" {onclick}>
                {column.label}
                <span class="ml-1 text-slate-500">{arrow}</span>
            </th>
        }
    });

    let body = if view.is_empty() {
        html! {
            <tr>
                <td class="px-3 py-6 text-center text-slate-400" colspan={props.columns.len().to_string()}>
                    {"No records found"}
                </td>
            </tr>
        }
    } else {
        view.rows
            .iter()
            .map(|row| {
                html! {
                    <tr class="border-t border-white/5 hover:bg-white/5">
                        { for props.columns.iter().map(|column| html! {
                            <td class="px-3 py-2 whitespace-nowrap">
                                { match &column.render {
                                    Some(render) => render(*row),
                                    None => html! { {row.cell(column.key).to_string()} },
                                } }
                            </td>
                        }) }
                    </tr>
                }
            })
            .collect::<Html>()
    };

    html! {
        <div class="data-table">
            if props.searchable {
                <input
                    type="search"
                    class="mb-3 w-full rounded-lg bg-white/5 border border-white/10 px-3 py-2 text-sm"
                    placeholder={props.placeholder.clone()}
                    value={state.search.clone()}
                    oninput={on_search}
                />
            }
            <div class="overflow-x-auto">
                <table class="min-w-full text-sm text-slate-200">
                    <thead class="text-xs uppercase text-slate-400">
                        <tr>{ for header }</tr>
                    </thead>
                    <tbody>{ body }</tbody>
                </table>
            </div>
            <div class="flex items-center justify-between mt-3 text-xs text-slate-400">
                <span>
                    {format!("Showing {} to {} of {} entries", view.showing_from, view.showing_to, view.total)}
                </span>
                <div class="flex items-center gap-2">
                    if view.has_pager() {
                        <button class="px-2 py-1 rounded bg-white/5 disabled:opacity-40" disabled={view.page <= 1} onclick={on_prev}>
                            {"Previous"}
                        </button>
                        <span>{format!("Page {} of {}", view.page, view.total_pages)}</span>
                        <button class="px-2 py-1 rounded bg-white/5 disabled:opacity-40" disabled={view.page >= view.total_pages} onclick={on_next}>
                            {"Next"}
                        </button>
                    }
                    if view.can_show_all {
                        <button class="px-2 py-1 rounded bg-purple-600/40" onclick={on_show_all}>
                            { if view.paged { "Show All" } else { "Show Pages" } }
                        </button>
                    }
                </div>
            </div>
        </div>
    }
}
