use std::cell::Cell;
use std::rc::Rc;

use chrono::Utc;
use gloo_timers::callback::Interval;
use log::debug;
use shared::refresh::resolve_last_update;
use shared::{FromResponse, RefreshAction, RefreshState};
use wasm_bindgen_futures::spawn_local;
use yew::functional::use_reducer_eq;
use yew::prelude::*;

use crate::api;

/// Reducer wrapper so the framework-free state machine can drive a hook.
struct Polled<T>(RefreshState<T>);

impl<T> Default for Polled<T> {
    fn default() -> Self {
        Self(RefreshState::default())
    }
}

impl<T> PartialEq for Polled<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Reducible for Polled<T> {
    type Action = RefreshAction<T>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(Polled(self.0.apply(action)))
    }
}

/// Fetch `endpoint` on mount and again every `interval_ms` until unmount.
///
/// Completions that land after unmount are dropped. Requests already in
/// flight are not aborted.
#[hook]
pub fn use_auto_refresh<T>(endpoint: &'static str, interval_ms: u32) -> RefreshState<T>
where
    T: FromResponse + 'static,
{
    let state = use_reducer_eq(Polled::<T>::default);

    {
        let dispatcher = state.dispatcher();
        use_effect_with((endpoint, interval_ms), move |(endpoint, interval_ms)| {
            let endpoint = *endpoint;
            let alive = Rc::new(Cell::new(true));

            let poll = {
                let alive = alive.clone();
                move || {
                    let dispatcher = dispatcher.clone();
                    let alive = alive.clone();
                    dispatcher.dispatch(RefreshAction::Started);
                    spawn_local(async move {
                        let result = api::fetch::<T>(endpoint).await;
                        if !alive.get() {
                            debug!("Dropping response from {} after unmount", endpoint);
                            return;
                        }
                        match result {
                            Ok(data) => {
                                let last_update = resolve_last_update(data.last_updated(), Utc::now());
                                dispatcher.dispatch(RefreshAction::Loaded {
                                    data: Rc::new(data),
                                    last_update,
                                });
                            }
                            Err(e) => dispatcher.dispatch(RefreshAction::Failed(e)),
                        }
                    });
                }
            };

            poll();
            let interval = Interval::new(*interval_ms, poll);

            move || {
                alive.set(false);
                interval.cancel();
            }
        });
    }

    state.0.clone()
}
