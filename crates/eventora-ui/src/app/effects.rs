//! Executes controller effects against the browser.
//!
//! # Design
//! - One debounce timer lives in the runner; replacing it drops (cancels) the old one.
//! - Requests run on `spawn_local`; their responses are reduced into the store and any
//!   follow-up effects are run the same way.

use crate::core::store::AppStore;
use crate::features::discovery::api::{EventsApi, execute};
use crate::features::discovery::state::DiscoveryEffect;
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use yew::platform::spawn_local;
use yewdux::prelude::Dispatch;

#[derive(Clone)]
pub(crate) struct EffectRunner {
    api: Rc<dyn EventsApi>,
    dispatch: Dispatch<AppStore>,
    search_timer: Rc<RefCell<Option<Timeout>>>,
}

impl PartialEq for EffectRunner {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.search_timer, &other.search_timer)
    }
}

impl EffectRunner {
    pub(crate) fn new(api: Rc<dyn EventsApi>) -> Self {
        Self {
            api,
            dispatch: Dispatch::<AppStore>::new(),
            search_timer: Rc::new(RefCell::new(None)),
        }
    }

    pub(crate) fn api(&self) -> Rc<dyn EventsApi> {
        self.api.clone()
    }

    /// Apply `reduce` to the store and run whatever it asks for.
    pub(crate) fn dispatch(&self, reduce: impl FnOnce(&mut AppStore) -> Vec<DiscoveryEffect>) {
        let mut effects = Vec::new();
        self.dispatch.reduce_mut(|store| {
            effects = reduce(store);
        });
        self.run(effects);
    }

    pub(crate) fn run(&self, effects: Vec<DiscoveryEffect>) {
        for effect in effects {
            match effect {
                DiscoveryEffect::ScheduleSearch {
                    generation,
                    delay_ms,
                } => {
                    let runner = self.clone();
                    let timeout = Timeout::new(delay_ms, move || {
                        runner.dispatch(|store| store.discovery.search_timer_fired(generation));
                    });
                    if let Some(previous) = self.search_timer.borrow_mut().take() {
                        drop(previous);
                    }
                    *self.search_timer.borrow_mut() = Some(timeout);
                }
                DiscoveryEffect::CancelSearch => {
                    if let Some(previous) = self.search_timer.borrow_mut().take() {
                        drop(previous);
                    }
                }
                request => {
                    let runner = self.clone();
                    spawn_local(async move {
                        if let Some(response) = execute(runner.api.as_ref(), request).await {
                            runner.dispatch(|store| store.discovery.apply_response(response));
                        }
                    });
                }
            }
        }
    }
}
