//! Shell context shared with components.
//!
//! # Design
//! - Create the API client, effect runner and session hub exactly once per boot.
//! - Components reach the shell through this context instead of globals.

use crate::app::effects::EffectRunner;
use crate::app::preferences::{LocalTokenStore, api_base_url};
use crate::core::auth::{AuthSession, SessionHub};
use crate::core::store::AppStore;
use crate::features::discovery::state::DiscoveryEffect;
use crate::services::api::ApiClient;
use std::rc::Rc;
use yew::platform::spawn_local;

#[derive(Clone, PartialEq)]
pub(crate) struct ShellCtx {
    pub(crate) runner: EffectRunner,
    pub(crate) hub: SessionHub,
}

impl ShellCtx {
    pub(crate) fn new() -> Self {
        let api = ApiClient::new(api_base_url(), Rc::new(LocalTokenStore));
        Self {
            runner: EffectRunner::new(Rc::new(api)),
            hub: SessionHub::new(AuthSession::from_store(&LocalTokenStore)),
        }
    }

    /// Reduce the store and run the resulting effects.
    pub(crate) fn dispatch(&self, reduce: impl FnOnce(&mut AppStore) -> Vec<DiscoveryEffect>) {
        self.runner.dispatch(reduce);
    }

    /// Fetch the profile if this login period has not fetched it yet.
    pub(crate) fn ensure_profile(&self) {
        let Some(ticket) = self.hub.update(AuthSession::begin_profile_fetch) else {
            return;
        };
        let hub = self.hub.clone();
        let api = self.runner.api();
        spawn_local(async move {
            let result = api.user_info().await;
            hub.update(|session| session.apply_profile(ticket, result));
        });
    }

    pub(crate) fn logout(&self) {
        self.hub.update(|session| session.logout(&LocalTokenStore));
    }
}
