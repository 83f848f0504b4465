//! App-wide yewdux store.
//!
//! # Design
//! - One store holds the session mirror, the discovery controller and the filter form.
//! - Reducers here are plain functions so session sync is testable without a DOM.

use crate::core::auth::AuthSession;
use crate::features::discovery::controller::DiscoveryController;
use crate::features::discovery::filters::FilterForm;
use crate::features::discovery::state::DiscoveryEffect;
use yewdux::store::Store;

/// Global application store.
#[derive(Clone, Debug, Default, PartialEq, Store)]
pub struct AppStore {
    /// Mirror of the persisted auth token.
    pub session: AuthSession,
    /// Discovery page controller.
    pub discovery: DiscoveryController,
    /// Advanced filter form.
    pub filters: FilterForm,
}

/// Copy a session snapshot into the store and let the controller follow it.
pub fn sync_session(store: &mut AppStore, session: AuthSession) -> Vec<DiscoveryEffect> {
    let logged_in = session.logged_in();
    store.session = session;
    store.discovery.set_logged_in(logged_in)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AUTH_TOKEN_KEY;
    use crate::features::discovery::state::{PrimaryRequest, ViewMode};

    #[test]
    fn losing_the_session_leaves_my_events() {
        let mut store = AppStore::default();
        sync_session(&mut store, AuthSession::from_token(Some("jwt")));
        assert!(store.discovery.logged_in());
        store.discovery.select_view(ViewMode::Mine);

        let mut session = store.session.clone();
        session.apply_storage_change(Some(AUTH_TOKEN_KEY), None);
        let effects = sync_session(&mut store, session);

        assert!(!store.session.logged_in());
        assert_eq!(store.discovery.mode(), ViewMode::All);
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn deep_linked_my_events_load_once_session_arrives() {
        let mut store = AppStore::default();
        assert!(store.discovery.initial_load(Some(ViewMode::Mine)).is_empty());
        assert!(store.discovery.error().is_some());

        let effects = sync_session(&mut store, AuthSession::from_token(Some("jwt")));

        assert!(store.discovery.logged_in());
        assert_eq!(store.discovery.mode(), ViewMode::Mine);
        assert_eq!(store.discovery.error(), None);
        assert!(store.discovery.loading());
        assert!(matches!(
            effects.as_slice(),
            [DiscoveryEffect::FetchPrimary {
                request: PrimaryRequest::MyEvents,
                ..
            }]
        ));
    }

    #[test]
    fn login_elsewhere_does_not_refetch_the_catalogue() {
        let mut store = AppStore::default();
        store.discovery.initial_load(None);
        assert!(sync_session(&mut store, AuthSession::from_token(Some("jwt"))).is_empty());
    }

    #[test]
    fn unchanged_session_emits_nothing() {
        let mut store = AppStore::default();
        assert!(sync_session(&mut store, AuthSession::from_token(None)).is_empty());
    }
}
