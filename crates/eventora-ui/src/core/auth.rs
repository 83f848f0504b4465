//! Auth session mirror shared across views.
//!
//! # Design
//! - The persisted token is the source of truth; this module only mirrors it.
//! - Other tabs may write or clear the token at any time, so every change arrives
//!   as a storage notification and is applied as plain data.
//! - Profile fetches are ticketed: one fetch per logged-in period, late replies dropped.
//! - `SessionHub` is the process-wide publish/subscribe point; subscriptions
//!   detach when their guard is dropped.

use crate::core::config::AUTH_TOKEN_KEY;
use crate::core::error::ApiResult;
use eventora_api_models::UserInfo;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

/// Access to the persisted bearer token.
pub trait TokenStore {
    /// Read the current token, if any.
    fn load_token(&self) -> Option<String>;
    /// Remove the token.
    fn clear_token(&self);
}

/// Ticket identifying one profile fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProfileTicket(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
enum ProfileFetch {
    #[default]
    Idle,
    InFlight(u64),
    Settled,
}

/// Outcome of applying a storage notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionChange {
    /// Nothing observable changed.
    Unchanged,
    /// A token appeared.
    LoggedIn,
    /// The token was removed.
    LoggedOut,
}

/// In-memory view of the persisted auth state.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct AuthSession {
    logged_in: bool,
    profile: Option<UserInfo>,
    fetch: ProfileFetch,
    fetch_seq: u64,
}

impl AuthSession {
    /// Build a session from a raw token value; blank tokens count as absent.
    #[must_use]
    pub fn from_token(token: Option<&str>) -> Self {
        Self {
            logged_in: has_token(token),
            ..Self::default()
        }
    }

    /// Build a session from whatever token is currently persisted.
    #[must_use]
    pub fn from_store(store: &dyn TokenStore) -> Self {
        Self::from_token(store.load_token().as_deref())
    }

    /// Whether a token is present.
    #[must_use]
    pub const fn logged_in(&self) -> bool {
        self.logged_in
    }

    /// Cached profile, once fetched.
    #[must_use]
    pub const fn profile(&self) -> Option<&UserInfo> {
        self.profile.as_ref()
    }

    /// Apply a cross-tab storage notification.
    ///
    /// `key` is `None` when the other tab cleared the whole storage area.
    pub fn apply_storage_change(
        &mut self,
        key: Option<&str>,
        new_value: Option<&str>,
    ) -> SessionChange {
        match key {
            Some(AUTH_TOKEN_KEY) => self.set_logged_in(has_token(new_value)),
            Some(_) => SessionChange::Unchanged,
            None => self.set_logged_in(false),
        }
    }

    /// Claim the single profile fetch allowed for this logged-in period.
    pub const fn begin_profile_fetch(&mut self) -> Option<ProfileTicket> {
        if !self.logged_in || !matches!(self.fetch, ProfileFetch::Idle) {
            return None;
        }
        self.fetch_seq += 1;
        self.fetch = ProfileFetch::InFlight(self.fetch_seq);
        Some(ProfileTicket(self.fetch_seq))
    }

    /// Apply a profile response. Late replies from an earlier session are ignored.
    pub fn apply_profile(&mut self, ticket: ProfileTicket, result: ApiResult<UserInfo>) {
        if self.fetch != ProfileFetch::InFlight(ticket.0) {
            tracing::debug!(ticket = ticket.0, "dropping stale profile response");
            return;
        }
        self.fetch = ProfileFetch::Settled;
        match result {
            Ok(profile) => self.profile = Some(profile),
            Err(err) => {
                tracing::warn!(error = %err, status = ?err.status(), "profile fetch failed");
                self.profile = None;
            }
        }
    }

    /// Clear the persisted token and forget the profile.
    pub fn logout(&mut self, store: &dyn TokenStore) -> SessionChange {
        store.clear_token();
        self.set_logged_in(false)
    }

    fn set_logged_in(&mut self, logged_in: bool) -> SessionChange {
        if self.logged_in == logged_in {
            return SessionChange::Unchanged;
        }
        self.logged_in = logged_in;
        self.fetch = ProfileFetch::Idle;
        if logged_in {
            SessionChange::LoggedIn
        } else {
            self.profile = None;
            SessionChange::LoggedOut
        }
    }
}

fn has_token(token: Option<&str>) -> bool {
    token.is_some_and(|value| !value.trim().is_empty())
}

type Listener = Rc<dyn Fn(&AuthSession)>;

struct HubInner {
    session: AuthSession,
    listeners: BTreeMap<u64, Listener>,
    next_id: u64,
}

/// Process-wide session holder with change subscriptions.
#[derive(Clone)]
pub struct SessionHub {
    inner: Rc<RefCell<HubInner>>,
}

impl SessionHub {
    /// Wrap an initial session.
    #[must_use]
    pub fn new(session: AuthSession) -> Self {
        Self {
            inner: Rc::new(RefCell::new(HubInner {
                session,
                listeners: BTreeMap::new(),
                next_id: 0,
            })),
        }
    }

    /// Copy of the current session.
    #[must_use]
    pub fn snapshot(&self) -> AuthSession {
        self.inner.borrow().session.clone()
    }

    /// Register a listener called after every observable change.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, listener: impl Fn(&AuthSession) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.listeners.insert(id, Rc::new(listener));
        Subscription {
            id,
            hub: Rc::downgrade(&self.inner),
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Mutate the session and notify listeners when it changed.
    pub fn update<R>(&self, mutate: impl FnOnce(&mut AuthSession) -> R) -> R {
        let (result, changed) = {
            let mut inner = self.inner.borrow_mut();
            let before = inner.session.clone();
            let result = mutate(&mut inner.session);
            (result, inner.session != before)
        };
        if changed {
            self.notify();
        }
        result
    }

    fn notify(&self) {
        let (session, listeners): (AuthSession, Vec<Listener>) = {
            let inner = self.inner.borrow();
            (
                inner.session.clone(),
                inner.listeners.values().cloned().collect(),
            )
        };
        for listener in listeners {
            listener(&session);
        }
    }
}

impl PartialEq for SessionHub {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Guard returned by [`SessionHub::subscribe`]; unsubscribes on drop.
pub struct Subscription {
    id: u64,
    hub: Weak<RefCell<HubInner>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.hub.upgrade() {
            inner.borrow_mut().listeners.remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ApiError;
    use std::cell::Cell;

    #[derive(Default)]
    struct MemoryStore {
        token: RefCell<Option<String>>,
    }

    impl TokenStore for MemoryStore {
        fn load_token(&self) -> Option<String> {
            self.token.borrow().clone()
        }

        fn clear_token(&self) {
            self.token.borrow_mut().take();
        }
    }

    fn profile(name: &str) -> UserInfo {
        UserInfo {
            display_name: Some(name.to_string()),
            email: Some(format!("{name}@example.org")),
            ..UserInfo::default()
        }
    }

    #[test]
    fn initial_state_follows_persisted_token() {
        let store = MemoryStore::default();
        assert!(!AuthSession::from_store(&store).logged_in());
        *store.token.borrow_mut() = Some("jwt".into());
        assert!(AuthSession::from_store(&store).logged_in());
        assert!(!AuthSession::from_token(Some("   ")).logged_in());
    }

    #[test]
    fn cross_tab_clear_logs_out_and_drops_profile() {
        let mut session = AuthSession::from_token(Some("jwt"));
        let ticket = session.begin_profile_fetch().unwrap();
        session.apply_profile(ticket, Ok(profile("ada")));
        assert!(session.profile().is_some());

        let change = session.apply_storage_change(Some(AUTH_TOKEN_KEY), None);
        assert_eq!(change, SessionChange::LoggedOut);
        assert!(!session.logged_in());
        assert!(session.profile().is_none());
    }

    #[test]
    fn unrelated_keys_are_ignored_and_full_clear_logs_out() {
        let mut session = AuthSession::from_token(Some("jwt"));
        assert_eq!(
            session.apply_storage_change(Some("eventora.theme"), None),
            SessionChange::Unchanged
        );
        assert!(session.logged_in());
        assert_eq!(
            session.apply_storage_change(None, None),
            SessionChange::LoggedOut
        );
    }

    #[test]
    fn profile_is_fetched_once_per_login() {
        let mut session = AuthSession::from_token(None);
        assert!(session.begin_profile_fetch().is_none());

        assert_eq!(
            session.apply_storage_change(Some(AUTH_TOKEN_KEY), Some("jwt")),
            SessionChange::LoggedIn
        );
        let ticket = session.begin_profile_fetch().unwrap();
        assert!(session.begin_profile_fetch().is_none());
        session.apply_profile(ticket, Ok(profile("ada")));
        assert!(session.begin_profile_fetch().is_none());

        session.apply_storage_change(Some(AUTH_TOKEN_KEY), None);
        session.apply_storage_change(Some(AUTH_TOKEN_KEY), Some("jwt2"));
        assert!(session.begin_profile_fetch().is_some());
    }

    #[test]
    fn profile_failure_leaves_profile_absent() {
        let mut session = AuthSession::from_token(Some("jwt"));
        let ticket = session.begin_profile_fetch().unwrap();
        session.apply_profile(ticket, Err(ApiError::transport("offline")));
        assert!(session.logged_in());
        assert!(session.profile().is_none());
        assert!(session.begin_profile_fetch().is_none());
    }

    #[test]
    fn late_profile_from_previous_login_is_dropped() {
        let mut session = AuthSession::from_token(Some("jwt"));
        let stale = session.begin_profile_fetch().unwrap();
        session.apply_storage_change(Some(AUTH_TOKEN_KEY), None);
        session.apply_storage_change(Some(AUTH_TOKEN_KEY), Some("jwt"));
        let fresh = session.begin_profile_fetch().unwrap();

        session.apply_profile(stale, Ok(profile("old")));
        assert!(session.profile().is_none());
        session.apply_profile(fresh, Ok(profile("new")));
        assert_eq!(
            session.profile().and_then(|p| p.display_name.as_deref()),
            Some("new")
        );
    }

    #[test]
    fn logout_clears_store() {
        let store = MemoryStore::default();
        *store.token.borrow_mut() = Some("jwt".into());
        let mut session = AuthSession::from_store(&store);
        assert_eq!(session.logout(&store), SessionChange::LoggedOut);
        assert!(store.load_token().is_none());
    }

    #[test]
    fn hub_notifies_subscribers_until_dropped() {
        let hub = SessionHub::new(AuthSession::from_token(Some("jwt")));
        let seen = Rc::new(Cell::new(0));
        let subscription = {
            let seen = seen.clone();
            hub.subscribe(move |session| {
                if !session.logged_in() {
                    seen.set(seen.get() + 1);
                }
            })
        };
        assert_eq!(hub.listener_count(), 1);

        hub.update(|session| session.apply_storage_change(Some(AUTH_TOKEN_KEY), None));
        assert_eq!(seen.get(), 1);

        hub.update(|session| session.apply_storage_change(Some("other"), None));
        assert_eq!(seen.get(), 1);

        drop(subscription);
        assert_eq!(hub.listener_count(), 0);
        hub.update(|session| session.apply_storage_change(Some(AUTH_TOKEN_KEY), Some("x")));
        hub.update(|session| session.apply_storage_change(Some(AUTH_TOKEN_KEY), None));
        assert_eq!(seen.get(), 1);
    }
}
