//! Discovery view controller.
//!
//! # Design
//! - A synchronous state machine: user actions and responses go in, effects come out.
//! - The baseline list holds the last recommendation, filter or my-events result; the
//!   displayed list is derived from it and the current search results.
//! - Primary fetches are latest-wins; searches are guarded by generation and captured query.
//! - A primary failure is visible and clears the list; a search failure is silent.

use crate::core::config::DiscoveryConfig;
use crate::core::error::ApiResult;
use crate::features::discovery::likes::{LikeSettlement, LikeTicket, LikeToggler};
use crate::features::discovery::quick_filter::QuickFilterSelector;
use crate::features::discovery::search::{SearchDebouncer, SearchQuery, SearchTicket};
use crate::features::discovery::state::{
    DiscoveryEffect, HighlightStats, PrimaryRequest, PrimaryTicket, ViewMode, ViewState,
    WatchlistState, WatchlistTicket,
};
use eventora_api_models::{EventCategory, EventFilterRequest, EventId, EventPage, EventSummary};
use std::collections::BTreeSet;

/// Error shown when "My events" is opened without a session.
pub const LOGIN_REQUIRED_MESSAGE: &str = "You must be logged in to view your events.";
/// Fallback shown when the watchlist cannot be loaded.
pub const WATCHLIST_ERROR_MESSAGE: &str = "Failed to load watchlist";
/// Notice shown after a like or unlike was rolled back.
pub const LIKE_FAILED_NOTICE: &str = "Could not update your watchlist.";

/// Orchestrates every list on the discovery page.
#[derive(Clone, Debug, PartialEq)]
pub struct DiscoveryController {
    config: DiscoveryConfig,
    view: ViewState,
    events: Vec<EventSummary>,
    search_results: Option<Vec<EventSummary>>,
    loading: bool,
    searching: bool,
    error: Option<String>,
    notice: Option<String>,
    watchlist: WatchlistState,
    logged_in: bool,
    primary_seq: u64,
    watchlist_seq: u64,
    debouncer: SearchDebouncer,
    likes: LikeToggler,
}

impl Default for DiscoveryController {
    fn default() -> Self {
        Self::new(DiscoveryConfig::default(), false)
    }
}

impl DiscoveryController {
    /// Fresh controller in the global view.
    #[must_use]
    pub fn new(config: DiscoveryConfig, logged_in: bool) -> Self {
        Self {
            config,
            view: ViewState::default(),
            events: Vec::new(),
            search_results: None,
            loading: false,
            searching: false,
            error: None,
            notice: None,
            watchlist: WatchlistState::default(),
            logged_in,
            primary_seq: 0,
            watchlist_seq: 0,
            debouncer: SearchDebouncer::default(),
            likes: LikeToggler::default(),
        }
    }

    /// Active view.
    #[must_use]
    pub const fn view(&self) -> &ViewState {
        &self.view
    }

    /// Active mode tag.
    #[must_use]
    pub const fn mode(&self) -> ViewMode {
        self.view.mode()
    }

    /// List to render: search results when a search resolved, otherwise the baseline.
    #[must_use]
    pub fn displayed(&self) -> &[EventSummary] {
        self.search_results.as_deref().unwrap_or(&self.events)
    }

    /// Last primary result.
    #[must_use]
    pub fn baseline(&self) -> &[EventSummary] {
        &self.events
    }

    /// Whether search results currently own the display.
    #[must_use]
    pub const fn showing_search(&self) -> bool {
        self.search_results.is_some()
    }

    /// Primary fetch in progress.
    #[must_use]
    pub const fn loading(&self) -> bool {
        self.loading
    }

    /// Search request in progress.
    #[must_use]
    pub const fn searching(&self) -> bool {
        self.searching
    }

    /// Primary load error.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Transient notice, e.g. after a rolled-back like.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Watchlist panel state.
    #[must_use]
    pub const fn watchlist(&self) -> &WatchlistState {
        &self.watchlist
    }

    /// Whether the controller believes a session exists.
    #[must_use]
    pub const fn logged_in(&self) -> bool {
        self.logged_in
    }

    /// Active chip.
    #[must_use]
    pub const fn quick_filter(&self) -> Option<EventCategory> {
        self.view.quick_filter()
    }

    /// Current search text, empty in the watchlist.
    #[must_use]
    pub fn search_query(&self) -> SearchQuery {
        self.view.search().cloned().unwrap_or_default()
    }

    /// Whether a like request for `event_id` is outstanding.
    #[must_use]
    pub fn like_pending(&self, event_id: EventId) -> bool {
        self.likes.in_flight(event_id)
    }

    /// Headline numbers over the baseline list.
    #[must_use]
    pub fn highlights(&self) -> HighlightStats {
        let cities: BTreeSet<String> = self
            .events
            .iter()
            .filter_map(|event| event.city.as_deref())
            .map(str::trim)
            .filter(|city| !city.is_empty())
            .map(str::to_string)
            .collect();
        HighlightStats {
            live_experiences: self.events.len(),
            attendees: self
                .events
                .iter()
                .map(|event| u64::from(event.attendees()))
                .sum(),
            cities: cities.len(),
        }
    }

    /// First load of the page. `restore` is the deep-linked mode, if any.
    pub fn initial_load(&mut self, restore: Option<ViewMode>) -> Vec<DiscoveryEffect> {
        if restore == Some(ViewMode::Mine) {
            self.view = ViewState::fresh(ViewMode::Mine);
            return self.load_mine();
        }
        let count = self.config.recommendation_count;
        vec![self.fetch_primary(PrimaryRequest::Recommendations { count })]
    }

    /// Switch tabs, clearing the chip and search text.
    pub fn select_view(&mut self, mode: ViewMode) -> Vec<DiscoveryEffect> {
        tracing::info!(mode = mode.label(), "switching discovery view");
        let mut effects = self.reset_search();
        self.view = ViewState::fresh(mode);
        match mode {
            ViewMode::All => {
                effects.push(self.fetch_primary(PrimaryRequest::Filter(
                    EventFilterRequest::default(),
                )));
            }
            ViewMode::Mine => effects.extend(self.load_mine()),
            ViewMode::Watchlist => {}
        }
        effects
    }

    /// Toggle a quick filter chip; always lands in the global view with no search.
    pub fn apply_quick_filter(&mut self, category: EventCategory) -> Vec<DiscoveryEffect> {
        let mut selector = match &self.view {
            ViewState::All { quick_filter, .. } => *quick_filter,
            ViewState::Mine { .. } | ViewState::Watchlist => QuickFilterSelector::default(),
        };
        let active = selector.toggle(category);
        let mut effects = self.reset_search();
        self.view = ViewState::All {
            quick_filter: selector,
            search: SearchQuery::default(),
        };
        let request =
            active.map_or_else(EventFilterRequest::default, EventFilterRequest::for_category);
        effects.push(self.fetch_primary(PrimaryRequest::Filter(request)));
        effects
    }

    /// Apply the advanced filter form; clears the chip and lands in the global view.
    pub fn apply_advanced_filters(&mut self, request: EventFilterRequest) -> Vec<DiscoveryEffect> {
        let mut effects = Vec::new();
        let search = match std::mem::take(&mut self.view) {
            ViewState::All { search, .. } => search,
            ViewState::Mine { search } => {
                // Results scoped to my events do not carry over to the catalogue.
                effects.extend(self.reset_search());
                if !search.is_blank() {
                    let generation = self.debouncer.input();
                    effects.push(self.schedule(generation));
                }
                search
            }
            ViewState::Watchlist => {
                effects.extend(self.reset_search());
                SearchQuery::default()
            }
        };
        self.view = ViewState::All {
            quick_filter: QuickFilterSelector::default(),
            search,
        };
        effects.push(self.fetch_primary(PrimaryRequest::Filter(request)));
        effects
    }

    /// Drop the chip and any advanced filter.
    pub fn clear_filters(&mut self) -> Vec<DiscoveryEffect> {
        self.apply_advanced_filters(EventFilterRequest::default())
    }

    /// Record new search text and re-arm the debounce timer.
    pub fn set_search(&mut self, query: SearchQuery) -> Vec<DiscoveryEffect> {
        let Some(current) = self.view.search_mut() else {
            return Vec::new();
        };
        if *current == query {
            return Vec::new();
        }
        let blank = query.is_blank();
        *current = query;
        if blank {
            return self.reset_search();
        }
        let generation = self.debouncer.input();
        vec![self.schedule(generation)]
    }

    /// Debounce timer elapsed.
    pub fn search_timer_fired(&mut self, generation: u64) -> Vec<DiscoveryEffect> {
        let query = self.search_query();
        let Some(ticket) = self.debouncer.fire(generation, &query) else {
            if generation == self.debouncer.generation() && query.is_blank() {
                self.search_results = None;
                self.searching = false;
            }
            return Vec::new();
        };
        self.searching = true;
        let params = query.to_params(self.mode() == ViewMode::Mine, &self.config);
        vec![DiscoveryEffect::Search { ticket, params }]
    }

    /// Apply a primary list response.
    pub fn apply_primary(
        &mut self,
        ticket: PrimaryTicket,
        result: ApiResult<Vec<EventSummary>>,
    ) -> Vec<DiscoveryEffect> {
        if ticket.seq != self.primary_seq {
            tracing::debug!(
                seq = ticket.seq,
                latest = self.primary_seq,
                "dropping stale primary response"
            );
            return Vec::new();
        }
        self.loading = false;
        match result {
            Ok(mut events) => {
                self.likes.overlay(&mut events);
                self.events = events;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    status = ?err.status(),
                    source = ?ticket.source,
                    "primary list failed"
                );
                self.error = Some(err.user_message(ticket.source.fallback_message()));
                self.events.clear();
            }
        }
        Vec::new()
    }

    /// Apply a search response.
    pub fn apply_search(
        &mut self,
        ticket: &SearchTicket,
        result: ApiResult<EventPage>,
    ) -> Vec<DiscoveryEffect> {
        if !self.debouncer.accepts(ticket, &self.search_query()) {
            tracing::debug!(generation = ticket.generation, "dropping stale search response");
            return Vec::new();
        }
        self.searching = false;
        match result {
            Ok(page) => {
                let mut events = page.content;
                self.likes.overlay(&mut events);
                self.search_results = Some(events);
            }
            Err(err) => {
                tracing::debug!(error = %err, "search failed; showing baseline");
                self.search_results = None;
            }
        }
        Vec::new()
    }

    /// Start a watchlist load.
    pub fn load_watchlist(&mut self) -> Vec<DiscoveryEffect> {
        if !self.logged_in {
            self.watchlist = WatchlistState::default();
            return Vec::new();
        }
        self.watchlist_seq += 1;
        self.watchlist.loading = true;
        self.watchlist.error = None;
        vec![DiscoveryEffect::FetchWatchlist {
            ticket: WatchlistTicket(self.watchlist_seq),
        }]
    }

    /// Apply a watchlist response.
    pub fn apply_watchlist(
        &mut self,
        ticket: WatchlistTicket,
        result: ApiResult<Vec<EventSummary>>,
    ) -> Vec<DiscoveryEffect> {
        if ticket.0 != self.watchlist_seq || !self.watchlist.loading {
            return Vec::new();
        }
        self.watchlist.loading = false;
        self.watchlist.loaded = true;
        match result {
            Ok(mut events) => {
                for event in &mut events {
                    event.is_liked = true;
                }
                self.likes.overlay_watchlist(&mut events);
                self.watchlist.events = events;
                self.watchlist.error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "watchlist load failed");
                self.watchlist.error = Some(err.user_message(WATCHLIST_ERROR_MESSAGE));
                self.watchlist.events.clear();
            }
        }
        Vec::new()
    }

    /// Optimistically like or unlike an event.
    pub fn toggle_like(&mut self, event_id: EventId, liked: bool) -> Vec<DiscoveryEffect> {
        if !self.logged_in {
            return Vec::new();
        }
        self.notice = None;
        let ticket = self.likes.toggle(
            event_id,
            liked,
            std::iter::once(&mut self.events).chain(self.search_results.as_mut()),
            &mut self.watchlist.events,
        );
        vec![DiscoveryEffect::Like { ticket }]
    }

    /// Apply a like/unlike response.
    pub fn apply_like(
        &mut self,
        ticket: LikeTicket,
        result: &ApiResult<()>,
    ) -> Vec<DiscoveryEffect> {
        let settlement = self.likes.settle(
            ticket,
            result,
            std::iter::once(&mut self.events).chain(self.search_results.as_mut()),
            &mut self.watchlist.events,
        );
        if matches!(settlement, LikeSettlement::RolledBack { .. }) {
            self.notice = Some(LIKE_FAILED_NOTICE.to_string());
        }
        Vec::new()
    }

    /// Hide the transient notice.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Follow the session. Losing it while in a personal view returns to the catalogue.
    pub fn set_logged_in(&mut self, logged_in: bool) -> Vec<DiscoveryEffect> {
        if self.logged_in == logged_in {
            return Vec::new();
        }
        self.logged_in = logged_in;
        if logged_in {
            // The page may have mounted before the session was known.
            if self.mode() == ViewMode::Mine
                && self.error.as_deref() == Some(LOGIN_REQUIRED_MESSAGE)
            {
                return self.load_mine();
            }
            return Vec::new();
        }
        self.watchlist = WatchlistState::default();
        if self.mode().requires_login() {
            return self.select_view(ViewMode::All);
        }
        Vec::new()
    }

    fn load_mine(&mut self) -> Vec<DiscoveryEffect> {
        if self.logged_in {
            return vec![self.fetch_primary(PrimaryRequest::MyEvents)];
        }
        self.primary_seq += 1;
        self.loading = false;
        self.events.clear();
        self.error = Some(LOGIN_REQUIRED_MESSAGE.to_string());
        Vec::new()
    }

    fn fetch_primary(&mut self, request: PrimaryRequest) -> DiscoveryEffect {
        self.primary_seq += 1;
        self.loading = true;
        self.error = None;
        DiscoveryEffect::FetchPrimary {
            ticket: PrimaryTicket {
                seq: self.primary_seq,
                source: request.source(),
            },
            request,
        }
    }

    fn reset_search(&mut self) -> Vec<DiscoveryEffect> {
        self.search_results = None;
        self.searching = false;
        if self.debouncer.cancel() {
            vec![DiscoveryEffect::CancelSearch]
        } else {
            Vec::new()
        }
    }

    const fn schedule(&self, generation: u64) -> DiscoveryEffect {
        DiscoveryEffect::ScheduleSearch {
            generation,
            delay_ms: self.config.search_debounce_ms,
        }
    }
}
