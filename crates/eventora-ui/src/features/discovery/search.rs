//! Debounced free-text search.
//!
//! # Design
//! - Every keystroke bumps a generation counter; timers carry the generation they were armed with.
//! - A fired timer turns into a ticket holding the captured query.
//! - Responses are accepted only while both the generation and the query still match.

use crate::core::config::DiscoveryConfig;
use eventora_api_models::EventSearchParams;

/// Free-text search fragments.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Event title fragment.
    pub event_name: String,
    /// Organiser name fragment.
    pub organizer_name: String,
}

impl SearchQuery {
    /// Build a query from both fragments.
    #[must_use]
    pub fn new(event_name: impl Into<String>, organizer_name: impl Into<String>) -> Self {
        Self {
            event_name: event_name.into(),
            organizer_name: organizer_name.into(),
        }
    }

    /// Whether both fragments are empty after trimming.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.event_name.trim().is_empty() && self.organizer_name.trim().is_empty()
    }

    /// Query parameters for the search endpoint.
    #[must_use]
    pub fn to_params(&self, mine: bool, config: &DiscoveryConfig) -> EventSearchParams {
        EventSearchParams {
            event_name: self.event_name.trim().to_string(),
            organizer_name: self.organizer_name.trim().to_string(),
            is_my_event_list: mine,
            page: config.search_page,
            size: config.search_page_size,
        }
    }
}

/// Identity of one executed search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchTicket {
    /// Generation the timer was armed with.
    pub generation: u64,
    /// Query captured when the timer fired.
    pub query: SearchQuery,
}

/// Generation-counting debouncer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchDebouncer {
    generation: u64,
    pending: bool,
}

impl SearchDebouncer {
    /// Current generation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a timer is armed and has not fired yet.
    #[must_use]
    pub const fn pending(&self) -> bool {
        self.pending
    }

    /// Record new input and return the generation the replacement timer must carry.
    pub const fn input(&mut self) -> u64 {
        self.generation += 1;
        self.pending = true;
        self.generation
    }

    /// Invalidate the pending timer and any in-flight search.
    ///
    /// Returns whether a timer was still armed.
    pub const fn cancel(&mut self) -> bool {
        let was_pending = self.pending;
        self.generation += 1;
        self.pending = false;
        was_pending
    }

    /// Turn a fired timer into a ticket.
    ///
    /// Stale timers and blank queries produce no ticket.
    pub fn fire(&mut self, generation: u64, query: &SearchQuery) -> Option<SearchTicket> {
        if generation != self.generation || !self.pending {
            return None;
        }
        self.pending = false;
        if query.is_blank() {
            return None;
        }
        Some(SearchTicket {
            generation,
            query: query.clone(),
        })
    }

    /// Whether a response for `ticket` still describes the current input.
    #[must_use]
    pub fn accepts(&self, ticket: &SearchTicket, current: &SearchQuery) -> bool {
        ticket.generation == self.generation && &ticket.query == current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_latest_timer_fires() {
        let mut debouncer = SearchDebouncer::default();
        let first = debouncer.input();
        let second = debouncer.input();
        let query = SearchQuery::new("jazz", "");

        assert!(debouncer.fire(first, &query).is_none());
        let ticket = debouncer.fire(second, &query).unwrap();
        assert_eq!(ticket.query.event_name, "jazz");
        assert!(!debouncer.pending());
        assert!(debouncer.fire(second, &query).is_none());
    }

    #[test]
    fn blank_query_fires_nothing() {
        let mut debouncer = SearchDebouncer::default();
        let generation = debouncer.input();
        assert!(debouncer.fire(generation, &SearchQuery::new("  ", "\t")).is_none());
        assert!(!debouncer.pending());
    }

    #[test]
    fn responses_are_guarded_by_generation_and_query() {
        let mut debouncer = SearchDebouncer::default();
        let generation = debouncer.input();
        let query = SearchQuery::new("jazz", "");
        let ticket = debouncer.fire(generation, &query).unwrap();

        assert!(debouncer.accepts(&ticket, &query));
        assert!(!debouncer.accepts(&ticket, &SearchQuery::new("jazz", "blue note")));

        debouncer.cancel();
        assert!(!debouncer.accepts(&ticket, &query));
    }

    #[test]
    fn cancel_reports_armed_timer() {
        let mut debouncer = SearchDebouncer::default();
        assert!(!debouncer.cancel());
        debouncer.input();
        assert!(debouncer.cancel());
    }

    #[test]
    fn params_trim_fragments_and_use_paging_defaults() {
        let params =
            SearchQuery::new(" jazz ", "").to_params(true, &DiscoveryConfig::default());
        assert_eq!(params.event_name, "jazz");
        assert!(params.is_my_event_list);
        assert_eq!((params.page, params.size), (0, 10));
    }
}
