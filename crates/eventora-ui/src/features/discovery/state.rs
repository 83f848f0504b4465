//! Discovery view state, effects and tickets.
//!
//! # Design
//! - One discriminated `ViewState` replaces independent mode/chip/search flags.
//! - Every request leaves the controller as a `DiscoveryEffect` carrying a ticket.
//! - Tickets come back with the response so staleness is decided from data, not closures.

use crate::features::discovery::likes::LikeTicket;
use crate::features::discovery::quick_filter::QuickFilterSelector;
use crate::features::discovery::search::{SearchQuery, SearchTicket};
use eventora_api_models::{EventCategory, EventFilterRequest, EventSearchParams, EventSummary};

/// Which list the page shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Global catalogue.
    #[default]
    All,
    /// Events the user registered for.
    Mine,
    /// Liked events.
    Watchlist,
}

impl ViewMode {
    /// Every mode in tab order.
    pub const ALL: [Self; 3] = [Self::All, Self::Mine, Self::Watchlist];

    /// Tab label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All events",
            Self::Mine => "My events",
            Self::Watchlist => "Watchlist",
        }
    }

    /// Whether the mode needs a logged-in user.
    #[must_use]
    pub const fn requires_login(self) -> bool {
        matches!(self, Self::Mine | Self::Watchlist)
    }
}

/// Active view with the state that only exists inside it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewState {
    /// Global catalogue, optionally narrowed by a chip and a search.
    All {
        /// Category chip selection.
        quick_filter: QuickFilterSelector,
        /// Search text.
        search: SearchQuery,
    },
    /// Registered events, optionally searched.
    Mine {
        /// Search text.
        search: SearchQuery,
    },
    /// Liked events.
    Watchlist,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::fresh(ViewMode::All)
    }
}

impl ViewState {
    /// Entry state for `mode` with nothing selected.
    #[must_use]
    pub fn fresh(mode: ViewMode) -> Self {
        match mode {
            ViewMode::All => Self::All {
                quick_filter: QuickFilterSelector::default(),
                search: SearchQuery::default(),
            },
            ViewMode::Mine => Self::Mine {
                search: SearchQuery::default(),
            },
            ViewMode::Watchlist => Self::Watchlist,
        }
    }

    /// Mode tag.
    #[must_use]
    pub const fn mode(&self) -> ViewMode {
        match self {
            Self::All { .. } => ViewMode::All,
            Self::Mine { .. } => ViewMode::Mine,
            Self::Watchlist => ViewMode::Watchlist,
        }
    }

    /// Search text, when the mode supports it.
    #[must_use]
    pub const fn search(&self) -> Option<&SearchQuery> {
        match self {
            Self::All { search, .. } | Self::Mine { search } => Some(search),
            Self::Watchlist => None,
        }
    }

    pub(crate) const fn search_mut(&mut self) -> Option<&mut SearchQuery> {
        match self {
            Self::All { search, .. } | Self::Mine { search } => Some(search),
            Self::Watchlist => None,
        }
    }

    /// Active quick filter chip.
    #[must_use]
    pub const fn quick_filter(&self) -> Option<EventCategory> {
        match self {
            Self::All { quick_filter, .. } => quick_filter.active(),
            Self::Mine { .. } | Self::Watchlist => None,
        }
    }
}

/// Source of the primary (baseline) list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimarySource {
    /// Initial recommendations.
    Recommendations,
    /// Filter endpoint.
    Filter,
    /// Registrations of the current user.
    MyEvents,
}

impl PrimarySource {
    /// Message shown when the server offers nothing better.
    #[must_use]
    pub const fn fallback_message(self) -> &'static str {
        match self {
            Self::Recommendations => "Could not load recommendations.",
            Self::Filter => "Could not load events.",
            Self::MyEvents => "Could not load my events.",
        }
    }
}

/// Request for the primary list.
#[derive(Clone, Debug, PartialEq)]
pub enum PrimaryRequest {
    /// `count` recommended events.
    Recommendations {
        /// Number of events requested.
        count: u32,
    },
    /// Filtered catalogue.
    Filter(EventFilterRequest),
    /// Registrations of the current user.
    MyEvents,
}

impl PrimaryRequest {
    /// Source tag for the request.
    #[must_use]
    pub const fn source(&self) -> PrimarySource {
        match self {
            Self::Recommendations { .. } => PrimarySource::Recommendations,
            Self::Filter(_) => PrimarySource::Filter,
            Self::MyEvents => PrimarySource::MyEvents,
        }
    }
}

/// Identity of one primary fetch; only the newest is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrimaryTicket {
    /// Fetch sequence number.
    pub seq: u64,
    /// What was requested.
    pub source: PrimarySource,
}

/// Identity of one watchlist fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WatchlistTicket(pub u64);

/// Work the shell performs on behalf of the controller.
#[derive(Clone, Debug, PartialEq)]
pub enum DiscoveryEffect {
    /// Fetch the primary list.
    FetchPrimary {
        /// Ticket to return with the response.
        ticket: PrimaryTicket,
        /// Request to issue.
        request: PrimaryRequest,
    },
    /// Arm (or re-arm) the debounce timer.
    ScheduleSearch {
        /// Generation the timer reports back.
        generation: u64,
        /// Quiet period.
        delay_ms: u32,
    },
    /// Drop the armed debounce timer.
    CancelSearch,
    /// Run a search.
    Search {
        /// Ticket to return with the response.
        ticket: SearchTicket,
        /// Query parameters.
        params: EventSearchParams,
    },
    /// Fetch the watchlist.
    FetchWatchlist {
        /// Ticket to return with the response.
        ticket: WatchlistTicket,
    },
    /// Create or delete a like.
    Like {
        /// Ticket describing the request.
        ticket: LikeTicket,
    },
}

/// Watchlist panel state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WatchlistState {
    /// Liked events.
    pub events: Vec<EventSummary>,
    /// Fetch in progress.
    pub loading: bool,
    /// Load failure message.
    pub error: Option<String>,
    /// Whether a load completed at least once.
    pub loaded: bool,
}

/// Headline numbers shown above the list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HighlightStats {
    /// Number of events.
    pub live_experiences: usize,
    /// Sum of attendees.
    pub attendees: u64,
    /// Distinct non-empty cities.
    pub cities: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_states_carry_only_their_own_fields() {
        assert_eq!(ViewState::fresh(ViewMode::Watchlist).search(), None);
        assert_eq!(
            ViewState::fresh(ViewMode::Mine).search(),
            Some(&SearchQuery::default())
        );
        assert_eq!(ViewState::default().mode(), ViewMode::All);
        assert_eq!(ViewState::default().quick_filter(), None);
    }

    #[test]
    fn fallback_messages_follow_source() {
        assert_eq!(
            PrimaryRequest::MyEvents.source().fallback_message(),
            "Could not load my events."
        );
        assert_eq!(
            PrimaryRequest::Filter(EventFilterRequest::default())
                .source()
                .fallback_message(),
            "Could not load events."
        );
    }

    #[test]
    fn personal_modes_require_login() {
        assert!(!ViewMode::All.requires_login());
        assert!(ViewMode::Mine.requires_login());
        assert!(ViewMode::Watchlist.requires_login());
    }
}
