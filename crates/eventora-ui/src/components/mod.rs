//! Presentational components for the discovery page.
pub(crate) mod event_card;
pub(crate) mod filters_panel;
pub(crate) mod profile_menu;
pub(crate) mod quick_filters;
pub(crate) mod search_bar;
pub(crate) mod watchlist;
