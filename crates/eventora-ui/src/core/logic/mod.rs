//! Pure helpers shared by the API client and views.
//!
//! # Design
//! - Keep path building and display formatting DOM-free for native tests.
//! - Never panic on missing fields; fall back to display defaults.

use crate::core::config::{VIEW_PARAM, VIEW_PARAM_MINE};
use crate::features::discovery::state::ViewMode;
use eventora_api_models::{EventId, EventSearchParams, EventSummary};

/// Path for the recommendations endpoint.
#[must_use]
pub fn recommendations_path(count: u32) -> String {
    format!("/api/recommendations?limit={count}")
}

/// Path for the name/organiser search endpoint.
#[must_use]
pub fn search_path(params: &EventSearchParams) -> String {
    format!(
        "/public/api/events/getByNameAndOrganizer?eventName={}&organizerName={}&isMyEventList={}&page={}&size={}",
        urlencoding::encode(&params.event_name),
        urlencoding::encode(&params.organizer_name),
        params.is_my_event_list,
        params.page,
        params.size,
    )
}

/// Path for creating or deleting a like.
#[must_use]
pub fn interaction_path(event_id: EventId) -> String {
    format!("/api/interactions/{event_id}")
}

/// Map a page origin onto the API origin; the dev server on 8080 talks to 7070.
#[must_use]
pub fn api_origin(protocol: &str, hostname: &str, port: &str) -> String {
    let mapped_port = match port {
        "" => None,
        "8080" => Some("7070"),
        other => Some(other),
    };
    let mut base = format!("{protocol}//{hostname}");
    if let Some(port) = mapped_port {
        base.push(':');
        base.push_str(port);
    }
    base
}

/// Parse the deep-linked view from a location query string (`?view=my`).
#[must_use]
pub fn view_from_query(query: &str) -> Option<ViewMode> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == VIEW_PARAM)
        .and_then(|(_, value)| (value == VIEW_PARAM_MINE).then_some(ViewMode::Mine))
}

/// Detail link for a card, remembering which list it came from.
#[must_use]
pub fn event_link(event_id: EventId, mode: ViewMode) -> String {
    let from = if mode == ViewMode::Mine { "my" } else { "all" };
    format!("/events/{event_id}?from=home&view={from}")
}

/// Joined venue, city, state and country.
#[must_use]
pub fn location_label(event: &EventSummary) -> String {
    let parts: Vec<&str> = [
        event.location_name.as_deref(),
        event.city.as_deref(),
        event.state.as_deref(),
        event.country.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .filter(|part| !part.is_empty())
    .collect();
    if parts.is_empty() {
        "Hybrid / Online".to_string()
    } else {
        parts.join(", ")
    }
}

/// Category pill text.
#[must_use]
pub fn category_label(event: &EventSummary) -> &'static str {
    event
        .event_category
        .map_or("General", |category| category.as_str())
}

/// Organiser line text.
#[must_use]
pub fn organizer_label(event: &EventSummary) -> &str {
    event
        .organizer_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or("Event organiser")
}

/// Start time text.
#[must_use]
pub fn start_label(event: &EventSummary) -> String {
    event.start_date.map_or_else(
        || "TBA".to_string(),
        |start| start.format("%a %-d %b %Y, %H:%M").to_string(),
    )
}

/// "1,234 attending".
#[must_use]
pub fn attendees_label(event: &EventSummary) -> String {
    format!("{} attending", group_thousands(u64::from(event.attendees())))
}

/// Group digits with commas.
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
