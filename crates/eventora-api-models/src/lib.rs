#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::multiple_crate_versions)]
//! Shared HTTP DTOs for the Eventora public API.
//!
//! The UI decodes server payloads through these types so the wire contract
//! (camelCase keys, upper-case enums, omitted optional fields) lives in one place.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Server-side event identifier.
pub type EventId = i64;

/// Fixed catalogue of event categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventCategory {
    /// Talks, workshops, seminars.
    Education,
    /// Wellness, medical camps, blood drives.
    Health,
    /// Tournaments, marathons, fitness.
    Sports,
    /// Festivals, art shows, cultural nights.
    Culture,
    /// Concerts and gigs.
    Music,
    /// Meetups, volunteering, charity drives.
    Community,
    /// Startup meetups, networking, expos.
    Business,
    /// Movies, parties, shows.
    Entertainment,
    /// Anything else.
    Other,
}

impl EventCategory {
    /// Every category in catalogue order.
    pub const ALL: [Self; 9] = [
        Self::Education,
        Self::Health,
        Self::Sports,
        Self::Culture,
        Self::Music,
        Self::Community,
        Self::Business,
        Self::Entertainment,
        Self::Other,
    ];

    /// Wire value used by the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Education => "EDUCATION",
            Self::Health => "HEALTH",
            Self::Sports => "SPORTS",
            Self::Culture => "CULTURE",
            Self::Music => "MUSIC",
            Self::Community => "COMMUNITY",
            Self::Business => "BUSINESS",
            Self::Entertainment => "ENTERTAINMENT",
            Self::Other => "OTHER",
        }
    }

    /// Human-readable label for selects and pills.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Education => "Education",
            Self::Health => "Health",
            Self::Sports => "Sports",
            Self::Culture => "Culture",
            Self::Music => "Music",
            Self::Community => "Community",
            Self::Business => "Business",
            Self::Entertainment => "Entertainment",
            Self::Other => "Other",
        }
    }
}

impl Display for EventCategory {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Error returned when a category string is not part of the catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl Display for UnknownCategory {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("unknown event category")
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for EventCategory {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownCategory(trimmed.to_string()))
    }
}

/// Lifecycle status reported for an event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    /// Scheduled and open for registration.
    #[default]
    Scheduled,
    /// Announced but not yet scheduled.
    Upcoming,
    /// Currently running.
    Ongoing,
    /// Finished.
    Completed,
    /// Cancelled by the organiser.
    Cancelled,
    /// Any status this client does not know about.
    #[serde(other)]
    Unknown,
}

impl EventStatus {
    /// Wire value used by the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "SCHEDULED",
            Self::Upcoming => "UPCOMING",
            Self::Ongoing => "ONGOING",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Event card projection returned by list, search and watchlist endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    /// Server identifier.
    pub id: EventId,
    /// Event title.
    #[serde(default)]
    pub title: String,
    /// Display name of the organiser.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer_name: Option<String>,
    /// Category when the organiser picked one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_category: Option<EventCategory>,
    /// Venue name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    /// City.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State or region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Country.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Lifecycle status; `null` or missing means scheduled.
    #[serde(default, deserialize_with = "null_as_default")]
    pub event_status: EventStatus,
    /// Local start time as sent by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDateTime>,
    /// Registered participant count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_count: Option<u32>,
    /// Live participant count; preferred over `participant_count` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_participants: Option<u32>,
    /// Whether the current user liked the event.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_liked: bool,
}

impl EventSummary {
    /// Attendee count, preferring the live figure.
    #[must_use]
    pub fn attendees(&self) -> u32 {
        self.current_participants
            .or(self.participant_count)
            .unwrap_or(0)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body for `POST /public/api/events/getByFilter`.
///
/// Every field is optional and omitted from the JSON when unset; the server
/// treats a missing key as "no constraint".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventFilterRequest {
    /// Lower price bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    /// Upper price bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    /// City match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Country match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Category match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_category: Option<EventCategory>,
    /// Latitude of the proximity centre.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude of the proximity centre.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Proximity radius in kilometres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_in_km: Option<f64>,
}

impl EventFilterRequest {
    /// Filter constrained to a single category.
    #[must_use]
    pub fn for_category(category: EventCategory) -> Self {
        Self {
            event_category: Some(category),
            ..Self::default()
        }
    }

    /// Whether the request carries no constraint at all.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self == &Self::default()
    }
}

/// Query parameters for `GET /public/api/events/getByNameAndOrganizer`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventSearchParams {
    /// Event title fragment (may be empty).
    pub event_name: String,
    /// Organiser name fragment (may be empty).
    pub organizer_name: String,
    /// Restrict the search to the caller's registrations.
    pub is_my_event_list: bool,
    /// Zero-based page index.
    pub page: u32,
    /// Page size.
    pub size: u32,
}

/// Spring-style page wrapper returned by the search endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventPage {
    /// Events on this page.
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Vec<EventSummary>,
    /// Total matches across pages, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_elements: Option<u64>,
    /// Page index echoed by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
}

/// Loosely shaped list payload: a bare array, `{ "events": [...] }`, or
/// anything else (treated as an empty list).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum EventListPayload {
    /// Bare JSON array of events.
    List(Vec<EventSummary>),
    /// Object wrapping the events.
    Wrapped {
        /// Wrapped events.
        events: Vec<EventSummary>,
    },
    /// Unrecognised shape.
    Other(Value),
}

impl EventListPayload {
    /// Flatten the payload into a list, discarding unrecognised shapes.
    #[must_use]
    pub fn into_events(self) -> Vec<EventSummary> {
        match self {
            Self::List(events) | Self::Wrapped { events } => events,
            Self::Other(_) => Vec::new(),
        }
    }
}

/// Profile projection returned by `GET /public/api/getUserInfo`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Remaining profile attributes the UI does not model.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl UserInfo {
    /// Upper-cased first letter of the display name, or `?`.
    #[must_use]
    pub fn initial(&self) -> char {
        self.display_name
            .as_deref()
            .and_then(|name| name.trim().chars().next())
            .and_then(|first| first.to_uppercase().next())
            .unwrap_or('?')
    }
}

/// `{ "message": ... }` error body produced by most endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiMessage {
    /// Human-readable failure reason.
    pub message: String,
}
