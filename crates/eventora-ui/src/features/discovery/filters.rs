//! Advanced filter form and request builder.
//!
//! # Design
//! - Keep form inputs as strings for lossless editing; convert only on submit.
//! - Empty inputs mean "no constraint" and never reach the wire.
//! - Proximity is one unit: both coordinates or nothing.
//! - Location lookups are ticketed so a fix landing after the toggle was switched off is dropped.

use eventora_api_models::{EventCategory, EventFilterRequest};
use thiserror::Error;

/// Device location fix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPosition {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// Reasons a location lookup can fail.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GeoError {
    /// The user refused the permission prompt.
    #[error("geolocation permission denied")]
    PermissionDenied,
    /// The device could not determine a position.
    #[error("geolocation position unavailable")]
    Unavailable,
    /// The lookup timed out.
    #[error("geolocation timed out")]
    Timeout,
    /// The browser exposes no geolocation API.
    #[error("geolocation unsupported")]
    Unsupported,
}

impl GeoError {
    /// Inline message shown under the toggle.
    #[must_use]
    pub const fn user_message(self) -> &'static str {
        match self {
            Self::Unsupported => "Geolocation is not supported by your browser",
            Self::PermissionDenied | Self::Unavailable | Self::Timeout => {
                "Could not get your location. Please enable location services."
            }
        }
    }
}

/// Validation failures for numeric inputs.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FilterFormError {
    /// The field is not a number.
    #[error("filter value is not a number")]
    InvalidNumber {
        /// Field label.
        field: &'static str,
        /// Raw input.
        value: String,
    },
    /// The field is below zero.
    #[error("filter value is negative")]
    Negative {
        /// Field label.
        field: &'static str,
        /// Parsed input.
        value: f64,
    },
}

impl FilterFormError {
    /// Inline message for the form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidNumber { field, .. } => format!("{field} must be a number"),
            Self::Negative { field, .. } => format!("{field} must be zero or more"),
        }
    }
}

/// Ticket for one location lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocationRequest(u64);

/// Mutable filter form state.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterForm {
    /// Lower price bound input.
    pub min_price: String,
    /// Upper price bound input.
    pub max_price: String,
    /// City input.
    pub city: String,
    /// State input.
    pub state: String,
    /// Country input.
    pub country: String,
    /// Selected category.
    pub category: Option<EventCategory>,
    /// Radius input in kilometres.
    pub radius_km: String,
    nearby: bool,
    position: Option<GeoPosition>,
    location_error: Option<String>,
    lookup: Option<u64>,
    lookup_seq: u64,
}

impl Default for FilterForm {
    fn default() -> Self {
        Self {
            min_price: String::new(),
            max_price: String::new(),
            city: String::new(),
            state: String::new(),
            country: String::new(),
            category: None,
            radius_km: "10".to_string(),
            nearby: false,
            position: None,
            location_error: None,
            lookup: None,
            lookup_seq: 0,
        }
    }
}

impl FilterForm {
    /// Whether the proximity toggle is on.
    #[must_use]
    pub const fn nearby(&self) -> bool {
        self.nearby
    }

    /// Last location fix.
    #[must_use]
    pub const fn position(&self) -> Option<GeoPosition> {
        self.position
    }

    /// Inline location error.
    #[must_use]
    pub fn location_error(&self) -> Option<&str> {
        self.location_error.as_deref()
    }

    /// Whether a location lookup is outstanding.
    #[must_use]
    pub const fn locating(&self) -> bool {
        self.lookup.is_some()
    }

    /// Flip the proximity toggle.
    ///
    /// Turning it on returns a lookup the caller must resolve through
    /// [`Self::location_resolved`].
    pub fn set_nearby(&mut self, enabled: bool) -> Option<LocationRequest> {
        self.location_error = None;
        if !enabled {
            self.nearby = false;
            self.position = None;
            self.lookup = None;
            return None;
        }
        self.nearby = true;
        self.lookup_seq += 1;
        self.lookup = Some(self.lookup_seq);
        Some(LocationRequest(self.lookup_seq))
    }

    /// Apply the outcome of a location lookup.
    pub fn location_resolved(
        &mut self,
        request: LocationRequest,
        result: Result<GeoPosition, GeoError>,
    ) {
        if self.lookup != Some(request.0) {
            tracing::debug!(lookup = request.0, "ignoring stale location fix");
            return;
        }
        self.lookup = None;
        match result {
            Ok(position) => {
                self.position = Some(position);
                self.location_error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "location lookup failed");
                self.nearby = false;
                self.position = None;
                self.location_error = Some(err.user_message().to_string());
            }
        }
    }

    /// Reset every field.
    pub fn clear(&mut self) {
        *self = Self {
            lookup_seq: self.lookup_seq,
            ..Self::default()
        };
    }

    /// Build the request body, omitting blank fields.
    ///
    /// # Errors
    ///
    /// Returns [`FilterFormError`] when a numeric input is not a non-negative number.
    pub fn build(&self, default_radius_km: f64) -> Result<EventFilterRequest, FilterFormError> {
        let mut request = EventFilterRequest {
            min_price: parse_optional_f64("Min price", &self.min_price)?,
            max_price: parse_optional_f64("Max price", &self.max_price)?,
            city: optional_text(&self.city),
            state: optional_text(&self.state),
            country: optional_text(&self.country),
            event_category: self.category,
            ..EventFilterRequest::default()
        };
        if self.nearby
            && let Some(position) = self.position
        {
            request.latitude = Some(position.latitude);
            request.longitude = Some(position.longitude);
            request.radius_in_km = Some(
                parse_optional_f64("Radius", &self.radius_km)?.unwrap_or(default_radius_km),
            );
        }
        Ok(request)
    }
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_optional_f64(field: &'static str, value: &str) -> Result<Option<f64>, FilterFormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let parsed = trimmed
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .ok_or_else(|| FilterFormError::InvalidNumber {
            field,
            value: trimmed.to_string(),
        })?;
    if parsed < 0.0 {
        return Err(FilterFormError::Negative {
            field,
            value: parsed,
        });
    }
    Ok(Some(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const RADIUS: f64 = 10.0;

    fn located(form: &mut FilterForm) {
        let request = form.set_nearby(true).unwrap();
        form.location_resolved(
            request,
            Ok(GeoPosition {
                latitude: 52.52,
                longitude: 13.405,
            }),
        );
    }

    #[test]
    fn empty_fields_are_omitted() {
        let form = FilterForm {
            min_price: String::new(),
            city: "   ".into(),
            ..FilterForm::default()
        };
        let value = serde_json::to_value(form.build(RADIUS).unwrap()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn min_price_is_numeric_and_max_price_absent() {
        let form = FilterForm {
            min_price: "10".into(),
            city: " Berlin ".into(),
            category: Some(EventCategory::Music),
            ..FilterForm::default()
        };
        let value = serde_json::to_value(form.build(RADIUS).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({ "minPrice": 10.0, "city": "Berlin", "eventCategory": "MUSIC" })
        );
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let form = FilterForm {
            max_price: "ten".into(),
            ..FilterForm::default()
        };
        let err = form.build(RADIUS).unwrap_err();
        assert_eq!(err.user_message(), "Max price must be a number");

        let form = FilterForm {
            min_price: "-1".into(),
            ..FilterForm::default()
        };
        assert!(matches!(
            form.build(RADIUS),
            Err(FilterFormError::Negative { field: "Min price", .. })
        ));
    }

    #[test]
    fn geo_group_requires_toggle_and_fix() {
        let mut form = FilterForm::default();
        let pending = form.set_nearby(true).unwrap();
        assert!(form.locating());
        let request = form.build(RADIUS).unwrap();
        assert!(request.latitude.is_none() && request.longitude.is_none());
        assert!(request.radius_in_km.is_none());

        form.location_resolved(
            pending,
            Ok(GeoPosition {
                latitude: 1.5,
                longitude: 2.5,
            }),
        );
        form.radius_km = String::new();
        let request = form.build(RADIUS).unwrap();
        assert_eq!(request.latitude, Some(1.5));
        assert_eq!(request.longitude, Some(2.5));
        assert_eq!(request.radius_in_km, Some(RADIUS));
    }

    #[test]
    fn denied_location_reverts_toggle_and_keeps_form() {
        let mut form = FilterForm {
            city: "Lisbon".into(),
            ..FilterForm::default()
        };
        let request = form.set_nearby(true).unwrap();
        form.location_resolved(request, Err(GeoError::PermissionDenied));

        assert!(!form.nearby());
        assert_eq!(
            form.location_error(),
            Some("Could not get your location. Please enable location services.")
        );
        assert_eq!(form.city, "Lisbon");
        let built = form.build(RADIUS).unwrap();
        assert!(built.latitude.is_none() && built.longitude.is_none());
        assert_eq!(built.city.as_deref(), Some("Lisbon"));
    }

    #[test]
    fn unsupported_capability_has_its_own_message() {
        let mut form = FilterForm::default();
        let request = form.set_nearby(true).unwrap();
        form.location_resolved(request, Err(GeoError::Unsupported));
        assert!(!form.nearby());
        assert_eq!(
            form.location_error(),
            Some("Geolocation is not supported by your browser")
        );
    }

    #[test]
    fn late_fix_after_toggle_off_is_ignored() {
        let mut form = FilterForm::default();
        let request = form.set_nearby(true).unwrap();
        form.set_nearby(false);
        form.location_resolved(
            request,
            Ok(GeoPosition {
                latitude: 1.0,
                longitude: 1.0,
            }),
        );
        assert!(form.position().is_none());
        assert!(!form.nearby());
    }

    #[test]
    fn disabling_nearby_drops_coordinates() {
        let mut form = FilterForm::default();
        located(&mut form);
        assert!(form.build(RADIUS).unwrap().latitude.is_some());
        form.set_nearby(false);
        assert!(form.build(RADIUS).unwrap().latitude.is_none());
    }

    #[test]
    fn clear_resets_fields() {
        let mut form = FilterForm {
            country: "PT".into(),
            radius_km: "25".into(),
            ..FilterForm::default()
        };
        located(&mut form);
        form.clear();
        assert_eq!(form.country, "");
        assert_eq!(form.radius_km, "10");
        assert!(!form.nearby());
        assert!(form.build(RADIUS).unwrap().is_unfiltered());
    }
}
