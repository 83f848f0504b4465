//! Browser service adapters (HTTP, geolocation).
pub(crate) mod api;
pub(crate) mod geo;
