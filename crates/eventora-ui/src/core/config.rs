//! Tunables and well-known keys for the discovery client.
//!
//! # Design
//! - Centralize timing and pagination defaults so reducers and the shell agree.
//! - Keep storage keys namespaced to avoid collisions with other apps on the origin.

/// `LocalStorage` key holding the bearer token written by the login flow.
pub const AUTH_TOKEN_KEY: &str = "eventora.auth_token";
/// Query parameter used to deep-link a view mode.
pub const VIEW_PARAM: &str = "view";
/// `VIEW_PARAM` value that restores the "my events" view.
pub const VIEW_PARAM_MINE: &str = "my";

/// Runtime knobs for the discovery controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiscoveryConfig {
    /// Quiet period before a search fires, in milliseconds.
    pub search_debounce_ms: u32,
    /// Number of recommendations requested on first load.
    pub recommendation_count: u32,
    /// Page index sent with every search.
    pub search_page: u32,
    /// Page size sent with every search.
    pub search_page_size: u32,
    /// Radius applied to proximity filters when the form leaves it blank.
    pub default_radius_km: f64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: 500,
            recommendation_count: 10,
            search_page: 0,
            search_page_size: 10,
            default_radius_km: 10.0,
        }
    }
}
