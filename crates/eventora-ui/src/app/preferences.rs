//! Persistence and environment helpers for the app shell.

use crate::core::auth::TokenStore;
use crate::core::config::AUTH_TOKEN_KEY;
use crate::core::logic::{api_origin, view_from_query};
use crate::features::discovery::state::ViewMode;
use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::window;
use web_sys::Url;

/// Token store backed by `localStorage`.
///
/// The login flow writes the raw token string, so reads bypass gloo's JSON encoding.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LocalTokenStore;

impl TokenStore for LocalTokenStore {
    fn load_token(&self) -> Option<String> {
        match LocalStorage::raw().get_item(AUTH_TOKEN_KEY) {
            Ok(value) => value.filter(|token| !token.trim().is_empty()),
            Err(err) => {
                log_storage_error("get", AUTH_TOKEN_KEY, &format!("{err:?}"));
                None
            }
        }
    }

    fn clear_token(&self) {
        if let Err(err) = LocalStorage::raw().remove_item(AUTH_TOKEN_KEY) {
            log_storage_error("remove", AUTH_TOKEN_KEY, &format!("{err:?}"));
        }
    }
}

/// View requested by the `?view=` deep link, read once at startup.
pub(crate) fn deep_link_view() -> Option<ViewMode> {
    let search = window().location().search().ok()?;
    view_from_query(&search)
}

pub(crate) fn api_base_url() -> String {
    let href = window()
        .location()
        .href()
        .unwrap_or_else(|_| "http://localhost:8080".to_string());

    Url::new(&href).map_or_else(
        |_| "http://localhost:7070".to_string(),
        |url| api_origin(&url.protocol(), &url.hostname(), &url.port()),
    )
}

fn log_storage_error(action: &str, key: &str, detail: &str) {
    console::error!(format!("storage {action} failed for {key}: {detail}"));
}
