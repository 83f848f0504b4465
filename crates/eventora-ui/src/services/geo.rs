//! Device geolocation bridge.

use crate::features::discovery::filters::{GeoError, GeoPosition};
use gloo::utils::window;
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

const PERMISSION_DENIED: u32 = 1;
const TIMEOUT: u32 = 3;

/// Ask the browser for a single position fix.
pub(crate) async fn current_position() -> Result<GeoPosition, GeoError> {
    let geolocation = window()
        .navigator()
        .geolocation()
        .map_err(|_| GeoError::Unsupported)?;

    let promise = Promise::new(&mut |resolve: Function, reject: Function| {
        let on_error = reject.clone();
        let success = Closure::once_into_js(move |position: JsValue| {
            if let Err(err) = resolve.call1(&JsValue::NULL, &position) {
                tracing::debug!(?err, "geolocation resolve failed");
            }
        });
        let failure = Closure::once_into_js(move |error: JsValue| {
            if let Err(err) = on_error.call1(&JsValue::NULL, &error) {
                tracing::debug!(?err, "geolocation reject failed");
            }
        });
        if let Err(err) = geolocation.get_current_position_with_error_callback(
            success.unchecked_ref(),
            Some(failure.unchecked_ref()),
        ) && reject.call1(&JsValue::NULL, &err).is_err()
        {
            tracing::debug!("geolocation request could not be rejected");
        }
    });

    match JsFuture::from(promise).await {
        Ok(position) => read_position(&position),
        Err(error) => Err(error_from_code(&error)),
    }
}

fn read_position(position: &JsValue) -> Result<GeoPosition, GeoError> {
    let coords = Reflect::get(position, &JsValue::from_str("coords"))
        .map_err(|_| GeoError::Unavailable)?;
    let latitude = number(&coords, "latitude").ok_or(GeoError::Unavailable)?;
    let longitude = number(&coords, "longitude").ok_or(GeoError::Unavailable)?;
    Ok(GeoPosition {
        latitude,
        longitude,
    })
}

fn number(target: &JsValue, key: &str) -> Option<f64> {
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .and_then(|value| value.as_f64())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn error_from_code(error: &JsValue) -> GeoError {
    let code = number(error, "code").map_or(0, |code| code as u32);
    match code {
        PERMISSION_DENIED => GeoError::PermissionDenied,
        TIMEOUT => GeoError::Timeout,
        _ => GeoError::Unavailable,
    }
}
