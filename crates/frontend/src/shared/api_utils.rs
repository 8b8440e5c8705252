//! API utilities for frontend-backend communication
//!
//! API base path and the report identifier from the page URL.
//! Paths are joined to the base by `RequestClient::url`.

use super::config::{API_BASE_PATH, DEFAULT_VEHICLE_ID};
use std::collections::HashMap;

/// Get the base URL for API requests
///
/// The serverless functions are served from the same origin as the page,
/// so the base is a path, not a full URL.
pub fn api_base() -> String {
    API_BASE_PATH.to_string()
}

/// Extract `vin` from a location query string ("?vin=ABC" or "vin=ABC")
///
/// Falls back to [`DEFAULT_VEHICLE_ID`] when the parameter is missing or blank.
pub fn vehicle_id_from_query(search: &str) -> String {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params
        .get("vin")
        .map(|vin| vin.trim())
        .filter(|vin| !vin.is_empty())
        .unwrap_or(DEFAULT_VEHICLE_ID)
        .to_string()
}

/// Vehicle id of the current page
pub fn current_vehicle_id() -> String {
    let search = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    vehicle_id_from_query(&search)
}
