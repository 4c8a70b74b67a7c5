//! Browser-side persistence and page location.
//!
//! Reads and writes the saved configuration in `localStorage` and exposes the
//! page's query string. Requires a browser environment; every function is a
//! quiet no-op (logged) when the API is missing or throws, e.g. in private
//! browsing with storage disabled.

use crate::consts::STORAGE_KEY;

fn local_storage() -> Option<web_sys::Storage> {
    let window = web_sys::window()?;
    match window.local_storage() {
        Ok(storage) => storage,
        Err(err) => {
            log::warn!("storage: localStorage unavailable: {err:?}");
            None
        }
    }
}

/// Raw stored configuration blob, if any.
#[must_use]
pub fn load() -> Option<String> {
    let storage = local_storage()?;
    match storage.get_item(STORAGE_KEY) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("storage: read failed: {err:?}");
            None
        }
    }
}

pub fn save(json: &str) {
    if let Some(storage) = local_storage() {
        if let Err(err) = storage.set_item(STORAGE_KEY, json) {
            log::warn!("storage: write failed: {err:?}");
        }
    }
}

pub fn clear() {
    if let Some(storage) = local_storage() {
        if let Err(err) = storage.remove_item(STORAGE_KEY) {
            log::warn!("storage: remove failed: {err:?}");
        }
    }
}

/// The page's `location.search`, including the leading `?` when present.
#[must_use]
pub fn location_search() -> String {
    let Some(window) = web_sys::window() else {
        return String::new();
    };
    window.location().search().unwrap_or_default()
}

/// The page URL without query or fragment, used as the share link base.
#[must_use]
pub fn location_base() -> String {
    let Some(window) = web_sys::window() else {
        return String::new();
    };
    let location = window.location();
    match (location.origin(), location.pathname()) {
        (Ok(origin), Ok(path)) => format!("{origin}{path}"),
        _ => location.href().unwrap_or_default(),
    }
}
