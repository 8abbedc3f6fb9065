//! Login Session
//!
//! The token and user returned by `/auth/login`, kept in local storage.

use tracker_domain::{KeyValueStorage, Session};

use crate::storage::LocalStorage;

const SESSION_KEY: &str = "tracker.session";

pub fn load() -> Option<Session> {
    let raw = LocalStorage.get(SESSION_KEY).ok().flatten()?;
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            log::warn!("[SESSION] Dropping unreadable session: {}", e);
            clear();
            None
        }
    }
}

pub fn save(session: &Session) {
    let result = serde_json::to_string(session)
        .map_err(|e| e.to_string())
        .and_then(|raw| LocalStorage.set(SESSION_KEY, &raw).map_err(|e| e.to_string()));
    if let Err(e) = result {
        log::warn!("[SESSION] Could not persist session: {}", e);
    }
}

pub fn clear() {
    if let Err(e) = LocalStorage.remove(SESSION_KEY) {
        log::warn!("[SESSION] Could not clear session: {}", e);
    }
}

pub fn token() -> Option<String> {
    load().map(|s| s.token)
}
