//! Browser Local Storage
//!
//! `KeyValueStorage` over `window.localStorage`.

use tracker_domain::{DomainError, DomainResult, KeyValueStorage};

pub struct LocalStorage;

fn storage() -> DomainResult<web_sys::Storage> {
    web_sys::window()
        .ok_or_else(|| DomainError::Storage("no window".into()))?
        .local_storage()
        .map_err(|e| DomainError::Storage(format!("{:?}", e)))?
        .ok_or_else(|| DomainError::Storage("local storage unavailable".into()))
}

impl KeyValueStorage for LocalStorage {
    fn get(&self, key: &str) -> DomainResult<Option<String>> {
        storage()?
            .get_item(key)
            .map_err(|e| DomainError::Storage(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        storage()?
            .set_item(key, value)
            .map_err(|e| DomainError::Storage(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> DomainResult<()> {
        storage()?
            .remove_item(key)
            .map_err(|e| DomainError::Storage(format!("{:?}", e)))
    }
}
