//! Client-side Aggregate Cache
//!
//! Snapshot of the last-fetched collections plus locally generated history, persisted
//! through a key-value storage so a reload has something to show before fetches land.
//!
//! The snapshot only hydrates startup state. A fetch always replaces its whole
//! collection; there is no merging with cached rows.

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::DomainResult;
use crate::history::{RenewalRecord, ShareRecord};
use crate::loan::Loan;
use crate::master::{merge_master, MasterEntry};
use crate::subscription::Subscription;

/// Storage key of the persisted snapshot
pub const CACHE_KEY: &str = "tracker.cache";

/// Bumped when the snapshot layout changes; older snapshots are discarded
const SNAPSHOT_VERSION: u32 = 1;

/// Key-value storage seam (browser local storage in the UI, memory in tests)
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> DomainResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> DomainResult<()>;
    fn remove(&self, key: &str) -> DomainResult<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> DomainResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    pub version: u32,
    pub saved_at: Option<DateTime<Utc>>,
    /// Last time a collection was fetched from the backend; local-only edits leave it alone
    #[serde(default)]
    pub synced_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
    #[serde(default)]
    pub loans: Vec<Loan>,
    #[serde(default)]
    pub master: Vec<MasterEntry>,
    #[serde(default)]
    pub share_history: Vec<ShareRecord>,
    #[serde(default)]
    pub renewal_history: Vec<RenewalRecord>,
}

impl Default for CacheSnapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: None,
            synced_at: None,
            documents: Vec::new(),
            subscriptions: Vec::new(),
            loans: Vec::new(),
            master: Vec::new(),
            share_history: Vec::new(),
            renewal_history: Vec::new(),
        }
    }
}

impl CacheSnapshot {
    /// Stored snapshot, or `None` when absent, unreadable or from another version.
    /// A corrupt snapshot is removed so it is not read again.
    pub fn load(storage: &dyn KeyValueStorage) -> DomainResult<Option<Self>> {
        let Some(raw) = storage.get(CACHE_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str::<CacheSnapshot>(&raw) {
            Ok(snapshot) if snapshot.version == SNAPSHOT_VERSION => Ok(Some(snapshot)),
            Ok(snapshot) => {
                log::info!("[CACHE] Discarding snapshot version {}", snapshot.version);
                storage.remove(CACHE_KEY)?;
                Ok(None)
            }
            Err(e) => {
                log::warn!("[CACHE] Discarding unreadable snapshot: {}", e);
                storage.remove(CACHE_KEY)?;
                Ok(None)
            }
        }
    }

    pub fn save(&mut self, storage: &dyn KeyValueStorage, now: DateTime<Utc>) -> DomainResult<()> {
        self.saved_at = Some(now);
        let raw = serde_json::to_string(self)?;
        storage.set(CACHE_KEY, &raw)
    }

    pub fn clear(storage: &dyn KeyValueStorage) -> DomainResult<()> {
        storage.remove(CACHE_KEY)
    }

    pub fn replace_documents(&mut self, documents: Vec<Document>) {
        self.documents = documents;
    }

    pub fn replace_subscriptions(&mut self, subscriptions: Vec<Subscription>) {
        self.subscriptions = subscriptions;
    }

    pub fn replace_loans(&mut self, loans: Vec<Loan>) {
        self.loans = loans;
    }

    pub fn remove_document(&mut self, id: u32) {
        self.documents.retain(|d| d.id != id);
    }

    /// Returns how many entries were new
    pub fn merge_master(&mut self, entries: Vec<MasterEntry>) -> usize {
        merge_master(&mut self.master, entries)
    }

    pub fn push_share(&mut self, record: ShareRecord) {
        self.share_history.push(record);
    }

    pub fn push_renewal(&mut self, record: RenewalRecord) {
        self.renewal_history.push(record);
    }
}
