//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The store is hydrated from the
//! persisted cache snapshot at startup; after that only fetches and local actions write it.

use chrono::{DateTime, Utc};
use leptos::prelude::*;
use reactive_stores::Store;
use tracker_domain::{
    CacheSnapshot, Document, Loan, MasterEntry, RenewalRecord, ShareRecord, Subscription, User,
};

use crate::storage::LocalStorage;
use crate::time;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    pub documents: Vec<Document>,
    pub subscriptions: Vec<Subscription>,
    pub loans: Vec<Loan>,
    /// Lookup values for company names, document types and categories
    pub master: Vec<MasterEntry>,
    pub share_history: Vec<ShareRecord>,
    pub renewal_history: Vec<RenewalRecord>,
    /// Admin only, never persisted
    pub users: Vec<User>,
    /// When the cache snapshot this state came from was written
    pub cached_at: Option<DateTime<Utc>>,
    /// Last successful fetch from the backend
    pub synced_at: Option<DateTime<Utc>>,
}

impl AppState {
    pub fn from_snapshot(snapshot: CacheSnapshot) -> Self {
        Self {
            documents: snapshot.documents,
            subscriptions: snapshot.subscriptions,
            loans: snapshot.loans,
            master: snapshot.master,
            share_history: snapshot.share_history,
            renewal_history: snapshot.renewal_history,
            users: Vec::new(),
            cached_at: snapshot.saved_at,
            synced_at: snapshot.synced_at,
        }
    }

    pub fn to_snapshot(&self) -> CacheSnapshot {
        CacheSnapshot {
            saved_at: self.cached_at,
            synced_at: self.synced_at,
            documents: self.documents.clone(),
            subscriptions: self.subscriptions.clone(),
            loans: self.loans.clone(),
            master: self.master.clone(),
            share_history: self.share_history.clone(),
            renewal_history: self.renewal_history.clone(),
            ..CacheSnapshot::default()
        }
    }

    /// State from the persisted snapshot, empty if there is none
    pub fn hydrate() -> Self {
        match CacheSnapshot::load(&LocalStorage) {
            Ok(Some(snapshot)) => {
                log::info!(
                    "[STORE] Hydrated {} documents, {} subscriptions, {} loans from cache",
                    snapshot.documents.len(),
                    snapshot.subscriptions.len(),
                    snapshot.loans.len()
                );
                Self::from_snapshot(snapshot)
            }
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("[STORE] Could not read cache: {}", e);
                Self::default()
            }
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Write the current state to local storage
pub fn persist(store: &AppStore) {
    let mut snapshot = store.get_untracked().to_snapshot();
    let now = time::now();
    match snapshot.save(&LocalStorage, now) {
        Ok(()) => *store.cached_at().write() = Some(now),
        Err(e) => log::warn!("[STORE] Could not persist cache: {}", e),
    }
}

/// Record that fresh data just arrived from the backend
pub fn mark_synced(store: &AppStore) {
    *store.synced_at().write() = Some(time::now());
}

/// Drop the persisted snapshot and everything in memory (sign-out)
pub fn clear(store: &AppStore) {
    if let Err(e) = CacheSnapshot::clear(&LocalStorage) {
        log::warn!("[STORE] Could not clear cache: {}", e);
    }
    *store.write() = AppState::default();
}

// ========================
// Store Helper Functions
// ========================

/// Remove a document from the store by ID
pub fn store_remove_document(store: &AppStore, document_id: u32) {
    store.documents().write().retain(|doc| doc.id != document_id);
}

/// Merge master entries, skipping ones already present. Returns how many were new.
pub fn store_merge_master(store: &AppStore, entries: Vec<MasterEntry>) -> usize {
    tracker_domain::merge_master(&mut store.master().write(), entries)
}

pub fn store_push_share(store: &AppStore, record: ShareRecord) {
    store.share_history().write().push(record);
}

pub fn store_push_renewal(store: &AppStore, record: RenewalRecord) {
    store.renewal_history().write().push(record);
}

/// Remove a user from the store by ID
pub fn store_remove_user(store: &AppStore, user_id: u32) {
    store.users().write().retain(|user| user.id != user_id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tracker_domain::{DocumentRecord, UserRole};

    fn document(id: u32) -> Document {
        Document::from(DocumentRecord {
            id,
            document_name: format!("Doc {}", id),
            document_type: "License".into(),
            category: "Company".into(),
            owner_name: "Acme".into(),
            needs_renewal: None,
            renewal_date: None,
            file_url: None,
            created_at: None,
            deleted: None,
        })
    }

    #[test]
    fn test_snapshot_round_trip_skips_users() {
        let saved_at = Utc.with_ymd_and_hms(2026, 10, 1, 8, 30, 0).unwrap();
        let synced_at = Utc.with_ymd_and_hms(2026, 9, 30, 17, 0, 0).unwrap();
        let state = AppState {
            documents: vec![document(1), document(2)],
            master: vec![MasterEntry::new("Acme", "GST", "Company")],
            users: vec![User {
                id: 1,
                username: "admin".into(),
                role: UserRole::Admin,
                department: String::new(),
                system_access: vec![],
                page_access: vec![],
            }],
            cached_at: Some(saved_at),
            synced_at: Some(synced_at),
            ..AppState::default()
        };

        let snapshot = state.to_snapshot();
        assert_eq!(snapshot.saved_at, Some(saved_at));
        assert_eq!(snapshot.documents.len(), 2);

        let restored = AppState::from_snapshot(snapshot);
        assert_eq!(restored.documents, state.documents);
        assert_eq!(restored.master, state.master);
        assert!(restored.users.is_empty());
        assert_eq!(restored.cached_at, Some(saved_at));
        assert_eq!(restored.synced_at, Some(synced_at));
    }
}
