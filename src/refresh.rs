//! Collection Refresh
//!
//! Fetch a collection, map it to its display shape and replace it in the store.
//! Master lookups are the exception: they merge, keeping entries added locally.

use leptos::prelude::Write;
use tracker_domain::{Document, Loan, Subscription};

use crate::api::{self, ApiError, ApiResult};
use crate::store::{self, AppStore, AppStateStoreFields};

pub async fn refresh_documents(store: AppStore) -> ApiResult<usize> {
    let documents = Document::from_records(api::list_documents().await?);
    let count = documents.len();
    *store.documents().write() = documents;
    store::mark_synced(&store);
    store::persist(&store);
    log::info!("[REFRESH] {} documents", count);
    Ok(count)
}

pub async fn refresh_subscriptions(store: AppStore) -> ApiResult<usize> {
    let subscriptions: Vec<Subscription> = api::list_subscriptions()
        .await?
        .into_iter()
        .map(Subscription::from)
        .collect();
    let count = subscriptions.len();
    *store.subscriptions().write() = subscriptions;
    store::mark_synced(&store);
    store::persist(&store);
    log::info!("[REFRESH] {} subscriptions", count);
    Ok(count)
}

pub async fn refresh_loans(store: AppStore) -> ApiResult<usize> {
    let loans: Vec<Loan> = api::list_loans().await?.into_iter().map(Loan::from).collect();
    let count = loans.len();
    *store.loans().write() = loans;
    store::mark_synced(&store);
    store::persist(&store);
    log::info!("[REFRESH] {} loans", count);
    Ok(count)
}

pub async fn refresh_master(store: AppStore) -> ApiResult<usize> {
    let added = store::store_merge_master(&store, api::list_master().await?);
    store::mark_synced(&store);
    store::persist(&store);
    log::info!("[REFRESH] {} new master entries", added);
    Ok(added)
}

pub async fn refresh_users(store: AppStore) -> ApiResult<usize> {
    let users = api::list_users().await?;
    let count = users.len();
    *store.users().write() = users;
    Ok(count)
}

/// Refresh the four tracked collections concurrently. A failed fetch leaves its
/// collection as it was; the failures are returned labelled by collection.
pub async fn reload_all(store: AppStore) -> Vec<(&'static str, ApiError)> {
    let (documents, subscriptions, loans, master) = futures::join!(
        refresh_documents(store),
        refresh_subscriptions(store),
        refresh_loans(store),
        refresh_master(store),
    );

    let failures: Vec<(&'static str, ApiError)> = [
        ("documents", documents),
        ("subscriptions", subscriptions),
        ("loans", loans),
        ("master", master),
    ]
    .into_iter()
    .filter_map(|(name, result)| result.err().map(|e| (name, e)))
    .collect();

    for (name, err) in &failures {
        log::warn!("[REFRESH] Keeping cached {}: {}", name, err);
    }
    failures
}
