//! Cross-module Tests
//!
//! Cache persistence, dashboard aggregation and list/selection behaviour.

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::*;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    ymd(2026, 10, 18)
}

fn document(id: u32, renewal: Option<&str>) -> Document {
    Document::from(DocumentRecord {
        id,
        document_name: format!("Doc {}", id),
        document_type: "License".into(),
        category: "Company".into(),
        owner_name: "Acme".into(),
        needs_renewal: renewal.map(|_| Flag::Bool(true)),
        renewal_date: renewal.map(str::to_string),
        file_url: None,
        created_at: None,
        deleted: None,
    })
}

fn subscription(id: u32, price: &str, frequency: &str, approval: Option<&str>, payment: Option<&str>, end: Option<&str>) -> Subscription {
    Subscription::from(SubscriptionRecord {
        id,
        company_name: "Acme".into(),
        subscriber_name: "IT".into(),
        subscription_name: format!("Tool {}", id),
        price: Some(price.into()),
        frequency: frequency.into(),
        purpose: String::new(),
        requested_on: None,
        start_date: None,
        end_date: end.map(str::to_string),
        planned_renewal: None,
        actual_2: approval.map(Flag::from),
        actual_3: payment.map(Flag::from),
        approval_status: None,
        approval_remarks: None,
    })
}

fn loan(id: u32, amount: &str, settled: bool) -> Loan {
    let json = format!(
        r#"{{"id":{},"loanName":"Loan {}","bankName":"SBI","amount":"{}","settlementStatus":{}}}"#,
        id, id, amount, settled
    );
    Loan::from(serde_json::from_str::<LoanRecord>(&json).unwrap())
}

#[test]
fn test_cache_round_trip() {
    let storage = MemoryStorage::new();
    assert_eq!(CacheSnapshot::load(&storage).unwrap(), None);

    let mut snapshot = CacheSnapshot::default();
    snapshot.replace_documents(vec![document(1, Some("2026-11-01"))]);
    snapshot.replace_subscriptions(vec![subscription(2, "₹1,200", "Yearly", Some("yes"), None, None)]);
    snapshot.replace_loans(vec![loan(3, "5,00,000", false)]);
    snapshot.merge_master(vec![MasterEntry::new("Acme", "GST", "Company")]);
    let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
    snapshot.push_share(ShareRecord::new(&snapshot.documents[0].clone(), ShareChannel::Email, "a@b.c", now));
    snapshot.save(&storage, now).unwrap();

    let loaded = CacheSnapshot::load(&storage).unwrap().unwrap();
    assert_eq!(loaded, snapshot);
    assert_eq!(loaded.saved_at, Some(now));
    assert_eq!(loaded.share_history[0].serial, "DOC-0001");
}

#[test]
fn test_save_keeps_sync_time() {
    let storage = MemoryStorage::new();
    let fetched = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
    let later = Utc.with_ymd_and_hms(2026, 10, 18, 11, 30, 0).unwrap();

    let mut snapshot = CacheSnapshot { synced_at: Some(fetched), ..CacheSnapshot::default() };
    snapshot.merge_master(vec![MasterEntry::new("Acme", "GST", "Company")]);
    snapshot.save(&storage, later).unwrap();

    let loaded = CacheSnapshot::load(&storage).unwrap().unwrap();
    assert_eq!(loaded.saved_at, Some(later));
    assert_eq!(loaded.synced_at, Some(fetched));
}

#[test]
fn test_snapshot_without_sync_time_loads() {
    let storage = MemoryStorage::new();
    let raw = format!(r#"{{"version":{},"saved_at":null,"documents":[]}}"#, CacheSnapshot::default().version);
    storage.set(CACHE_KEY, &raw).unwrap();
    let loaded = CacheSnapshot::load(&storage).unwrap().unwrap();
    assert_eq!(loaded.synced_at, None);
}

#[test]
fn test_corrupt_snapshot_is_discarded() {
    let storage = MemoryStorage::new();
    storage.set(CACHE_KEY, "{not json").unwrap();
    assert_eq!(CacheSnapshot::load(&storage).unwrap(), None);
    assert_eq!(storage.get(CACHE_KEY).unwrap(), None);
}

#[test]
fn test_other_version_snapshot_is_discarded() {
    let storage = MemoryStorage::new();
    storage.set(CACHE_KEY, r#"{"version":99,"saved_at":null}"#).unwrap();
    assert_eq!(CacheSnapshot::load(&storage).unwrap(), None);
}

#[test]
fn test_fetch_replaces_whole_collection() {
    let mut snapshot = CacheSnapshot::default();
    snapshot.replace_documents(vec![document(1, None), document(2, None)]);
    snapshot.replace_documents(vec![document(3, None)]);
    assert_eq!(snapshot.documents.iter().map(|d| d.id).collect::<Vec<_>>(), vec![3]);
}

#[test]
fn test_history_only_appends() {
    let mut snapshot = CacheSnapshot::default();
    let doc = document(4, Some("2026-10-20"));
    let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
    snapshot.push_renewal(RenewalRecord::new(&doc, ymd(2027, 10, 20), Some("data:application/pdf;base64,AAA"), now));
    snapshot.push_renewal(RenewalRecord::new(&doc, ymd(2028, 10, 20), Some("https://x/y/new.pdf"), now));
    assert_eq!(snapshot.renewal_history.len(), 2);
    assert_eq!(snapshot.renewal_history[0].old_date, Some(ymd(2026, 10, 20)));
    assert_eq!(snapshot.renewal_history[0].new_file.as_deref(), Some("uploaded file"));
    assert_eq!(snapshot.renewal_history[1].new_file.as_deref(), Some("new.pdf"));
}

#[test]
fn test_dashboard_summary() {
    let docs = vec![
        document(1, None),
        document(2, Some("2026-10-10")),
        document(3, Some("2026-11-10")),
        document(4, Some("2027-02-01")),
    ];
    let subs = vec![
        subscription(1, "₹1,200", "Yearly", Some("yes"), Some("yes"), Some("2026-10-22")),
        subscription(2, "300", "Quarterly", Some("2026-01-01"), None, Some("2027-01-01")),
        subscription(3, "999", "Monthly", None, None, None),
        subscription(4, "call vendor", "Monthly", Some("yes"), None, None),
    ];
    let loans = vec![loan(1, "1,000", false), loan(2, "500", true)];

    let summary = summarize(&docs, &subs, &loans, today(), 7, 30);
    assert_eq!(summary.document_count, 4);
    assert_eq!(summary.subscription_count, 4);
    assert_eq!(summary.loan_count, 2);
    assert_eq!(summary.renewals_due, 1);
    assert_eq!(summary.monthly_cost.total, Decimal::from_str("200").unwrap());
    assert_eq!(summary.monthly_cost.counted, 2);
    assert_eq!(summary.monthly_cost.unparsed, 1);
    assert_eq!(summary.count_for_status(SubscriptionStatus::Paid), 1);
    assert_eq!(summary.count_for_status(SubscriptionStatus::Approved), 2);
    assert_eq!(summary.count_for_status(SubscriptionStatus::Pending), 1);
    assert_eq!(summary.count_for_bucket(ExpiryBucket::Active), 2);
    assert_eq!(summary.count_for_bucket(ExpiryBucket::Expiring), 1);
    assert_eq!(summary.count_for_bucket(ExpiryBucket::Expired), 1);
    assert_eq!(summary.outstanding_loan_amount, Decimal::from(1000));
}

#[test]
fn test_every_status_is_one_of_four() {
    let markers = [None, Some(""), Some("no"), Some("2026-01-01"), Some("true")];
    for approval in markers {
        for payment in markers {
            for decision in [None, Some("Rejected"), Some("Approved")] {
                let a = approval.map(Flag::from);
                let p = payment.map(Flag::from);
                let status = derive_status(a.as_ref(), p.as_ref(), decision);
                assert!(SubscriptionStatus::ALL.contains(&status));
                // Pure: same inputs, same answer
                assert_eq!(status, derive_status(a.as_ref(), p.as_ref(), decision));
            }
        }
    }
}

#[test]
fn test_created_document_matches_submitted_fields() {
    let draft = DocumentDraft {
        document_name: "Shop Act License".into(),
        document_type: "License".into(),
        category: "Company".into(),
        owner_name: "Acme Pvt Ltd".into(),
        needs_renewal: true,
        renewal_date: Some(ymd(2027, 4, 1)),
        file: Some("https://files.example.com/shop-act.pdf".into()),
    };
    // What the backend echoes back on the next list fetch
    let mut echoed: serde_json::Value = serde_json::to_value(&draft).unwrap();
    echoed["id"] = 41.into();
    let record: DocumentRecord = serde_json::from_value(echoed).unwrap();
    let doc = Document::from(record);

    assert_eq!(doc.serial, "DOC-0041");
    assert_eq!(DocumentDraft { file: draft.file.clone(), ..DocumentDraft::from_document(&doc) }, draft);
    assert_eq!(doc.file_ref, draft.file);
}

#[test]
fn test_delete_removes_from_list_and_selection() {
    let mut snapshot = CacheSnapshot::default();
    snapshot.replace_documents(vec![document(1, None), document(2, None), document(3, None)]);
    let mut selection = Selection::new();
    selection.toggle_all([1, 2]);

    snapshot.remove_document(2);
    selection.retain_existing(snapshot.documents.iter().map(|d| d.id));

    assert!(snapshot.documents.iter().all(|d| d.id != 2));
    assert_eq!(selection.ids(), vec![1]);
}
