//! Tracker Domain Layer
//!
//! Wire records, display models and every derivation rule the UI relies on.
//! This crate has NO browser dependencies so the rules can be tested on the host.

mod error;
mod entity;
mod dates;
mod flag;
mod money;
mod document;
mod subscription;
mod loan;
mod master;
mod history;
mod share;
mod user;
mod selection;
mod dashboard;
mod cache;

#[cfg(test)]
mod tests;

pub use error::{DomainError, DomainResult};
pub use entity::{Entity, EntityKind, serial_number};
pub use dates::{parse_date, format_date, days_until};
pub use flag::Flag;
pub use money::{parse_price, format_amount};
pub use document::{
    Document, DocumentRecord, DocumentCategory, DocumentDraft, DocumentFilter, DocumentSort,
    ExpiryBucket, RenewDocumentRequest, EXPIRY_WINDOW_DAYS, expiry_bucket, filter_documents,
};
pub use subscription::{
    Subscription, SubscriptionRecord, SubscriptionStatus, SubscriptionDraft, Frequency,
    ApprovalRequest, PaymentRequest, RenewSubscriptionRequest, RENEWAL_WINDOW_DAYS, derive_status,
    due_for_renewal, renewal_candidates,
};
pub use loan::{
    Loan, LoanRecord, LoanDraft, LoanStage, LoanStep, LoanAction, WorkflowStepRequest, derive_stage,
};
pub use master::{MasterEntry, MasterField, merge_master, distinct_values, fuzzy_match, suggestions};
pub use history::{ShareRecord, ShareChannel, RenewalRecord};
pub use share::{ShareMessage, share_link};
pub use user::{User, UserRole, UserDraft, Page, Session, LoginRequest, MODULES};
pub use selection::Selection;
pub use dashboard::{DashboardSummary, MonthlyCost, summarize};
pub use cache::{CacheSnapshot, KeyValueStorage, MemoryStorage, CACHE_KEY};
