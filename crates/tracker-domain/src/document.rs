//! Document Entity
//!
//! Statutory and company documents with optional renewal dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::{days_until, parse_opt};
use crate::entity::{Entity, EntityKind};
use crate::error::{DomainError, DomainResult};
use crate::flag::{self, Flag};

/// Days before the renewal date at which a document counts as expiring
pub const EXPIRY_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentCategory {
    Personal,
    Company,
    Director,
}

impl DocumentCategory {
    pub const ALL: [DocumentCategory; 3] = [
        DocumentCategory::Personal,
        DocumentCategory::Company,
        DocumentCategory::Director,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentCategory::Personal => "Personal",
            DocumentCategory::Company => "Company",
            DocumentCategory::Director => "Director",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "personal" => Some(DocumentCategory::Personal),
            "company" => Some(DocumentCategory::Company),
            "director" => Some(DocumentCategory::Director),
            _ => None,
        }
    }
}

/// Document as the backend sends it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: u32,
    #[serde(alias = "documentName", alias = "name", default)]
    pub document_name: String,
    #[serde(alias = "documentType", default)]
    pub document_type: String,
    #[serde(default)]
    pub category: String,
    #[serde(alias = "ownerName", alias = "companyName", default)]
    pub owner_name: String,
    #[serde(alias = "needsRenewal", alias = "renewal", default)]
    pub needs_renewal: Option<Flag>,
    #[serde(alias = "renewalDate", default)]
    pub renewal_date: Option<String>,
    #[serde(alias = "fileUrl", alias = "file", default)]
    pub file_url: Option<String>,
    #[serde(alias = "createdAt", default)]
    pub created_at: Option<String>,
    #[serde(alias = "isDeleted", default)]
    pub deleted: Option<Flag>,
}

impl DocumentRecord {
    pub fn is_deleted(&self) -> bool {
        flag::is_set(self.deleted.as_ref())
    }
}

/// Document display shape
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Document {
    pub id: u32,
    pub serial: String,
    pub name: String,
    pub doc_type: String,
    pub category: Option<DocumentCategory>,
    pub owner: String,
    pub needs_renewal: bool,
    pub renewal_date: Option<NaiveDate>,
    pub file_ref: Option<String>,
    pub created_on: Option<NaiveDate>,
    pub status: String,
}

impl Entity for Document {
    const KIND: EntityKind = EntityKind::Document;

    fn id(&self) -> u32 {
        self.id
    }
}

impl From<DocumentRecord> for Document {
    fn from(record: DocumentRecord) -> Self {
        let needs_renewal = flag::is_set(record.needs_renewal.as_ref());
        let mut doc = Self {
            id: record.id,
            serial: String::new(),
            name: record.document_name.trim().to_string(),
            doc_type: record.document_type.trim().to_string(),
            category: DocumentCategory::parse(&record.category),
            owner: record.owner_name.trim().to_string(),
            needs_renewal,
            renewal_date: parse_opt(record.renewal_date.as_deref()),
            file_ref: record.file_url.filter(|f| !f.trim().is_empty()),
            created_on: parse_opt(record.created_at.as_deref()),
            status: "Active".to_string(),
        };
        doc.serial = doc.serial();
        doc
    }
}

impl Document {
    /// Map a fetched list, dropping soft-deleted rows
    pub fn from_records(records: Vec<DocumentRecord>) -> Vec<Document> {
        records
            .into_iter()
            .filter(|r| !r.is_deleted())
            .map(Document::from)
            .collect()
    }

    /// File name part of the file reference (URL or plain name)
    pub fn file_name(&self) -> Option<&str> {
        self.file_ref
            .as_deref()
            .map(|f| f.rsplit('/').next().unwrap_or(f))
            .filter(|f| !f.starts_with("data:"))
    }

    pub fn expiry(&self, today: NaiveDate) -> ExpiryBucket {
        expiry_bucket(self.renewal_date, today, EXPIRY_WINDOW_DAYS)
    }
}

/// Body of the add/edit document forms
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentDraft {
    pub document_name: String,
    pub document_type: String,
    pub category: String,
    pub owner_name: String,
    pub needs_renewal: bool,
    pub renewal_date: Option<NaiveDate>,
    /// Data URL of a newly picked file, or an already uploaded URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl DocumentDraft {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            document_name: doc.name.clone(),
            document_type: doc.doc_type.clone(),
            category: doc.category.map(|c| c.as_str().to_string()).unwrap_or_default(),
            owner_name: doc.owner.clone(),
            needs_renewal: doc.needs_renewal,
            renewal_date: doc.renewal_date,
            file: None,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.document_name.trim().is_empty() {
            return Err(DomainError::InvalidInput("document name is required".into()));
        }
        if DocumentCategory::parse(&self.category).is_none() {
            return Err(DomainError::InvalidInput(format!(
                "unknown category '{}'",
                self.category
            )));
        }
        if self.needs_renewal && self.renewal_date.is_none() {
            return Err(DomainError::InvalidInput(
                "renewal date is required when renewal is enabled".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenewDocumentRequest {
    pub renewal_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpiryBucket {
    Active,
    Expiring,
    Expired,
}

impl ExpiryBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpiryBucket::Active => "Active",
            ExpiryBucket::Expiring => "Expiring",
            ExpiryBucket::Expired => "Expired",
        }
    }

    /// Chart colour
    pub fn color(&self) -> &'static str {
        match self {
            ExpiryBucket::Active => "#27ae60",
            ExpiryBucket::Expiring => "#f39c12",
            ExpiryBucket::Expired => "#e74c3c",
        }
    }
}

/// No date → Active; past → Expired; within `window_days` (inclusive) → Expiring
pub fn expiry_bucket(renewal_date: Option<NaiveDate>, today: NaiveDate, window_days: i64) -> ExpiryBucket {
    let Some(date) = renewal_date else {
        return ExpiryBucket::Active;
    };
    let days = days_until(date, today);
    if days < 0 {
        ExpiryBucket::Expired
    } else if days <= window_days {
        ExpiryBucket::Expiring
    } else {
        ExpiryBucket::Active
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentSort {
    #[default]
    Newest,
    RenewalDate,
    Name,
}

/// Document list view state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentFilter {
    pub search: String,
    pub category: Option<DocumentCategory>,
    pub sort: DocumentSort,
}

impl DocumentFilter {
    fn matches(&self, doc: &Document) -> bool {
        if let Some(category) = self.category {
            if doc.category != Some(category) {
                return false;
            }
        }
        let query = self.search.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        [&doc.name, &doc.doc_type, &doc.owner, &doc.serial]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

pub fn filter_documents(docs: &[Document], filter: &DocumentFilter) -> Vec<Document> {
    let mut result: Vec<Document> = docs.iter().filter(|d| filter.matches(d)).cloned().collect();
    match filter.sort {
        DocumentSort::Newest => result.sort_by(|a, b| b.id.cmp(&a.id)),
        // Undated documents go last
        DocumentSort::RenewalDate => result.sort_by_key(|d| (d.renewal_date.is_none(), d.renewal_date)),
        DocumentSort::Name => result.sort_by_key(|d| d.name.to_lowercase()),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(id: u32, name: &str) -> DocumentRecord {
        DocumentRecord {
            id,
            document_name: name.to_string(),
            document_type: "License".to_string(),
            category: "company".to_string(),
            owner_name: "Acme Pvt Ltd".to_string(),
            needs_renewal: Some(Flag::from("Yes")),
            renewal_date: Some("2026-11-01".to_string()),
            file_url: Some("https://files.example.com/docs/license.pdf".to_string()),
            created_at: Some("2026-01-10T08:00:00Z".to_string()),
            deleted: None,
        }
    }

    #[test]
    fn test_document_from_record() {
        let doc = Document::from(record(12, " Trade License "));
        assert_eq!(doc.serial, "DOC-0012");
        assert_eq!(doc.name, "Trade License");
        assert_eq!(doc.category, Some(DocumentCategory::Company));
        assert!(doc.needs_renewal);
        assert_eq!(doc.renewal_date, Some(ymd(2026, 11, 1)));
        assert_eq!(doc.created_on, Some(ymd(2026, 1, 10)));
        assert_eq!(doc.status, "Active");
        assert_eq!(doc.file_name(), Some("license.pdf"));
    }

    #[test]
    fn test_document_record_accepts_camel_case() {
        let json = r#"{"id":3,"documentName":"PAN","documentType":"Tax","category":"Director",
            "ownerName":"R. Shah","needsRenewal":false,"renewalDate":null,"fileUrl":"pan.pdf"}"#;
        let doc = Document::from(serde_json::from_str::<DocumentRecord>(json).unwrap());
        assert_eq!(doc.name, "PAN");
        assert_eq!(doc.category, Some(DocumentCategory::Director));
        assert!(!doc.needs_renewal);
        assert_eq!(doc.renewal_date, None);
        assert_eq!(doc.file_name(), Some("pan.pdf"));
    }

    #[test]
    fn test_soft_deleted_records_dropped() {
        let mut gone = record(2, "Old");
        gone.deleted = Some(Flag::Bool(true));
        let docs = Document::from_records(vec![record(1, "Kept"), gone]);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, 1);
    }

    #[test]
    fn test_expiry_bucket_boundaries() {
        let today = ymd(2026, 10, 18);
        assert_eq!(expiry_bucket(None, today, 30), ExpiryBucket::Active);
        assert_eq!(expiry_bucket(Some(ymd(2026, 10, 17)), today, 30), ExpiryBucket::Expired);
        assert_eq!(expiry_bucket(Some(today), today, 30), ExpiryBucket::Expiring);
        assert_eq!(expiry_bucket(Some(ymd(2026, 11, 17)), today, 30), ExpiryBucket::Expiring);
        assert_eq!(expiry_bucket(Some(ymd(2026, 11, 18)), today, 30), ExpiryBucket::Active);
    }

    #[test]
    fn test_draft_validation() {
        let mut draft = DocumentDraft {
            document_name: "GST Certificate".into(),
            category: "Company".into(),
            ..Default::default()
        };
        assert!(draft.validate().is_ok());

        draft.needs_renewal = true;
        assert!(draft.validate().is_err());
        draft.renewal_date = Some(ymd(2027, 1, 1));
        assert!(draft.validate().is_ok());

        draft.category = "Vendor".into();
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_filter_and_sort() {
        let mut a = Document::from(record(1, "Zeta Lease"));
        a.renewal_date = None;
        let mut b = Document::from(record(2, "alpha permit"));
        b.renewal_date = Some(ymd(2027, 5, 1));
        let mut c = Document::from(record(3, "Beta NDA"));
        c.category = Some(DocumentCategory::Personal);
        c.renewal_date = Some(ymd(2026, 12, 1));
        let docs = vec![a, b, c];

        let newest = filter_documents(&docs, &DocumentFilter::default());
        assert_eq!(newest.iter().map(|d| d.id).collect::<Vec<_>>(), vec![3, 2, 1]);

        let by_date = filter_documents(&docs, &DocumentFilter { sort: DocumentSort::RenewalDate, ..Default::default() });
        assert_eq!(by_date.iter().map(|d| d.id).collect::<Vec<_>>(), vec![3, 2, 1]);

        let by_name = filter_documents(&docs, &DocumentFilter { sort: DocumentSort::Name, ..Default::default() });
        assert_eq!(by_name.iter().map(|d| d.id).collect::<Vec<_>>(), vec![2, 3, 1]);

        let personal = filter_documents(&docs, &DocumentFilter {
            category: Some(DocumentCategory::Personal),
            ..Default::default()
        });
        assert_eq!(personal.len(), 1);

        let search = filter_documents(&docs, &DocumentFilter { search: "doc-0002".into(), ..Default::default() });
        assert_eq!(search.len(), 1);
        assert_eq!(search[0].id, 2);
    }
}
