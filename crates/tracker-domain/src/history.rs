//! Share / Renewal History
//!
//! Audit trail generated on this device. The backend entity stays the source of truth.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::entity::{Entity, EntityKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShareChannel {
    Email,
    WhatsApp,
}

impl ShareChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShareChannel::Email => "Email",
            ShareChannel::WhatsApp => "WhatsApp",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareRecord {
    pub kind: EntityKind,
    pub entity_id: u32,
    pub serial: String,
    pub channel: ShareChannel,
    pub recipient: String,
    pub shared_at: DateTime<Utc>,
}

impl ShareRecord {
    pub fn new<E: Entity>(entity: &E, channel: ShareChannel, recipient: &str, now: DateTime<Utc>) -> Self {
        Self {
            kind: E::KIND,
            entity_id: entity.id(),
            serial: entity.serial(),
            channel,
            recipient: recipient.trim().to_string(),
            shared_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenewalRecord {
    pub document_id: u32,
    pub serial: String,
    pub old_file: Option<String>,
    pub new_file: Option<String>,
    pub old_date: Option<NaiveDate>,
    pub new_date: NaiveDate,
    pub renewed_at: DateTime<Utc>,
}

impl RenewalRecord {
    /// `new_file` is `None` when the file was kept; data URLs are not stored
    pub fn new(doc: &Document, new_date: NaiveDate, new_file: Option<&str>, now: DateTime<Utc>) -> Self {
        Self {
            document_id: doc.id,
            serial: doc.serial.clone(),
            old_file: doc.file_name().map(str::to_string),
            new_file: new_file.map(display_file_name),
            old_date: doc.renewal_date,
            new_date,
            renewed_at: now,
        }
    }
}

fn display_file_name(file: &str) -> String {
    if file.starts_with("data:") {
        "uploaded file".to_string()
    } else {
        file.rsplit('/').next().unwrap_or(file).to_string()
    }
}
