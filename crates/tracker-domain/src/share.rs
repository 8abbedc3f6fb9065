//! Share Links
//!
//! Builds `mailto:` and WhatsApp click-to-chat links for a document.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::dates::format_date;
use crate::document::Document;
use crate::history::ShareChannel;

#[derive(Debug, Clone, PartialEq)]
pub struct ShareMessage {
    pub subject: String,
    pub body: String,
}

impl ShareMessage {
    pub fn for_document(doc: &Document) -> Self {
        let mut body = format!("{} ({})\nType: {}\nOwner: {}", doc.name, doc.serial, doc.doc_type, doc.owner);
        if let Some(date) = doc.renewal_date {
            body.push_str(&format!("\nRenewal date: {}", format_date(Some(date))));
        }
        if let Some(file) = doc.file_ref.as_deref().filter(|f| f.starts_with("http")) {
            body.push_str(&format!("\nFile: {}", file));
        }
        Self {
            subject: format!("Document: {}", doc.name),
            body,
        }
    }
}

fn encode(text: &str) -> String {
    utf8_percent_encode(text, NON_ALPHANUMERIC).to_string()
}

/// Link that opens the user's mail client or WhatsApp with the message filled in
pub fn share_link(channel: ShareChannel, recipient: &str, message: &ShareMessage) -> String {
    match channel {
        ShareChannel::Email => format!(
            "mailto:{}?subject={}&body={}",
            recipient.trim(),
            encode(&message.subject),
            encode(&message.body)
        ),
        ShareChannel::WhatsApp => {
            let phone: String = recipient.chars().filter(|c| c.is_ascii_digit()).collect();
            format!("https://wa.me/{}?text={}", phone, encode(&message.body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn doc() -> Document {
        Document {
            id: 5,
            serial: "DOC-0005".into(),
            name: "Fire NOC".into(),
            doc_type: "Certificate".into(),
            category: None,
            owner: "Acme & Sons".into(),
            needs_renewal: true,
            renewal_date: NaiveDate::from_ymd_opt(2027, 3, 1),
            file_ref: Some("https://files.example.com/fire.pdf".into()),
            created_on: None,
            status: "Active".into(),
        }
    }

    #[test]
    fn test_message_contents() {
        let msg = ShareMessage::for_document(&doc());
        assert_eq!(msg.subject, "Document: Fire NOC");
        assert!(msg.body.contains("DOC-0005"));
        assert!(msg.body.contains("01 Mar 2027"));
        assert!(msg.body.contains("https://files.example.com/fire.pdf"));
    }

    #[test]
    fn test_email_link_is_encoded() {
        let link = share_link(ShareChannel::Email, " ops@example.com ", &ShareMessage::for_document(&doc()));
        assert!(link.starts_with("mailto:ops@example.com?subject=Document%3A%20Fire%20NOC&body="));
        assert!(link.contains("Acme%20%26%20Sons"));
        assert!(!link.contains('\n'));
    }

    #[test]
    fn test_whatsapp_link_keeps_digits() {
        let link = share_link(ShareChannel::WhatsApp, "+91 98765-43210", &ShareMessage::for_document(&doc()));
        assert!(link.starts_with("https://wa.me/919876543210?text=Fire%20NOC"));
    }
}
