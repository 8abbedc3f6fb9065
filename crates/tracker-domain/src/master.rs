//! Master Lookups
//!
//! Known (company, document type, category) tuples backing the typeahead fields.
//! Append-only and deduplicated on the client.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterEntry {
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub document_type: String,
    #[serde(default)]
    pub category: String,
}

impl MasterEntry {
    pub fn new(company_name: &str, document_type: &str, category: &str) -> Self {
        Self {
            company_name: company_name.trim().to_string(),
            document_type: document_type.trim().to_string(),
            category: category.trim().to_string(),
        }
    }

    fn key(&self) -> (String, String, String) {
        (
            self.company_name.trim().to_lowercase(),
            self.document_type.trim().to_lowercase(),
            self.category.trim().to_lowercase(),
        )
    }

    pub fn is_blank(&self) -> bool {
        self.company_name.trim().is_empty()
            && self.document_type.trim().is_empty()
            && self.category.trim().is_empty()
    }

    pub fn get(&self, field: MasterField) -> &str {
        match field {
            MasterField::CompanyName => &self.company_name,
            MasterField::DocumentType => &self.document_type,
            MasterField::Category => &self.category,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MasterField {
    CompanyName,
    DocumentType,
    Category,
}

/// Append `incoming` entries not already present (case/whitespace-insensitive).
/// Returns how many were added.
pub fn merge_master(existing: &mut Vec<MasterEntry>, incoming: impl IntoIterator<Item = MasterEntry>) -> usize {
    let mut added = 0;
    for entry in incoming {
        if entry.is_blank() {
            continue;
        }
        let key = entry.key();
        if existing.iter().any(|e| e.key() == key) {
            continue;
        }
        existing.push(entry);
        added += 1;
    }
    added
}

/// Distinct non-empty values of one column, sorted case-insensitively
pub fn distinct_values(entries: &[MasterEntry], field: MasterField) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for entry in entries {
        let value = entry.get(field).trim();
        if value.is_empty() {
            continue;
        }
        if !values.iter().any(|v| v.eq_ignore_ascii_case(value)) {
            values.push(value.to_string());
        }
    }
    values.sort_by_key(|v| v.to_lowercase());
    values
}

/// Simple fuzzy match: check if query chars appear in order in the target
pub fn fuzzy_match(query: &str, target: &str) -> bool {
    let query = query.to_lowercase();
    let target = target.to_lowercase();

    let mut target_chars = target.chars();
    for query_char in query.chars() {
        loop {
            match target_chars.next() {
                Some(c) if c == query_char => break,
                Some(_) => continue,
                None => return false,
            }
        }
    }
    true
}

/// Up to `limit` values fuzzy-matching `query`; exact prefix matches first
pub fn suggestions(values: &[String], query: &str, limit: usize) -> Vec<String> {
    let query = query.trim();
    if query.is_empty() {
        return vec![];
    }
    let lowered = query.to_lowercase();
    let mut matched: Vec<&String> = values.iter().filter(|v| fuzzy_match(query, v)).collect();
    matched.sort_by_key(|v| !v.to_lowercase().starts_with(&lowered));
    matched.into_iter().take(limit).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_dedupes_case_insensitively() {
        let mut master = vec![MasterEntry::new("Acme Pvt Ltd", "GST", "Company")];
        let added = merge_master(
            &mut master,
            vec![
                MasterEntry::new(" acme pvt ltd ", "gst", "company"),
                MasterEntry::new("Acme Pvt Ltd", "PAN", "Company"),
                MasterEntry::default(),
                MasterEntry::new("Acme Pvt Ltd", "PAN", "Company"),
            ],
        );
        assert_eq!(added, 1);
        assert_eq!(master.len(), 2);
        assert_eq!(master[1].document_type, "PAN");
    }

    #[test]
    fn test_distinct_values() {
        let master = vec![
            MasterEntry::new("Zen Corp", "GST", "Company"),
            MasterEntry::new("acme", "PAN", "Director"),
            MasterEntry::new("ZEN CORP", "", "Company"),
        ];
        assert_eq!(distinct_values(&master, MasterField::CompanyName), vec!["acme", "Zen Corp"]);
        assert_eq!(distinct_values(&master, MasterField::DocumentType), vec!["GST", "PAN"]);
    }

    #[test]
    fn test_fuzzy_match() {
        assert!(fuzzy_match("gst", "GST Certificate"));
        assert!(fuzzy_match("tl", "Trade License"));
        assert!(!fuzzy_match("xyz", "Trade License"));
        assert!(fuzzy_match("", "anything"));
    }

    #[test]
    fn test_suggestions_prefer_prefix() {
        let values = vec!["Bank Guarantee".to_string(), "Aadhaar".to_string(), "Board Resolution".to_string()];
        assert_eq!(suggestions(&values, "b", 5), vec!["Bank Guarantee", "Board Resolution"]);
        assert_eq!(suggestions(&values, "a", 1), vec!["Aadhaar"]);
        assert!(suggestions(&values, "  ", 5).is_empty());
    }
}
