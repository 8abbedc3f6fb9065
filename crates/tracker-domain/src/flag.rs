//! Boolean-like backend markers
//!
//! Completion markers come back as booleans, numbers, timestamps or "Yes"/"No" text
//! depending on which sheet/column produced them.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Number(i64),
    Float(f64),
    Text(String),
}

impl Flag {
    pub fn is_set(&self) -> bool {
        match self {
            Flag::Bool(b) => *b,
            Flag::Number(n) => *n != 0,
            Flag::Float(f) => *f != 0.0,
            Flag::Text(s) => text_is_set(s),
        }
    }

    /// Textual value, for markers that also carry a date or decision
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Flag::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<bool> for Flag {
    fn from(b: bool) -> Self {
        Flag::Bool(b)
    }
}

impl From<&str> for Flag {
    fn from(s: &str) -> Self {
        Flag::Text(s.to_string())
    }
}

fn text_is_set(raw: &str) -> bool {
    let value = raw.trim().to_lowercase();
    !matches!(value.as_str(), "" | "false" | "0" | "no" | "null")
}

/// Optional marker helper used by every status derivation
pub fn is_set(flag: Option<&Flag>) -> bool {
    flag.map(Flag::is_set).unwrap_or(false)
}

/// Free-text field that some rows send as a JSON number (prices, amounts)
pub(crate) fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Flag>::deserialize(deserializer)?;
    Ok(value.map(|flag| match flag {
        Flag::Text(s) => s,
        Flag::Number(n) => n.to_string(),
        Flag::Float(f) => f.to_string(),
        Flag::Bool(b) => b.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_markers() {
        assert!(Flag::from("2026-10-01").is_set());
        assert!(Flag::from("Yes").is_set());
        assert!(!Flag::from("  ").is_set());
        assert!(!Flag::from("FALSE").is_set());
        assert!(!Flag::from("null").is_set());
        assert!(!Flag::from("No").is_set());
    }

    #[test]
    fn test_untagged_deserialization() {
        let flags: Vec<Flag> = serde_json::from_str(r#"[true, 0, "done"]"#).unwrap();
        assert_eq!(flags, vec![Flag::Bool(true), Flag::Number(0), Flag::from("done")]);
        assert!(flags[0].is_set());
        assert!(!flags[1].is_set());
        assert!(flags[2].is_set());
    }

    #[test]
    fn test_missing_marker_is_unset() {
        assert!(!is_set(None));
    }
}
