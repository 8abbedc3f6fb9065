//! Core Entity Trait
//!
//! Every tracked entity has a numeric backend id and a serial number derived from it.

use serde::{Deserialize, Serialize};

/// Core trait for all tracked entities
pub trait Entity: Sized + Clone {
    const KIND: EntityKind;

    /// Backend-assigned identifier
    fn id(&self) -> u32;

    /// Display serial, always derived from the id
    fn serial(&self) -> String {
        serial_number(Self::KIND, self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Document,
    Subscription,
    Loan,
}

impl EntityKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            EntityKind::Document => "DOC",
            EntityKind::Subscription => "SUB",
            EntityKind::Loan => "LN",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Document => "Document",
            EntityKind::Subscription => "Subscription",
            EntityKind::Loan => "Loan",
        }
    }
}

/// `DOC-0007`, `SUB-0142`, `LN-12345` (ids wider than four digits print in full)
pub fn serial_number(kind: EntityKind, id: u32) -> String {
    format!("{}-{:04}", kind.prefix(), id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_number_padding() {
        assert_eq!(serial_number(EntityKind::Document, 7), "DOC-0007");
        assert_eq!(serial_number(EntityKind::Subscription, 142), "SUB-0142");
        assert_eq!(serial_number(EntityKind::Loan, 12345), "LN-12345");
    }

    #[test]
    fn test_serial_is_deterministic() {
        assert_eq!(
            serial_number(EntityKind::Loan, 3),
            serial_number(EntityKind::Loan, 3)
        );
    }
}
