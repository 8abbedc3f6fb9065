//! Loan Entity
//!
//! Loans carry a chain of closure steps: foreclosure → document collection → NOC →
//! final settlement. Each step is its own PUT; the stage shown is derived from flags.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::dates::parse_opt;
use crate::entity::{Entity, EntityKind};
use crate::error::{DomainError, DomainResult};
use crate::flag::{self, Flag};
use crate::money::parse_price;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LoanStage {
    Active,
    ForeclosureRequested,
    DocumentsCollected,
    NocCollected,
    Settled,
}

impl LoanStage {
    pub const ALL: [LoanStage; 5] = [
        LoanStage::Active,
        LoanStage::ForeclosureRequested,
        LoanStage::DocumentsCollected,
        LoanStage::NocCollected,
        LoanStage::Settled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStage::Active => "Active",
            LoanStage::ForeclosureRequested => "Foreclosure Requested",
            LoanStage::DocumentsCollected => "Documents Collected",
            LoanStage::NocCollected => "NOC Collected",
            LoanStage::Settled => "Settled",
        }
    }

    /// Step that moves a loan out of this stage
    pub fn next_action(&self) -> Option<LoanAction> {
        match self {
            LoanStage::Active => Some(LoanAction::Foreclose),
            LoanStage::ForeclosureRequested => Some(LoanAction::CollectDocuments),
            LoanStage::DocumentsCollected => Some(LoanAction::CollectNoc),
            LoanStage::NocCollected => Some(LoanAction::Settle),
            LoanStage::Settled => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanAction {
    Foreclose,
    CollectDocuments,
    CollectNoc,
    Settle,
}

impl LoanAction {
    pub fn label(&self) -> &'static str {
        match self {
            LoanAction::Foreclose => "Request Foreclosure",
            LoanAction::CollectDocuments => "Collect Documents",
            LoanAction::CollectNoc => "Collect NOC",
            LoanAction::Settle => "Final Settlement",
        }
    }

    /// Path segment under `/loans/{id}/`
    pub fn path(&self) -> &'static str {
        match self {
            LoanAction::Foreclose => "foreclosure",
            LoanAction::CollectDocuments => "documents",
            LoanAction::CollectNoc => "noc",
            LoanAction::Settle => "settlement",
        }
    }
}

/// Checked from the most advanced step down, like subscription status.
pub fn derive_stage(
    foreclosure: Option<&Flag>,
    documents: Option<&Flag>,
    noc: Option<&Flag>,
    settlement: Option<&Flag>,
) -> LoanStage {
    if flag::is_set(settlement) {
        LoanStage::Settled
    } else if flag::is_set(noc) {
        LoanStage::NocCollected
    } else if flag::is_set(documents) {
        LoanStage::DocumentsCollected
    } else if flag::is_set(foreclosure) {
        LoanStage::ForeclosureRequested
    } else {
        LoanStage::Active
    }
}

/// Loan as the backend sends it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub id: u32,
    #[serde(alias = "loanName", default)]
    pub loan_name: String,
    #[serde(alias = "bankName", default)]
    pub bank_name: String,
    #[serde(default, deserialize_with = "flag::text_or_number")]
    pub amount: Option<String>,
    #[serde(default, deserialize_with = "flag::text_or_number")]
    pub emi: Option<String>,
    #[serde(alias = "startDate", default)]
    pub start_date: Option<String>,
    #[serde(alias = "endDate", default)]
    pub end_date: Option<String>,
    #[serde(alias = "providedDocumentName", alias = "providedDocument", default)]
    pub provided_document: Option<String>,
    #[serde(alias = "uploadedFile", alias = "fileUrl", default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,

    #[serde(alias = "foreclosureStatus", default)]
    pub foreclosure_status: Option<Flag>,
    #[serde(alias = "foreclosureDate", default)]
    pub foreclosure_date: Option<String>,
    #[serde(alias = "foreclosureRequestedBy", default)]
    pub foreclosure_requested_by: Option<String>,

    #[serde(alias = "documentCollectionStatus", default)]
    pub document_collection_status: Option<Flag>,
    #[serde(alias = "documentCollectionDate", default)]
    pub document_collection_date: Option<String>,
    #[serde(alias = "documentCollectedBy", default)]
    pub document_collected_by: Option<String>,

    #[serde(alias = "nocStatus", default)]
    pub noc_status: Option<Flag>,
    #[serde(alias = "nocDate", default)]
    pub noc_date: Option<String>,
    #[serde(alias = "nocCollectedBy", default)]
    pub noc_collected_by: Option<String>,

    #[serde(alias = "settlementStatus", alias = "finalSettlementStatus", default)]
    pub settlement_status: Option<Flag>,
    #[serde(alias = "settlementDate", default)]
    pub settlement_date: Option<String>,
    #[serde(alias = "settledBy", default)]
    pub settled_by: Option<String>,
}

/// One closure step as displayed
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoanStep {
    pub done: bool,
    pub date: Option<NaiveDate>,
    pub by: Option<String>,
}

impl LoanStep {
    fn from_parts(status: Option<&Flag>, date: Option<&str>, by: Option<String>) -> Self {
        Self {
            done: flag::is_set(status),
            date: parse_opt(date),
            by: by.filter(|b| !b.trim().is_empty()),
        }
    }
}

/// Loan display shape
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Loan {
    pub id: u32,
    pub serial: String,
    pub name: String,
    pub bank: String,
    pub amount: String,
    pub amount_value: Option<Decimal>,
    pub emi: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub provided_document: Option<String>,
    pub file_ref: Option<String>,
    pub remarks: Option<String>,
    pub foreclosure: LoanStep,
    pub documents: LoanStep,
    pub noc: LoanStep,
    pub settlement: LoanStep,
    pub stage: LoanStage,
}

impl Entity for Loan {
    const KIND: EntityKind = EntityKind::Loan;

    fn id(&self) -> u32 {
        self.id
    }
}

impl From<LoanRecord> for Loan {
    fn from(record: LoanRecord) -> Self {
        let stage = derive_stage(
            record.foreclosure_status.as_ref(),
            record.document_collection_status.as_ref(),
            record.noc_status.as_ref(),
            record.settlement_status.as_ref(),
        );
        let amount = record.amount.unwrap_or_default().trim().to_string();
        let mut loan = Self {
            id: record.id,
            serial: String::new(),
            name: record.loan_name.trim().to_string(),
            bank: record.bank_name.trim().to_string(),
            amount_value: parse_price(&amount),
            amount,
            emi: record.emi.unwrap_or_default().trim().to_string(),
            start_date: parse_opt(record.start_date.as_deref()),
            end_date: parse_opt(record.end_date.as_deref()),
            provided_document: record.provided_document.filter(|d| !d.trim().is_empty()),
            file_ref: record.file_url.filter(|f| !f.trim().is_empty()),
            remarks: record.remarks.filter(|r| !r.trim().is_empty()),
            foreclosure: LoanStep::from_parts(
                record.foreclosure_status.as_ref(),
                record.foreclosure_date.as_deref(),
                record.foreclosure_requested_by,
            ),
            documents: LoanStep::from_parts(
                record.document_collection_status.as_ref(),
                record.document_collection_date.as_deref(),
                record.document_collected_by,
            ),
            noc: LoanStep::from_parts(
                record.noc_status.as_ref(),
                record.noc_date.as_deref(),
                record.noc_collected_by,
            ),
            settlement: LoanStep::from_parts(
                record.settlement_status.as_ref(),
                record.settlement_date.as_deref(),
                record.settled_by,
            ),
            stage,
        };
        loan.serial = loan.serial();
        loan
    }
}

impl Loan {
    pub fn next_action(&self) -> Option<LoanAction> {
        self.stage.next_action()
    }
}

/// Body of the add loan form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanDraft {
    pub loan_name: String,
    pub bank_name: String,
    pub amount: String,
    pub emi: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub provided_document: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub remarks: String,
}

impl LoanDraft {
    pub fn validate(&self) -> DomainResult<()> {
        if self.loan_name.trim().is_empty() && self.bank_name.trim().is_empty() {
            return Err(DomainError::InvalidInput("loan or bank name is required".into()));
        }
        if parse_price(&self.amount).is_none() {
            return Err(DomainError::InvalidInput("amount must contain a number".into()));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(DomainError::InvalidInput("end date is before start date".into()));
            }
        }
        Ok(())
    }
}

/// Body of every closure step PUT
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowStepRequest {
    pub date: NaiveDate,
    pub requested_by: String,
    pub remarks: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set() -> Flag {
        Flag::from("Yes")
    }

    #[test]
    fn test_derive_stage_checks_most_advanced_first() {
        assert_eq!(derive_stage(None, None, None, None), LoanStage::Active);
        assert_eq!(derive_stage(Some(&set()), None, None, None), LoanStage::ForeclosureRequested);
        assert_eq!(derive_stage(Some(&set()), Some(&set()), None, None), LoanStage::DocumentsCollected);
        assert_eq!(derive_stage(None, None, Some(&set()), None), LoanStage::NocCollected);
        assert_eq!(derive_stage(None, None, None, Some(&set())), LoanStage::Settled);
    }

    #[test]
    fn test_next_action_chain() {
        let mut stage = LoanStage::Active;
        let mut steps = Vec::new();
        while let Some(action) = stage.next_action() {
            steps.push(action.path());
            stage = LoanStage::ALL[LoanStage::ALL.iter().position(|s| *s == stage).unwrap() + 1];
        }
        assert_eq!(steps, vec!["foreclosure", "documents", "noc", "settlement"]);
        assert_eq!(stage, LoanStage::Settled);
    }

    #[test]
    fn test_loan_from_record() {
        let json = r#"{"id":4,"loanName":"Car Loan","bankName":"HDFC","amount":"₹8,00,000",
            "emi":16500,"startDate":"2024-01-05","endDate":"2029-01-05",
            "foreclosureStatus":"Done","foreclosureDate":"2026-09-01","foreclosureRequestedBy":"Priya",
            "nocStatus":"","remarks":"  "}"#;
        let loan = Loan::from(serde_json::from_str::<LoanRecord>(json).unwrap());
        assert_eq!(loan.serial, "LN-0004");
        assert_eq!(loan.stage, LoanStage::ForeclosureRequested);
        assert_eq!(loan.amount_value, Some(Decimal::from(800000)));
        assert_eq!(loan.emi, "16500");
        assert!(loan.foreclosure.done);
        assert_eq!(loan.foreclosure.by.as_deref(), Some("Priya"));
        assert!(!loan.noc.done);
        assert_eq!(loan.remarks, None);
        assert_eq!(loan.next_action(), Some(LoanAction::CollectDocuments));
    }

    #[test]
    fn test_draft_validation() {
        let mut draft = LoanDraft {
            bank_name: "SBI".into(),
            amount: "5,00,000".into(),
            ..Default::default()
        };
        assert!(draft.validate().is_ok());
        draft.amount = "TBD".into();
        assert!(draft.validate().is_err());
    }
}
