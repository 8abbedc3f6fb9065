//! Loan Commands
//!
//! Bindings for `/loans` and the closure steps.

use serde::de::IgnoredAny;
use tracker_domain::{LoanAction, LoanDraft, LoanRecord, WorkflowStepRequest};

use super::{get_json, post_json, put_json, ApiResult};

pub async fn list_loans() -> ApiResult<Vec<LoanRecord>> {
    get_json("/loans").await
}

pub async fn create_loan(draft: &LoanDraft) -> ApiResult<()> {
    post_json::<_, IgnoredAny>("/loans", draft).await?;
    Ok(())
}

/// `PUT /loans/{id}/{foreclosure|documents|noc|settlement}`
pub async fn advance_loan(id: u32, action: LoanAction, request: &WorkflowStepRequest) -> ApiResult<()> {
    put_json::<_, IgnoredAny>(&format!("/loans/{}/{}", id, action.path()), request).await?;
    Ok(())
}
