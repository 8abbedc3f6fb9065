//! Document Commands
//!
//! Bindings for `/documents`.

use serde::de::IgnoredAny;
use tracker_domain::{DocumentDraft, DocumentRecord, RenewDocumentRequest};

use super::{delete, get_json, post_json, put_json, ApiResult};

pub async fn list_documents() -> ApiResult<Vec<DocumentRecord>> {
    get_json("/documents").await
}

pub async fn create_document(draft: &DocumentDraft) -> ApiResult<()> {
    post_json::<_, IgnoredAny>("/documents", draft).await?;
    Ok(())
}

pub async fn update_document(id: u32, draft: &DocumentDraft) -> ApiResult<()> {
    put_json::<_, IgnoredAny>(&format!("/documents/{}", id), draft).await?;
    Ok(())
}

pub async fn renew_document(id: u32, request: &RenewDocumentRequest) -> ApiResult<()> {
    put_json::<_, IgnoredAny>(&format!("/documents/{}/renew", id), request).await?;
    Ok(())
}

/// Soft delete on the backend; the row stops appearing in `list_documents`
pub async fn delete_document(id: u32) -> ApiResult<()> {
    delete(&format!("/documents/{}", id)).await
}
