//! Subscription Commands
//!
//! Bindings for `/subscriptions` and its workflow transitions.

use serde::de::IgnoredAny;
use tracker_domain::{
    ApprovalRequest, PaymentRequest, RenewSubscriptionRequest, SubscriptionDraft, SubscriptionRecord,
};

use super::{get_json, post_json, put_json, ApiResult};

pub async fn list_subscriptions() -> ApiResult<Vec<SubscriptionRecord>> {
    get_json("/subscriptions").await
}

pub async fn create_subscription(draft: &SubscriptionDraft) -> ApiResult<()> {
    post_json::<_, IgnoredAny>("/subscriptions", draft).await?;
    Ok(())
}

/// Approve or reject (`approved: false`) a pending request
pub async fn decide_subscription(id: u32, request: &ApprovalRequest) -> ApiResult<()> {
    put_json::<_, IgnoredAny>(&format!("/subscriptions/{}/approval", id), request).await?;
    Ok(())
}

pub async fn pay_subscription(id: u32, request: &PaymentRequest) -> ApiResult<()> {
    put_json::<_, IgnoredAny>(&format!("/subscriptions/{}/payment", id), request).await?;
    Ok(())
}

pub async fn renew_subscription(id: u32, request: &RenewSubscriptionRequest) -> ApiResult<()> {
    put_json::<_, IgnoredAny>(&format!("/subscriptions/{}/renew", id), request).await?;
    Ok(())
}
