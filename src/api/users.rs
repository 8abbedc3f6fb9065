//! Settings / User Commands
//!
//! Bindings for `/settings/users`. Admin only on the backend as well.

use serde::de::IgnoredAny;
use tracker_domain::{User, UserDraft};

use super::{delete, get_json, post_json, put_json, ApiResult};

pub async fn list_users() -> ApiResult<Vec<User>> {
    get_json("/settings/users").await
}

pub async fn create_user(draft: &UserDraft) -> ApiResult<()> {
    post_json::<_, IgnoredAny>("/settings/users", draft).await?;
    Ok(())
}

pub async fn update_user(id: u32, draft: &UserDraft) -> ApiResult<()> {
    put_json::<_, IgnoredAny>(&format!("/settings/users/{}", id), draft).await?;
    Ok(())
}

pub async fn delete_user(id: u32) -> ApiResult<()> {
    delete(&format!("/settings/users/{}", id)).await
}
