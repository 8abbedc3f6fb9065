//! Master Lookup Commands

use serde::de::IgnoredAny;
use tracker_domain::MasterEntry;

use super::{get_json, post_json, ApiResult};

pub async fn list_master() -> ApiResult<Vec<MasterEntry>> {
    get_json("/master").await
}

pub async fn add_master(entry: &MasterEntry) -> ApiResult<()> {
    post_json::<_, IgnoredAny>("/master", entry).await?;
    Ok(())
}
