//! Auth Commands

use tracker_domain::{LoginRequest, Session};

use super::{post_json, ApiResult};

pub async fn login(username: &str, password: &str) -> ApiResult<Session> {
    let body = LoginRequest {
        username: username.trim().to_string(),
        password: password.to_string(),
    };
    post_json("/auth/login", &body).await
}
