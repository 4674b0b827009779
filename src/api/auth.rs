use serde::Serialize;
use serde_json::Value;

use super::client::ApiClient;
use super::result::ApiResult;
use crate::models::Session;

#[derive(Serialize)]
struct RegisterBody<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

/// `/auth` request group
pub struct AuthApi<'a> {
    pub(super) client: &'a ApiClient,
}

impl AuthApi<'_> {
    /// Create an account; the caller logs in separately afterwards
    pub async fn register(&self, username: &str, email: &str, password: &str) -> ApiResult<Value> {
        let body = RegisterBody {
            username,
            email,
            password,
        };
        let outcome = self
            .client
            .execute(self.client.post("/auth/register").json(&body))
            .await;
        ApiResult::from_outcome(outcome, "Registration failed")
    }

    /// Exchange credentials for the user's identity
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<Session> {
        let body = LoginBody { email, password };
        let outcome = self
            .client
            .execute(self.client.post("/auth/login").json(&body))
            .await;
        ApiResult::from_outcome(outcome, "Login failed")
    }
}
