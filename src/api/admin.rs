use serde_json::Value;

use super::client::ApiClient;
use super::result::ApiResult;
use crate::models::{Warning, WarningUpdate};

/// `/admin` request group
///
/// The acting user's id travels as the `userId` query parameter; the service
/// decides whether that user may moderate.
pub struct AdminApi<'a> {
    pub(super) client: &'a ApiClient,
}

impl AdminApi<'_> {
    pub async fn verify_admin(&self, user_id: i64) -> ApiResult<Value> {
        let outcome = self
            .client
            .execute(self.client.get(&format!("/admin/verify/{}", user_id)))
            .await;
        ApiResult::from_outcome(outcome, "Failed to verify admin")
    }

    /// Every warning regardless of status
    pub async fn get_all_warnings(&self, user_id: i64) -> ApiResult<Vec<Warning>> {
        let outcome = self
            .client
            .execute(self.client.get("/admin/warnings").query(&[("userId", user_id)]))
            .await;
        ApiResult::from_outcome(outcome, "Failed to fetch warnings")
    }

    pub async fn delete_warning(&self, warning_id: i64, user_id: i64) -> ApiResult<Value> {
        let outcome = self
            .client
            .execute(
                self.client
                    .delete(&format!("/admin/warnings/{}", warning_id))
                    .query(&[("userId", user_id)]),
            )
            .await;
        ApiResult::from_outcome(outcome, "Failed to delete warning")
    }

    pub async fn update_warning(
        &self,
        warning_id: i64,
        update: &WarningUpdate,
        user_id: i64,
    ) -> ApiResult<Value> {
        let outcome = self
            .client
            .execute(
                self.client
                    .put(&format!("/admin/warnings/{}", warning_id))
                    .query(&[("userId", user_id)])
                    .json(update),
            )
            .await;
        ApiResult::from_outcome(outcome, "Failed to update warning")
    }

    pub async fn delete_comment(&self, comment_id: i64, user_id: i64) -> ApiResult<Value> {
        let outcome = self
            .client
            .execute(
                self.client
                    .delete(&format!("/admin/comments/{}", comment_id))
                    .query(&[("userId", user_id)]),
            )
            .await;
        ApiResult::from_outcome(outcome, "Failed to delete comment")
    }

    pub async fn approve_warning(&self, warning_id: i64, user_id: i64) -> ApiResult<Value> {
        self.moderate(warning_id, "approve", user_id, "Failed to approve warning")
            .await
    }

    pub async fn reject_warning(&self, warning_id: i64, user_id: i64) -> ApiResult<Value> {
        self.moderate(warning_id, "reject", user_id, "Failed to reject warning")
            .await
    }

    async fn moderate(
        &self,
        warning_id: i64,
        action: &str,
        user_id: i64,
        fallback: &str,
    ) -> ApiResult<Value> {
        let outcome = self
            .client
            .execute(
                self.client
                    .put(&format!("/admin/warnings/{}/{}", warning_id, action))
                    .query(&[("userId", user_id)]),
            )
            .await;
        ApiResult::from_outcome(outcome, fallback)
    }
}
