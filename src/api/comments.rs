use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::client::ApiClient;
use super::result::ApiResult;
use crate::models::{validate_comment, Comment};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddCommentBody<'a> {
    text: &'a str,
    user_id: i64,
}

/// `/warnings/{id}/comments` request group
pub struct CommentsApi<'a> {
    pub(super) client: &'a ApiClient,
}

impl CommentsApi<'_> {
    pub async fn get_by_warning_id(&self, warning_id: i64) -> ApiResult<Vec<Comment>> {
        let outcome = self
            .client
            .execute(self.client.get(&format!("/warnings/{}/comments", warning_id)))
            .await;
        ApiResult::from_outcome(outcome, "Failed to fetch comments")
    }

    /// Post a comment as `user_id`; blank text is rejected without a request
    pub async fn add(&self, warning_id: i64, text: &str, user_id: i64) -> ApiResult<Value> {
        let text = match validate_comment(text) {
            Ok(text) => text,
            Err(err) => {
                debug!(warning_id, error = %err, "Comment rejected before sending");
                return ApiResult::failure(err.to_string());
            }
        };

        let body = AddCommentBody {
            text: &text,
            user_id,
        };
        let outcome = self
            .client
            .execute(
                self.client
                    .post(&format!("/warnings/{}/comments", warning_id))
                    .json(&body),
            )
            .await;
        ApiResult::from_outcome(outcome, "Failed to add comment")
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{gateway_for, unreachable_gateway};
    use crate::models::Comment;
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_by_warning_id() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/warnings/5/comments");
                then.status(200).json_body(json!([{
                    "id": 30,
                    "warningId": 5,
                    "username": "li",
                    "text": "Same number called me",
                    "createdAt": "2024-02-01T10:00:00Z"
                }]));
            })
            .await;

        let result = gateway_for(&server).comments().get_by_warning_id(5).await;
        assert_eq!(
            result.data(),
            Some(&vec![Comment {
                id: 30,
                warning_id: Some(5),
                username: "li".to_string(),
                text: "Same number called me".to_string(),
                created_at: Some("2024-02-01T10:00:00Z".to_string()),
            }])
        );
    }

    #[tokio::test]
    async fn test_add_trims_text_and_sends_user_id() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/warnings/5/comments")
                    .json_body(json!({"text": "Reported it too", "userId": 3}));
                then.status(201).json_body(json!({"id": 31}));
            })
            .await;

        let result = gateway_for(&server)
            .comments()
            .add(5, "  Reported it too \n", 3)
            .await;

        mock.assert_async().await;
        assert_eq!(result.data(), Some(&json!({"id": 31})));
    }

    #[tokio::test]
    async fn test_blank_comment_never_reaches_network() {
        // An unreachable host would produce a transport error, so the
        // validation message proves no request was attempted.
        let result = unreachable_gateway().comments().add(5, "   \t ", 3).await;
        assert_eq!(result.error(), Some("Please enter a comment"));
    }

    #[tokio::test]
    async fn test_add_network_failure() {
        let result = unreachable_gateway().comments().add(5, "hello", 3).await;
        let error = result.error().unwrap_or_default();
        assert!(!error.is_empty());
        assert_ne!(error, "Please enter a comment");
    }
}
