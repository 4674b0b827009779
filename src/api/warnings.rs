use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::client::ApiClient;
use super::result::ApiResult;
use crate::models::{NewWarning, Warning};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateWarningBody<'a> {
    title: &'a str,
    description: &'a str,
    warning_signs: &'a str,
    category_id: Option<i64>,
    user_id: i64,
}

/// `/warnings` request group
pub struct WarningsApi<'a> {
    pub(super) client: &'a ApiClient,
}

impl WarningsApi<'_> {
    /// All approved warnings
    pub async fn get_all(&self) -> ApiResult<Vec<Warning>> {
        let outcome = self.client.execute(self.client.get("/warnings")).await;
        ApiResult::from_outcome(outcome, "Failed to fetch warnings")
    }

    pub async fn get_by_id(&self, id: i64) -> ApiResult<Warning> {
        let outcome = self
            .client
            .execute(self.client.get(&format!("/warnings/{}", id)))
            .await;
        ApiResult::from_outcome(outcome, "Failed to fetch warning")
    }

    /// Search by free text and/or category; empty criteria are not sent
    pub async fn search(&self, term: &str, category_id: Option<i64>) -> ApiResult<Vec<Warning>> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if !term.is_empty() {
            params.push(("searchTerm", term.to_string()));
        }
        if let Some(category_id) = category_id {
            params.push(("categoryId", category_id.to_string()));
        }

        let outcome = self
            .client
            .execute(self.client.get("/warnings/search").query(&params))
            .await;
        ApiResult::from_outcome(outcome, "Failed to search warnings")
    }

    /// Submit a report on behalf of `user_id`
    ///
    /// Field-validation errors from the service are joined into one message.
    pub async fn create(&self, warning: &NewWarning, user_id: i64) -> ApiResult<Value> {
        let body = CreateWarningBody {
            title: &warning.title,
            description: &warning.description,
            warning_signs: &warning.warning_signs,
            category_id: warning.category_id,
            user_id,
        };
        debug!(title = %warning.title, category_id = ?warning.category_id, user_id, "Creating warning");

        match self
            .client
            .execute(self.client.post("/warnings").json(&body))
            .await
        {
            Ok(data) => ApiResult::success(data),
            Err(err) => {
                let message = err
                    .validation_message()
                    .unwrap_or_else(|| err.user_message("Failed to create warning"));
                ApiResult::failure(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{gateway_for, unreachable_gateway};
    use crate::models::{NewWarning, Warning, WarningStatus};
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample_form() -> NewWarning {
        NewWarning::new(
            "Fake parcel fee",
            "SMS asks for a small fee to release a parcel.",
            "Unknown number, Payment link",
            Some(1),
        )
    }

    #[tokio::test]
    async fn test_get_all_returns_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/warnings");
                then.status(200).json_body(json!([{
                    "id": 1,
                    "title": "Fake parcel fee",
                    "description": "SMS asks for a small fee.",
                    "warningSigns": "Unknown number, Payment link",
                    "categoryName": "Phone",
                    "status": "Approved",
                    "authorUsername": "ana",
                    "datePosted": "2024-06-01"
                }]));
            })
            .await;

        let result = gateway_for(&server).warnings().get_all().await;
        assert_eq!(
            result.data(),
            Some(&vec![Warning {
                id: 1,
                title: "Fake parcel fee".to_string(),
                description: "SMS asks for a small fee.".to_string(),
                warning_signs: "Unknown number, Payment link".to_string(),
                category_id: None,
                category_name: Some("Phone".to_string()),
                status: WarningStatus::Approved,
                author_username: Some("ana".to_string()),
                date_posted: Some("2024-06-01".to_string()),
            }])
        );
    }

    #[tokio::test]
    async fn test_get_all_tolerates_null_description() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/warnings");
                then.status(200).json_body(json!([
                    {"id": 1, "title": "Fake parcel fee", "description": "fine"},
                    {"id": 2, "title": "Lottery win", "description": null}
                ]));
            })
            .await;

        let result = gateway_for(&server).warnings().get_all().await;
        let warnings = result.data().expect("null description should still decode");
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[1].description, "");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/warnings/99");
                then.status(404).json_body(json!({"error": "Warning not found"}));
            })
            .await;

        let result = gateway_for(&server).warnings().get_by_id(99).await;
        assert_eq!(result.error(), Some("Warning not found"));
    }

    #[tokio::test]
    async fn test_search_sends_only_given_criteria() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/warnings/search")
                    .query_param("categoryId", "4");
                then.status(200).json_body(json!([]));
            })
            .await;

        let result = gateway_for(&server).warnings().search("", Some(4)).await;

        mock.assert_async().await;
        assert_eq!(result.data(), Some(&Vec::new()));
    }

    #[tokio::test]
    async fn test_create_sends_user_id() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/warnings").json_body(json!({
                    "title": "Fake parcel fee",
                    "description": "SMS asks for a small fee to release a parcel.",
                    "warningSigns": "Unknown number, Payment link",
                    "categoryId": 1,
                    "userId": 42
                }));
                then.status(201).json_body(json!({"id": 8, "status": "Pending"}));
            })
            .await;

        let result = gateway_for(&server).warnings().create(&sample_form(), 42).await;

        mock.assert_async().await;
        assert_eq!(result.data(), Some(&json!({"id": 8, "status": "Pending"})));
    }

    #[tokio::test]
    async fn test_create_flattens_validation_errors() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/warnings");
                then.status(400).json_body(json!({
                    "error": "Validation failed",
                    "errors": {"title": ["too short"]}
                }));
            })
            .await;

        let result = gateway_for(&server).warnings().create(&sample_form(), 42).await;
        let error = result.error().unwrap();
        assert!(error.contains("too short"));
    }

    #[tokio::test]
    async fn test_create_without_field_errors_uses_error_field() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/warnings");
                then.status(400).json_body(json!({"error": "Unknown category"}));
            })
            .await;

        let result = gateway_for(&server).warnings().create(&sample_form(), 42).await;
        assert_eq!(result.error(), Some("Unknown category"));
    }

    #[tokio::test]
    async fn test_network_failures() {
        let gateway = unreachable_gateway();
        let warnings = gateway.warnings();

        assert!(!warnings.get_all().await.is_success());
        assert!(!warnings.get_by_id(1).await.is_success());
        assert!(!warnings.search("bank", None).await.is_success());
        let created = warnings.create(&sample_form(), 1).await;
        assert!(!created.error().unwrap_or_default().is_empty());
    }
}
