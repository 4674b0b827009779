use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use super::error::ApiError;

/// Thin HTTP boundary around the scam-warning service
///
/// One `reqwest::Client` with a fixed timeout and JSON headers. No auth
/// headers, retries or caching: every call goes to the network.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` (e.g. `http://localhost:5000/api`)
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Ok(Self {
            http: Client::builder()
                .timeout(timeout)
                .default_headers(headers)
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(self.url(path))
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.http.post(self.url(path))
    }

    pub fn put(&self, path: &str) -> RequestBuilder {
        self.http.put(self.url(path))
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.http.delete(self.url(path))
    }

    /// Send a prepared request and decode a 2xx body as `T`
    ///
    /// An empty 2xx body decodes as JSON `null`.
    pub async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let request = request.build().map_err(ApiError::from_transport)?;
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "Sending request");

        let response = self.http.execute(request).await.map_err(|e| {
            warn!(%method, %url, error = %e, "Request failed before a response arrived");
            ApiError::from_transport(e)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(ApiError::from_transport)?;

        if !status.is_success() {
            warn!(%method, %url, status = status.as_u16(), body = %body, "Service returned an error");
            return Err(ApiError::from_status(status.as_u16(), &body));
        }

        debug!(%method, %url, status = status.as_u16(), "Response received");
        decode_body(&body)
    }
}

fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let decoded = if body.trim().is_empty() {
        serde_json::from_value(Value::Null)
    } else {
        serde_json::from_str(body)
    };
    decoded.map_err(|e| ApiError::Decode(format!("Unexpected response from server: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ErrorKind;
    use httpmock::prelude::*;
    use serde_json::json;

    fn test_client(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.base_url(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_json_headers_and_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/echo")
                    .header("content-type", "application/json")
                    .json_body(json!({"ping": 1}));
                then.status(200).json_body(json!({"pong": 1}));
            })
            .await;

        let client = test_client(&server);
        let body: Value = client
            .execute(client.post("echo").json(&json!({"ping": 1})))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(body, json!({"pong": 1}));
    }

    #[tokio::test]
    async fn test_empty_success_body_is_null() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(DELETE).path("/things/1");
                then.status(204);
            })
            .await;

        let client = test_client(&server);
        let body: Value = client.execute(client.delete("/things/1")).await.unwrap();
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn test_non_2xx_maps_to_status_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/missing");
                then.status(404)
                    .header("content-type", "application/json")
                    .body(r#"{"error": "Warning not found"}"#);
            })
            .await;

        let client = test_client(&server);
        let err = client
            .execute::<Value>(client.get("/missing"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Server);
        assert_eq!(err.user_message("Failed"), "Warning not found");
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_decode_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/numbers");
                then.status(200).body("not json");
            })
            .await;

        let client = test_client(&server);
        let err = client
            .execute::<Vec<i64>>(client.get("/numbers"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let client = ApiClient::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let err = client.execute::<Value>(client.get("/warnings")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(!err.user_message("Failed").is_empty());
    }

    #[test]
    fn test_url_joining() {
        let client = ApiClient::new("http://svc/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://svc/api");
        assert_eq!(client.url("/warnings/3"), "http://svc/api/warnings/3");
        assert_eq!(client.url("categories"), "http://svc/api/categories");
    }
}
