use crate::config::DEFAULT_BASE_URL;
use crate::models::ApiErrorResponse;
use crate::{Error, Result};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Message used when an error response carries no usable `error.message`.
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to generate image";

/// Bearer-authenticated JSON transport for the OpenAI REST API.
pub struct OpenAiHttpClient {
    pub(crate) client: Client,
    api_key: Option<String>,
    pub(crate) base_url: String,
}

impl OpenAiHttpClient {
    /// Build a client with its own connection pool. `timeout` of `None` keeps
    /// reqwest's default (no overall timeout).
    pub fn new(api_key: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::new_with_client(api_key, builder.build()?))
    }

    pub fn new_with_client(api_key: Option<String>, client: Client) -> Self {
        Self {
            client,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| Error::Configuration("API key not found".to_string()))
    }

    /// POST `request` as JSON to `path` and return the success status with the
    /// raw response body. Non-success statuses become [`Error::Upstream`].
    pub async fn post<Req: Serialize>(&self, path: &str, request: &Req) -> Result<(u16, String)> {
        let api_key = self.require_api_key()?;
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!("Failed to send request to OpenAI: {}", e);
                e
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::debug!(
                status = status.as_u16(),
                reason = status.canonical_reason().unwrap_or(""),
                body = %body,
                "OpenAI API returned an error"
            );
            return Err(Error::Upstream {
                status: status.as_u16(),
                message: upstream_message(&body),
            });
        }

        Ok((status.as_u16(), body))
    }
}

fn upstream_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorResponse>(body)
        .ok()
        .as_ref()
        .and_then(ApiErrorResponse::message)
        .map(str::to_string)
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OpenAiHttpClient {
        OpenAiHttpClient::new(Some("test-key".to_string()), None)
            .unwrap()
            .with_base_url(server.uri())
    }

    #[test]
    fn test_upstream_message_variants() {
        assert_eq!(
            upstream_message(r#"{"error": {"message": "bad prompt"}}"#),
            "bad prompt"
        );
        assert_eq!(upstream_message(r#"{"error": {}}"#), FALLBACK_ERROR_MESSAGE);
        assert_eq!(upstream_message("<html>502</html>"), FALLBACK_ERROR_MESSAGE);
        assert_eq!(upstream_message(""), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn test_blank_key_is_missing() {
        let client = OpenAiHttpClient::new_with_client(Some(String::new()), Client::new());
        let err = client.require_api_key().unwrap_err();
        assert!(matches!(err, Error::Configuration(ref m) if m == "API key not found"));
    }

    #[test]
    fn test_with_base_url_strips_trailing_slash() {
        let client = OpenAiHttpClient::new_with_client(None, Client::new())
            .with_base_url("http://localhost:8080/".to_string());
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_post_sends_bearer_and_returns_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/ping"))
            .and(header("authorization", "Bearer test-key"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(201).set_body_string("{\"ok\":true}"))
            .expect(1)
            .mount(&server)
            .await;

        let (status, body) = client_for(&server)
            .post("/v1/ping", &serde_json::json!({"hello": "world"}))
            .await
            .unwrap();

        assert_eq!(status, 201);
        assert_eq!(body, "{\"ok\":true}");
    }

    #[tokio::test]
    async fn test_post_maps_error_status_to_upstream() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/ping"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": { "message": "Rate limit reached", "type": "requests" }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .post("/v1/ping", &serde_json::json!({}))
            .await
            .unwrap_err();

        match err {
            Error::Upstream { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "Rate limit reached");
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_post_connection_refused_is_transport_error() {
        let client = OpenAiHttpClient::new(Some("test-key".to_string()), None)
            .unwrap()
            .with_base_url("http://127.0.0.1:1".to_string());

        let err = client
            .post("/v1/ping", &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }
}
