use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use guard_core::api::{ApiError, GuardApi, ScanPayload, ScanType, API_KEY_HEADER, PROJECTS_PATH};
use serde_json::Value;

/// `GuardApi` over HTTPS. Metadata and scans live on different hosts; both
/// authenticate with the same API key header.
pub struct HttpGuardClient {
    http: reqwest::Client,
    base_url: String,
    scan_base_url: String,
    api_key: String,
}

impl HttpGuardClient {
    pub fn new(base_url: String, scan_base_url: String, api_key: String, timeout_ms: u64) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            scan_base_url: scan_base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// The credential test: the project listing must answer with a success status.
    pub async fn verify_credentials(&self) -> Result<(), ApiError> {
        self.fetch_projects().await.map(|_| ())
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> Result<Value, ApiError> {
        let resp = req
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.into()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.into()))?;

        if !status.is_success() {
            tracing::warn!(
                target: "guard.http",
                status = status.as_u16(),
                "guard api returned an error status"
            );
            return Err(ApiError::from_status(status.as_u16(), &body));
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.into()))
    }
}

#[async_trait]
impl GuardApi for HttpGuardClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_projects(&self) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, PROJECTS_PATH);
        tracing::debug!(target: "guard.http", %url, "GET project listing");
        self.send(self.http.get(&url)).await
    }

    async fn scan(&self, scan_type: ScanType, payload: &ScanPayload) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.scan_base_url, scan_type.path());
        tracing::debug!(
            target: "guard.http",
            %url,
            scanners = payload.scanners.len(),
            "POST scan"
        );
        self.send(self.http.post(&url).json(payload)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn client(server: &mockito::Server) -> HttpGuardClient {
        HttpGuardClient::new(server.url(), format!("{}/", server.url()), "k-test".into(), 5_000).unwrap()
    }

    fn payload(prompt: &str) -> ScanPayload {
        serde_json::from_value(json!({
            "prompt": prompt,
            "config": {"project_id": "p1", "fail_fast": false, "cache": {"enabled": true, "ttl": 3600}},
            "metadata": {"project-type": "t", "session": "session-1", "file": "f", "tags": [], "name": "n"},
            "use": [{"name": "Toxicity:base", "type": "Toxicity"}]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_projects_sends_api_key() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("GET", "/projects/api-key/projects/")
            .match_header("x-api-key", "k-test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id": "p1", "name": "One"}]"#)
            .create_async()
            .await;

        let v = client(&server).fetch_projects().await.unwrap();
        assert_eq!(v, json!([{"id": "p1", "name": "One"}]));
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_scan_posts_to_type_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("POST", "/guard/prompt-output")
            .match_header("x-api-key", "k-test")
            .match_body(Matcher::PartialJson(json!({
                "prompt": "hi",
                "use": [{"name": "Toxicity:base", "type": "Toxicity"}]
            })))
            .with_status(200)
            .with_body(r#"{"is_valid": false, "results": []}"#)
            .create_async()
            .await;

        let v = client(&server)
            .scan(ScanType::Output, &payload("hi"))
            .await
            .unwrap();
        assert_eq!(v["is_valid"], false);
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_statuses_are_classified() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/projects/api-key/projects/")
            .with_status(401)
            .create_async()
            .await;
        let err = client(&server).verify_credentials().await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));

        let _m = server
            .mock("POST", "/guard/prompt-input")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;
        let err = client(&server)
            .scan(ScanType::Input, &payload("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpStatus { status: 500, ref body_snippet } if body_snippet == "boom"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/guard/prompt-input")
            .with_status(200)
            .with_body("<html>")
            .create_async()
            .await;
        let err = client(&server)
            .scan(ScanType::Input, &payload("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let c = HttpGuardClient::new(
            "http://127.0.0.1:9".into(),
            "http://127.0.0.1:9".into(),
            "k".into(),
            500,
        )
        .unwrap();
        let err = c.fetch_projects().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
