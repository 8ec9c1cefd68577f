//! HTTP transport
//!
//! [`HttpTransport`] is the seam between the API client and the network.
//! [`ReqwestTransport`] talks to the real backend. With the `test-util`
//! feature, `ScriptedTransport` replays canned replies instead.

use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use http::{Method, StatusCode};
use reqwest::Client;
use std::time::Duration;

#[cfg(any(test, feature = "test-util"))]
mod scripted;

#[cfg(any(test, feature = "test-util"))]
pub use scripted::{ScriptedReply, ScriptedTransport};

/// A request as the API client builds it
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    /// Path relative to the base URL, without a leading slash
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response: transport status plus body text
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Sends one request
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> ClientResult<HttpResponse>;
}

/// Network transport backed by reqwest
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> ClientResult<HttpResponse> {
        let url = self.url(&request.path);
        tracing::debug!(method = %request.method, url = %url, "Sending request");

        let mut req = self.client.request(request.method, &url);
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let response = req.send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_header_lookup() {
        let mut request = HttpRequest::new(Method::GET, "roles");
        request.headers.push(("Authorization".into(), "Bearer t".into()));
        assert_eq!(request.header("authorization"), Some("Bearer t"));
        assert_eq!(request.header("action"), None);
    }

    #[test]
    fn test_reqwest_url_join() {
        let transport =
            ReqwestTransport::new("http://localhost:8080/api/", Duration::from_secs(5)).unwrap();
        assert_eq!(transport.url("/users"), "http://localhost:8080/api/users");
        assert_eq!(transport.base_url(), "http://localhost:8080/api");
    }
}
