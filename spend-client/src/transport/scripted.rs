//! Canned-reply transport for tests

use super::{HttpRequest, HttpResponse, HttpTransport};
use crate::error::ClientResult;
use async_trait::async_trait;
use http::{Method, StatusCode};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

/// One canned reply
#[derive(Debug, Clone)]
pub struct ScriptedReply {
    pub status: StatusCode,
    pub body: String,
    pub delay: Option<Duration>,
}

impl ScriptedReply {
    pub fn json(status: StatusCode, body: &serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: None,
        }
    }

    /// Success envelope wrapping `data`
    pub fn ok(data: serde_json::Value) -> Self {
        Self::json(StatusCode::OK, &envelope(200, None, Some(data)))
    }

    /// Paged success envelope
    pub fn paged(items: serde_json::Value, page: u32, limit: u32, total: u64) -> Self {
        let body = serde_json::json!({
            "status": 200,
            "data": { "data": items, "page": page, "limit": limit, "total": total }
        });
        Self::json(StatusCode::OK, &body)
    }

    /// Envelope with a non-success application status, transport 200
    pub fn failure(status: i64, message: &str) -> Self {
        Self::json(StatusCode::OK, &envelope(status, Some(message), None))
    }

    /// Transport-level status with an empty body
    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            body: String::new(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

fn envelope(
    status: i64,
    message: Option<&str>,
    data: Option<serde_json::Value>,
) -> serde_json::Value {
    let mut body = serde_json::json!({ "status": status });
    if let Some(message) = message {
        body["message"] = serde_json::Value::String(message.to_string());
    }
    if let Some(data) = data {
        body["data"] = serde_json::json!({ "data": data });
    }
    body
}

/// Replays queued replies per `(method, path)`
///
/// Replies are consumed in order; the last one for a route stays in place
/// and answers every later call. Unscripted routes answer 404.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<HashMap<(Method, String), VecDeque<ScriptedReply>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for `method path`
    pub fn on(&self, method: Method, path: &str, reply: ScriptedReply) -> &Self {
        if let Ok(mut replies) = self.replies.lock() {
            replies
                .entry((method, path.to_string()))
                .or_default()
                .push_back(reply);
        }
        self
    }

    /// Every request sent so far
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Requests sent to `method path`
    pub fn requests_to(&self, method: &Method, path: &str) -> Vec<HttpRequest> {
        self.requests()
            .into_iter()
            .filter(|r| &r.method == method && r.path == path)
            .collect()
    }

    fn next_reply(&self, method: &Method, path: &str) -> Option<ScriptedReply> {
        let mut replies = self.replies.lock().ok()?;
        let queue = replies.get_mut(&(method.clone(), path.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> ClientResult<HttpResponse> {
        let reply = self.next_reply(&request.method, &request.path);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let Some(reply) = reply else {
            tracing::debug!(method = %request.method, path = %request.path, "No scripted reply");
            return Ok(HttpResponse {
                status: StatusCode::NOT_FOUND,
                body: String::new(),
            });
        };
        if let Some(delay) = reply.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(HttpResponse {
            status: reply.status,
            body: reply.body,
        })
    }
}
