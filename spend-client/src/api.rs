//! REST API client
//!
//! Wraps a transport with the console's request conventions: the bearer
//! token, the `action` permission header, envelope decoding and the
//! session-wide reaction to a 401.

use crate::error::{ClientError, ClientResult};
use crate::transport::{HttpRequest, HttpTransport};
use crate::session::Session;
use http::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::{ApiEnvelope, ApiOutcome, Page};
use std::sync::Arc;

/// Header carrying the permission id of a gated call
pub const ACTION_HEADER: &str = "action";

/// Permission a call is gated on, as `module.action`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionGate {
    pub module: &'static str,
    pub action: &'static str,
}

impl ActionGate {
    pub const fn new(module: &'static str, action: &'static str) -> Self {
        Self { module, action }
    }
}

impl std::fmt::Display for ActionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.module, self.action)
    }
}

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    session: Arc<Session>,
    success_code: i64,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn HttpTransport>, session: Arc<Session>, success_code: i64) -> Self {
        Self {
            transport,
            session,
            success_code,
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn success_code(&self) -> i64 {
        self.success_code
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
        gate: Option<ActionGate>,
    ) -> ClientResult<T> {
        let mut request = HttpRequest::new(Method::GET, path);
        request.query = query;
        self.fetch(request, gate).await
    }

    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
        gate: Option<ActionGate>,
    ) -> ClientResult<Page<T>> {
        let mut request = HttpRequest::new(Method::GET, path);
        request.query = query;
        let reply = self.execute(request, gate).await?;
        let envelope: ApiEnvelope<Vec<T>> = decode(&reply.body)?;
        match envelope.into_page(self.success_code)? {
            ApiOutcome::Ok { data } => Ok(data),
            ApiOutcome::Err { code, message } => Err(self.rejected(code, message, reply.authenticated)),
        }
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        gate: Option<ActionGate>,
    ) -> ClientResult<T> {
        let request = with_body(Method::POST, path, body)?;
        self.fetch(request, gate).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        gate: Option<ActionGate>,
    ) -> ClientResult<T> {
        let request = with_body(Method::PUT, path, body)?;
        self.fetch(request, gate).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        gate: Option<ActionGate>,
    ) -> ClientResult<T> {
        let request = with_body(Method::PATCH, path, body)?;
        self.fetch(request, gate).await
    }

    /// Send a body and only check the status
    pub async fn send_ack<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        gate: Option<ActionGate>,
    ) -> ClientResult<()> {
        let request = match body {
            Some(body) => with_body(method, path, body)?,
            None => HttpRequest::new(method, path),
        };
        let reply = self.execute(request, gate).await?;
        let envelope: ApiEnvelope<serde_json::Value> = decode(&reply.body)?;
        match envelope.into_ack(self.success_code) {
            ApiOutcome::Ok { .. } => Ok(()),
            ApiOutcome::Err { code, message } => Err(self.rejected(code, message, reply.authenticated)),
        }
    }

    pub async fn delete(&self, path: &str, gate: Option<ActionGate>) -> ClientResult<()> {
        self.send_ack::<()>(Method::DELETE, path, None, gate).await
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
        gate: Option<ActionGate>,
    ) -> ClientResult<T> {
        let reply = self.execute(request, gate).await?;
        let envelope: ApiEnvelope<T> = decode(&reply.body)?;
        match envelope.into_outcome(self.success_code)? {
            ApiOutcome::Ok { data } => Ok(data),
            ApiOutcome::Err { code, message } => Err(self.rejected(code, message, reply.authenticated)),
        }
    }

    /// Attach headers, send, and map transport-level failures
    async fn execute(&self, mut request: HttpRequest, gate: Option<ActionGate>) -> ClientResult<Reply> {
        if let Some(gate) = gate {
            let Some(permission_id) = self.session.permission_id(gate.module, gate.action) else {
                tracing::debug!(permission = %gate, path = %request.path, "Missing permission, request not sent");
                return Err(ClientError::Forbidden(gate.to_string()));
            };
            request
                .headers
                .push((ACTION_HEADER.to_string(), permission_id.to_string()));
        }

        let token = self.session.token();
        if let Some(token) = &token {
            request
                .headers
                .push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        let method = request.method.clone();
        let path = request.path.clone();
        let response = self.transport.send(request).await?;
        tracing::debug!(method = %method, path = %path, status = %response.status, "Response received");

        let authenticated = token.is_some();
        match response.status {
            StatusCode::UNAUTHORIZED if authenticated => {
                self.session.force_logout();
                Err(ClientError::Unauthorized)
            }
            StatusCode::NOT_FOUND if response.body.trim().is_empty() => Err(ClientError::NotFound(path)),
            status if !status.is_success() => {
                // Error bodies still use the envelope when the backend produced them
                match serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&response.body) {
                    Ok(envelope) => Err(self.rejected(
                        envelope.status,
                        envelope.error_message(),
                        authenticated,
                    )),
                    Err(_) => Err(self.rejected(i64::from(status.as_u16()), None, authenticated)),
                }
            }
            _ => Ok(Reply {
                body: response.body,
                authenticated,
            }),
        }
    }

    /// Map a non-success application status
    ///
    /// A 401 only ends the session when the request carried a token.
    fn rejected(&self, code: i64, message: Option<String>, authenticated: bool) -> ClientError {
        if code == i64::from(StatusCode::UNAUTHORIZED.as_u16()) && authenticated {
            self.session.force_logout();
            return ClientError::Unauthorized;
        }
        tracing::debug!(code, message = ?message, "Request rejected");
        ClientError::Api { code, message }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("session", &self.session)
            .field("success_code", &self.success_code)
            .finish()
    }
}

/// Body of a 2xx response and whether the request carried a token
struct Reply {
    body: String,
    authenticated: bool,
}

fn with_body<B: Serialize + ?Sized>(method: Method, path: &str, body: &B) -> ClientResult<HttpRequest> {
    let mut request = HttpRequest::new(method, path);
    request.body = Some(serde_json::to_value(body)?);
    Ok(request)
}

fn decode<T: DeserializeOwned>(body: &str) -> ClientResult<T> {
    serde_json::from_str(body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
}
